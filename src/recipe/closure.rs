//! Upstream and downstream walks used to highlight a node's closure.
//!
//! Walks are depth-first and pre-order: a node is reported before the edge to
//! each child, and each edge before the child's own subtree. Shared ancestors
//! are not de-duplicated, so a diamond reports the shared node once per path.
//! Nodes on the current path are tracked, and reaching one of them again
//! aborts the walk with [`GraphError::CycleDetected`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::GraphError;
use super::graph::{NodeIdx, RecipeGraph};

/// Which way to follow ingredient edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// Towards ingredients: what does this item need.
	Upstream,
	/// Towards products: what consumes this item.
	Downstream,
}

/// One step of a walk, in logical ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit<'a> {
	/// A node reached by the walk.
	Node(&'a str),
	/// Always oriented `ingredient -> product`, whatever the walk direction.
	Edge {
		/// Consumed item.
		ingredient: &'a str,
		/// Consuming item.
		product: &'a str,
	},
}

/// Nodes and edges reached by a walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reach {
	/// Ids of every node reached, the root included.
	pub nodes: HashSet<String>,
	/// `(ingredient, product)` pairs.
	pub edges: HashSet<(String, String)>,
}

impl Reach {
	/// True when the walk reached nothing.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Whether `id` was reached.
	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.contains(id)
	}

	/// Whether the edge `ingredient -> product` was reached.
	pub fn contains_edge(&self, ingredient: &str, product: &str) -> bool {
		self.edges
			.contains(&(ingredient.to_string(), product.to_string()))
	}
}

struct Frame {
	node: NodeIdx,
	next: usize,
}

/// Walk from `root` in `direction`, calling `visit` for every node and edge.
pub fn walk<'g, F>(
	graph: &'g RecipeGraph,
	root: &str,
	direction: Direction,
	mut visit: F,
) -> Result<(), GraphError>
where
	F: FnMut(Visit<'g>),
{
	let root = graph
		.index_of(root)
		.ok_or_else(|| GraphError::UnknownNode(root.to_string()))?;
	let children = |idx: NodeIdx| match direction {
		Direction::Upstream => graph.ingredients_of(idx),
		Direction::Downstream => graph.consumers_of(idx),
	};

	let mut on_path = vec![false; graph.node_count()];
	let mut stack = vec![Frame { node: root, next: 0 }];
	on_path[root] = true;
	visit(Visit::Node(graph.id(root)));

	while let Some(frame) = stack.last_mut() {
		let node = frame.node;
		let Some(&child) = children(node).get(frame.next) else {
			on_path[node] = false;
			stack.pop();
			continue;
		};
		frame.next += 1;

		if on_path[child] {
			return Err(GraphError::CycleDetected {
				node: graph.id(child).to_string(),
			});
		}
		let (ingredient, product) = match direction {
			Direction::Upstream => (child, node),
			Direction::Downstream => (node, child),
		};
		visit(Visit::Edge {
			ingredient: graph.id(ingredient),
			product: graph.id(product),
		});
		visit(Visit::Node(graph.id(child)));
		on_path[child] = true;
		stack.push(Frame {
			node: child,
			next: 0,
		});
	}
	Ok(())
}

/// Walk everything `root` is crafted from.
pub fn upstream<'g, F>(graph: &'g RecipeGraph, root: &str, visit: F) -> Result<(), GraphError>
where
	F: FnMut(Visit<'g>),
{
	walk(graph, root, Direction::Upstream, visit)
}

/// Walk everything crafted from `root`.
pub fn downstream<'g, F>(graph: &'g RecipeGraph, root: &str, visit: F) -> Result<(), GraphError>
where
	F: FnMut(Visit<'g>),
{
	walk(graph, root, Direction::Downstream, visit)
}

/// Collect a walk into sets, e.g. for highlighting.
pub fn collect(graph: &RecipeGraph, root: &str, direction: Direction) -> Result<Reach, GraphError> {
	let mut reach = Reach::default();
	walk(graph, root, direction, |step| match step {
		Visit::Node(id) => {
			reach.nodes.insert(id.to_string());
		}
		Visit::Edge {
			ingredient,
			product,
		} => {
			reach
				.edges
				.insert((ingredient.to_string(), product.to_string()));
		}
	})?;
	Ok(reach)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
	White,
	Gray,
	Black,
}

/// Some node on a dependency cycle, if the graph has one.
pub fn find_cycle(graph: &RecipeGraph) -> Option<NodeIdx> {
	let mut marks = vec![Mark::White; graph.node_count()];
	for start in 0..graph.node_count() {
		if marks[start] != Mark::White {
			continue;
		}
		marks[start] = Mark::Gray;
		let mut stack = vec![Frame {
			node: start,
			next: 0,
		}];
		while let Some(frame) = stack.last_mut() {
			let node = frame.node;
			let Some(&child) = graph.ingredients_of(node).get(frame.next) else {
				marks[node] = Mark::Black;
				stack.pop();
				continue;
			};
			frame.next += 1;
			match marks[child] {
				Mark::Gray => return Some(child),
				Mark::Black => {}
				Mark::White => {
					marks[child] = Mark::Gray;
					stack.push(Frame {
						node: child,
						next: 0,
					});
				}
			}
		}
	}
	None
}
