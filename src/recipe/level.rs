//! Topological depth of each node.

use super::closure::find_cycle;
use super::error::GraphError;
use super::graph::{NodeIdx, RecipeGraph};

/// Level per node, in graph order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Levels(Vec<u32>);

impl Levels {
	/// All nodes at level 0.
	pub fn flat(node_count: usize) -> Self {
		Self(vec![0; node_count])
	}

	/// Level of the node at `idx`.
	///
	/// # Panics
	///
	/// Panics if `idx` is out of range.
	pub fn of(&self, idx: NodeIdx) -> u32 {
		self.0[idx]
	}

	/// Level of the item with `id`.
	pub fn get(&self, graph: &RecipeGraph, id: &str) -> Option<u32> {
		graph.index_of(id).map(|idx| self.0[idx])
	}

	/// Deepest level, 0 for an empty graph.
	pub fn max_level(&self) -> u32 {
		self.0.iter().copied().max().unwrap_or(0)
	}

	/// Levels indexed by node.
	pub fn as_slice(&self) -> &[u32] {
		&self.0
	}
}

/// Longest-path relaxation: a node sits one level above its deepest resolvable
/// ingredient; nodes without resolvable ingredients sit at 0.
///
/// Runs full passes until nothing changes. On an acyclic graph of `n` nodes
/// that takes at most `n + 1` passes and no level exceeds `n - 1`; breaking
/// either bound means the graph has a cycle.
pub fn assign_levels(graph: &RecipeGraph) -> Result<Levels, GraphError> {
	let n = graph.node_count();
	let mut levels = vec![0u32; n];
	let limit = u32::try_from(n).unwrap_or(u32::MAX);

	for _ in 0..=n {
		let mut changed = false;
		for node in 0..n {
			for &ingredient in graph.ingredients_of(node) {
				if levels[node] <= levels[ingredient] {
					levels[node] = levels[ingredient] + 1;
					changed = true;
					if levels[node] >= limit {
						return Err(cycle_error(graph, node));
					}
				}
			}
		}
		if !changed {
			return Ok(Levels(levels));
		}
	}

	Err(cycle_error(graph, 0))
}

fn cycle_error(graph: &RecipeGraph, fallback: NodeIdx) -> GraphError {
	let node = find_cycle(graph).unwrap_or(fallback);
	GraphError::CycleDetected {
		node: graph.id(node).to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::recipe::item::Item;

	fn sample() -> RecipeGraph {
		RecipeGraph::build([
			Item::raw("a", "A"),
			Item::raw("b", "B"),
			Item::crafted("c", "C", ["a", "b"]),
			Item::crafted("d", "D", ["c"]),
		])
	}

	#[test]
	fn assigns_longest_path_depth() {
		let graph = sample();
		let levels = assign_levels(&graph).unwrap();
		assert_eq!(levels.as_slice(), &[0, 0, 1, 2]);
		assert_eq!(levels.get(&graph, "d"), Some(2));
		assert_eq!(levels.max_level(), 2);
	}

	#[test]
	fn takes_deepest_ingredient() {
		// d needs a (level 0) and c (level 2 via b)
		let graph = RecipeGraph::build([
			Item::crafted("d", "D", ["a", "c"]),
			Item::crafted("c", "C", ["b"]),
			Item::crafted("b", "B", ["a"]),
			Item::raw("a", "A"),
		]);
		let levels = assign_levels(&graph).unwrap();
		assert_eq!(levels.get(&graph, "d"), Some(3));
	}

	#[test]
	fn ingredients_sit_below_products() {
		let graph = RecipeGraph::build([
			Item::crafted("circuit", "Circuit", ["cable", "plate"]),
			Item::crafted("cable", "Cable", ["copper"]),
			Item::crafted("plate", "Plate", ["iron"]),
			Item::raw("copper", "Copper"),
			Item::raw("iron", "Iron"),
			Item::crafted("module", "Module", ["circuit", "plate", "circuit"]),
		]);
		let levels = assign_levels(&graph).unwrap();
		for edge in graph.edges() {
			assert!(levels.of(edge.ingredient) < levels.of(edge.product));
		}
	}

	#[test]
	fn is_idempotent() {
		let graph = sample();
		assert_eq!(assign_levels(&graph).unwrap(), assign_levels(&graph).unwrap());
	}

	#[test]
	fn dangling_only_recipe_stays_at_zero() {
		let graph = RecipeGraph::build([Item::crafted("e", "E", ["x"])]);
		assert_eq!(assign_levels(&graph).unwrap().as_slice(), &[0]);
	}

	#[test]
	fn reports_cycle_instead_of_looping() {
		let graph = RecipeGraph::build([
			Item::raw("ore", "Ore"),
			Item::crafted("a", "A", ["ore", "b"]),
			Item::crafted("b", "B", ["a"]),
		]);
		match assign_levels(&graph) {
			Err(GraphError::CycleDetected { node }) => assert!(node == "a" || node == "b"),
			other => panic!("expected cycle, got {other:?}"),
		}
	}

	#[test]
	fn reports_self_loop() {
		let graph = RecipeGraph::build([Item::crafted("a", "A", ["a"])]);
		assert_eq!(
			assign_levels(&graph),
			Err(GraphError::CycleDetected { node: "a".into() })
		);
	}

	#[test]
	fn empty_graph_has_no_levels() {
		let levels = assign_levels(&RecipeGraph::default()).unwrap();
		assert!(levels.as_slice().is_empty());
		assert_eq!(levels.max_level(), 0);
	}
}
