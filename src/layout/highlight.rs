//! Highlight marks resolved to node indices.

use std::collections::HashSet;

use crate::recipe::{NodeIdx, Reach, RecipeGraph};

/// Nodes and `(ingredient, product)` edges currently marked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
	nodes: HashSet<NodeIdx>,
	edges: HashSet<(NodeIdx, NodeIdx)>,
}

impl Highlight {
	/// Resolve a walk's ids against `graph`.
	pub fn from_reach(graph: &RecipeGraph, reach: &Reach) -> Self {
		let nodes = reach
			.nodes
			.iter()
			.filter_map(|id| graph.index_of(id))
			.collect();
		let edges = reach
			.edges
			.iter()
			.filter_map(|(a, b)| Some((graph.index_of(a)?, graph.index_of(b)?)))
			.collect();
		Self { nodes, edges }
	}

	/// True when nothing is marked.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Whether the node at `idx` is marked.
	pub fn has_node(&self, idx: NodeIdx) -> bool {
		self.nodes.contains(&idx)
	}

	/// Whether the edge `ingredient → product` is marked.
	pub fn has_edge(&self, ingredient: NodeIdx, product: NodeIdx) -> bool {
		self.edges.contains(&(ingredient, product))
	}

	/// Drop every mark.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::recipe::{Direction, Item, collect};

	#[test]
	fn resolves_reach_to_indices() {
		let graph = RecipeGraph::build([
			Item::raw("a", "A"),
			Item::crafted("b", "B", ["a"]),
			Item::crafted("c", "C", ["b"]),
		]);
		let reach = collect(&graph, "b", Direction::Downstream).unwrap();
		let mut highlight = Highlight::from_reach(&graph, &reach);
		assert!(highlight.has_node(1) && highlight.has_node(2));
		assert!(!highlight.has_node(0));
		assert!(highlight.has_edge(1, 2));
		assert!(!highlight.has_edge(0, 1));

		highlight.clear();
		assert!(highlight.is_empty());
	}
}
