//! Structural role of each node.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::graph::RecipeGraph;

/// Role of a node in the dependency graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
	/// Has no ingredients.
	Raw,
	/// Nothing consumes it.
	Leaf,
	/// Both made from and consumed by other items.
	Intermediate,
}

impl Classification {
	/// Lowercase name, as serialized.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Raw => "raw",
			Self::Leaf => "leaf",
			Self::Intermediate => "intermediate",
		}
	}
}

impl fmt::Display for Classification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// How a recipe whose ingredients all dangle is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawPolicy {
	/// Raw only when the listed ingredient list is empty.
	#[default]
	Listed,
	/// Raw when none of the listed ingredients resolve to a node.
	Resolved,
}

/// Classify every node, in graph order.
///
/// Leaf takes precedence over raw: an isolated item is a leaf.
pub fn classify(graph: &RecipeGraph, policy: RawPolicy) -> Vec<Classification> {
	(0..graph.node_count())
		.map(|idx| {
			let is_leaf = graph.consumers_of(idx).is_empty();
			let is_raw = match policy {
				RawPolicy::Listed => graph.item(idx).ingredients().is_empty(),
				RawPolicy::Resolved => graph.ingredients_of(idx).is_empty(),
			};
			if is_leaf {
				Classification::Leaf
			} else if is_raw {
				Classification::Raw
			} else {
				Classification::Intermediate
			}
		})
		.collect()
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
	fn classifies_chain() {
		let classes = classify(&sample(), RawPolicy::Listed);
		assert_eq!(
			classes,
			vec![
				Classification::Raw,
				Classification::Raw,
				Classification::Intermediate,
				Classification::Leaf,
			]
		);
	}

	#[test]
	fn isolated_item_is_leaf() {
		let graph = RecipeGraph::build([Item::raw("lonely", "Lonely")]);
		assert_eq!(classify(&graph, RawPolicy::Listed), vec![Classification::Leaf]);
	}

	#[test]
	fn dangling_recipe_follows_policy() {
		// `e` lists only a missing ingredient but is consumed by `f`.
		let graph = RecipeGraph::build([
			Item::crafted("e", "E", ["x"]),
			Item::crafted("f", "F", ["e"]),
		]);
		assert_eq!(classify(&graph, RawPolicy::Listed)[0], Classification::Intermediate);
		assert_eq!(classify(&graph, RawPolicy::Resolved)[0], Classification::Raw);
	}

	#[test]
	fn unconsumed_dangling_recipe_is_leaf_under_both_policies() {
		let graph = RecipeGraph::build([Item::crafted("e", "E", ["x"])]);
		assert_eq!(classify(&graph, RawPolicy::Listed), vec![Classification::Leaf]);
		assert_eq!(classify(&graph, RawPolicy::Resolved), vec![Classification::Leaf]);
	}

	#[test]
	fn serializes_lowercase() {
		assert_eq!(
			serde_json::to_string(&Classification::Intermediate).unwrap(),
			"\"intermediate\""
		);
		assert_eq!(Classification::Leaf.to_string(), "leaf");
	}
}
