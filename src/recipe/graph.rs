//! Dependency graph built from a flat item list.
//!
//! Edges point from an ingredient to the product that consumes it. Ingredient
//! ids that do not name an item are dropped while building; repeated listings
//! of the same ingredient produce repeated edges, in listing order.

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::warn;

use super::item::Item;

/// Position of a node in the graph's insertion order.
pub type NodeIdx = usize;

/// A resolved `ingredient -> product` edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	/// Consumed node.
	pub ingredient: NodeIdx,
	/// Consuming node.
	pub product: NodeIdx,
}

/// Node index plus the resolved edges between nodes.
#[derive(Clone, Debug, Default)]
pub struct RecipeGraph {
	nodes: IndexMap<String, Item>,
	edges: Vec<Edge>,
	ingredients_of: Vec<Vec<NodeIdx>>,
	consumers_of: Vec<Vec<NodeIdx>>,
}

impl RecipeGraph {
	/// Build the graph. The first item with a given id wins.
	pub fn build(items: impl IntoIterator<Item = Item>) -> Self {
		let mut nodes = IndexMap::new();
		for item in items {
			match nodes.entry(item.id.clone()) {
				Entry::Occupied(_) => warn!("skipping duplicate item `{}`", item.id),
				Entry::Vacant(slot) => {
					slot.insert(item);
				}
			}
		}

		let mut edges = Vec::new();
		let mut ingredients_of = vec![Vec::new(); nodes.len()];
		let mut consumers_of = vec![Vec::new(); nodes.len()];
		for (product, item) in nodes.values().enumerate() {
			for ingredient in item.ingredients() {
				let Some(source) = nodes.get_index_of(&ingredient.id) else {
					continue;
				};
				edges.push(Edge {
					ingredient: source,
					product,
				});
				ingredients_of[product].push(source);
				consumers_of[source].push(product);
			}
		}

		Self {
			nodes,
			edges,
			ingredients_of,
			consumers_of,
		}
	}

	/// Number of distinct items.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of resolved edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// True for a graph without items.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Look an item up by id.
	pub fn get(&self, id: &str) -> Option<&Item> {
		self.nodes.get(id)
	}

	/// Node index of `id`.
	pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
		self.nodes.get_index_of(id)
	}

	/// Item at `idx`.
	///
	/// # Panics
	///
	/// Panics if `idx` is out of range.
	pub fn item(&self, idx: NodeIdx) -> &Item {
		&self.nodes[idx]
	}

	/// Id of the node at `idx`.
	///
	/// # Panics
	///
	/// Panics if `idx` is out of range.
	pub fn id(&self, idx: NodeIdx) -> &str {
		self.item(idx).id.as_str()
	}

	/// Every edge, grouped by product in input order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Edges as `(ingredient id, product id)` pairs.
	pub fn edge_ids(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
		self.edges
			.iter()
			.map(|e| (self.id(e.ingredient), self.id(e.product)))
	}

	/// Resolvable ingredients of `idx`, one entry per edge.
	pub fn ingredients_of(&self, idx: NodeIdx) -> &[NodeIdx] {
		&self.ingredients_of[idx]
	}

	/// Products consuming `idx`, one entry per edge.
	pub fn consumers_of(&self, idx: NodeIdx) -> &[NodeIdx] {
		&self.consumers_of[idx]
	}
}
