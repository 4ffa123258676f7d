//! Input records: items and the recipes that produce them.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::LoadError;

/// A craftable or gatherable item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
	/// Unique key.
	pub id: String,
	/// Display label.
	pub name: String,
	/// Wiki page opened on activation.
	#[serde(default, alias = "wikiLink", skip_serializing_if = "Option::is_none")]
	pub wiki_link: Option<String>,
	/// Absent for gathered resources.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub recipe: Option<Recipe>,
}

/// The ingredients consumed to craft an item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
	/// Ingredients in listing order; `null` reads as empty.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub ingredients: Vec<Ingredient>,
}

/// A reference to another item by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
	/// Id of the consumed item. May name nothing.
	pub id: String,
	/// Quantity consumed. Carried through but unused by the graph.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<f64>,
}

impl Item {
	/// An item with no recipe.
	pub fn raw(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			wiki_link: None,
			recipe: None,
		}
	}

	/// An item crafted from the given ingredient ids, in listing order.
	pub fn crafted<I, S>(id: impl Into<String>, name: impl Into<String>, ingredients: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			recipe: Some(Recipe {
				ingredients: ingredients
					.into_iter()
					.map(|id| Ingredient {
						id: id.into(),
						amount: None,
					})
					.collect(),
			}),
			..Self::raw(id, name)
		}
	}

	/// Attach a wiki link.
	pub fn with_wiki_link(mut self, link: impl Into<String>) -> Self {
		self.wiki_link = Some(link.into());
		self
	}

	/// Listed ingredients, empty when the recipe is absent.
	pub fn ingredients(&self) -> &[Ingredient] {
		self.recipe
			.as_ref()
			.map(|r| r.ingredients.as_slice())
			.unwrap_or_default()
	}
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a JSON array of item records, rejecting repeated ids.
pub fn parse_items(json: &str) -> Result<Vec<Item>, LoadError> {
	let items: Vec<Item> = serde_json::from_str(json)?;
	let mut seen = HashSet::with_capacity(items.len());
	for item in &items {
		if !seen.insert(item.id.as_str()) {
			return Err(LoadError::DuplicateId(item.id.clone()));
		}
	}
	Ok(items)
}
