//! Per-tick snapshot handed to the renderer.

use crate::recipe::Classification;

/// One node as drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeFrame<'a> {
	/// Item id.
	pub id: &'a str,
	/// Label.
	pub name: &'a str,
	/// Graph-space x.
	pub x: f32,
	/// Graph-space y.
	pub y: f32,
	/// Structural role.
	pub class: Classification,
	/// Crafting depth.
	pub level: u32,
	/// Fixed in place, either dragged or dropped while paused.
	pub pinned: bool,
	/// Part of the current drag highlight.
	pub highlighted: bool,
}

/// One edge as drawn this frame, ingredient to product.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeFrame<'a> {
	/// Ingredient id.
	pub source: &'a str,
	/// Product id.
	pub target: &'a str,
	/// Ingredient position.
	pub from: (f32, f32),
	/// Product position.
	pub to: (f32, f32),
	/// Part of the current drag highlight.
	pub highlighted: bool,
}

/// Everything the renderer needs to draw one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame<'a> {
	/// Nodes in input order.
	pub nodes: Vec<NodeFrame<'a>>,
	/// Edges in build order.
	pub edges: Vec<EdgeFrame<'a>>,
	/// Grid cell size while the grid overlay is shown.
	pub grid: Option<f32>,
}

impl<'a> Frame<'a> {
	/// True when any node or edge is highlighted.
	pub fn has_highlight(&self) -> bool {
		self.nodes.iter().any(|n| n.highlighted) || self.edges.iter().any(|e| e.highlighted)
	}

	/// The node with this id.
	pub fn node(&self, id: &str) -> Option<&NodeFrame<'a>> {
		self.nodes.iter().find(|n| n.id == id)
	}
}
