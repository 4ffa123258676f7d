//! Entry points for the interaction controller.
//!
//! Each handler runs to completion between ticks.

use log::warn;

use super::engine::{LayoutEngine, Mode};
use super::error::LayoutError;
use crate::recipe::Direction;

/// Mouse button that started a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
	/// Highlights what the node is made from.
	Primary,
	/// Highlights what the node is used in.
	Secondary,
}

impl PointerButton {
	/// Map a DOM `MouseEvent.button` value.
	pub fn from_dom(button: i16) -> Option<Self> {
		match button {
			0 => Some(Self::Primary),
			2 => Some(Self::Secondary),
			_ => None,
		}
	}

	/// Closure direction this button highlights.
	pub fn direction(self) -> Direction {
		match self {
			Self::Primary => Direction::Upstream,
			Self::Secondary => Direction::Downstream,
		}
	}
}

/// Request to open a node's wiki page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalLink {
	/// Node the link belongs to.
	pub node_id: String,
	/// Page to open.
	pub url: String,
}

impl LayoutEngine {
	/// Begin dragging `node_id` and highlight its closure in the direction the
	/// button selects.
	pub fn on_pointer_down_on_node(
		&mut self,
		node_id: &str,
		button: PointerButton,
	) -> Result<(), LayoutError> {
		self.begin_drag(node_id, button.direction())
	}

	/// Returns false when no drag is active.
	pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
		self.drag_to(x, y)
	}

	/// End the active drag, if any, and clear the highlight.
	pub fn on_pointer_up(&mut self) {
		self.end_drag();
	}

	/// Flip between simulating and paused; returns the new mode.
	pub fn on_toggle_pause(&mut self) -> Mode {
		self.toggle_pause()
	}

	/// Returns whether the grid overlay is now visible.
	pub fn on_toggle_grid_snap(&mut self, enabled: bool) -> bool {
		self.set_grid_snap(enabled);
		self.grid_visible()
	}

	/// The wiki link of `node_id`, if it has one.
	pub fn on_activate_node(&self, node_id: &str) -> Option<ExternalLink> {
		let Some(item) = self.graph().get(node_id) else {
			warn!("activated unknown node `{node_id}`");
			return None;
		};
		item.wiki_link.as_ref().map(|url| ExternalLink {
			node_id: item.id.clone(),
			url: url.clone(),
		})
	}
}
