//! Errors raised by layout requests.

use crate::recipe::GraphError;

/// Why the engine refused a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
	/// No node with this id is laid out.
	#[error("unknown node `{0}`")]
	UnknownNode(String),

	/// Another node is already being dragged.
	#[error("node `{0}` is already being dragged")]
	DragInProgress(String),

	/// The graph walk behind the request failed.
	#[error(transparent)]
	Graph(#[from] GraphError),
}
