//! Errors raised while loading recipe data and walking the dependency graph.

/// Fatal failure to turn raw recipe data into items.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	/// The payload is not valid recipe JSON.
	#[error("failed to parse recipe data: {0}")]
	Parse(#[from] serde_json::Error),

	/// Two records share an id.
	#[error("duplicate item id `{0}`")]
	DuplicateId(String),
}

/// Failure of an algorithm over the built graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
	/// An item is, directly or indirectly, an ingredient of itself.
	#[error("dependency cycle detected at `{node}`")]
	CycleDetected {
		/// A node lying on the cycle.
		node: String,
	},

	/// The requested id is not in the node index.
	#[error("unknown item `{0}`")]
	UnknownNode(String),
}
