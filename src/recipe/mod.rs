//! Recipe records and the dependency graph derived from them.

pub mod classify;
pub mod closure;
pub mod error;
pub mod graph;
pub mod item;
pub mod level;

pub use classify::{Classification, RawPolicy, classify};
pub use closure::{Direction, Reach, Visit, collect, downstream, upstream};
pub use error::{GraphError, LoadError};
pub use graph::{Edge, NodeIdx, RecipeGraph};
pub use item::{Ingredient, Item, Recipe, parse_items};
pub use level::{Levels, assign_levels};
