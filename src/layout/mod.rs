//! Spatial layout of the recipe graph and the interaction surface driving it.

pub mod config;
pub mod engine;
pub mod error;
pub(crate) mod forces;
pub mod frame;
pub mod highlight;
pub mod interaction;

pub use config::{GridConfig, LayoutConfig, LayoutVariant};
pub use engine::{LayoutEngine, Mode};
pub use error::LayoutError;
pub use frame::{EdgeFrame, Frame, NodeFrame};
pub use highlight::Highlight;
pub use interaction::{ExternalLink, PointerButton};
