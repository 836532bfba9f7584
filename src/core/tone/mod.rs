//! Tile tone data model: immutable specs and the per-map registry that owns them.
pub mod registry;
pub mod spec;

pub use registry::ToneRegistry;
pub use spec::{ToneId, ToneSpec, OPAQUE_ALPHA};
