pub mod app;
pub mod core;
pub mod debug;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::TileTonerPlugin;
pub use crate::core::config::TileTonerConfig;
pub use crate::core::map::{MapGeometry, TileMap};
pub use crate::core::tone::{ToneId, ToneRegistry, ToneSpec};
pub use crate::interaction::commands::TileToneCommand;
pub use crate::rendering::tile_tone::{AnimationClock, FadePhase, FadeState, OverlaySession, OverlaySettings};
