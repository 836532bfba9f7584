use bevy::prelude::*;

use crate::core::config::ToneOverlayConfig;

/// Overlay options resolved once at startup. Nothing changes them afterwards.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySettings {
    /// Draw the white base plate under each tinted tile.
    pub show_base_tone: bool,
    /// Frames for a complete fade in or out, at least 1.
    pub fading_duration: u32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self::from_config(&ToneOverlayConfig::default())
    }
}

impl OverlaySettings {
    pub fn from_config(cfg: &ToneOverlayConfig) -> Self {
        Self {
            show_base_tone: cfg.show_base_tone.is_on(),
            fading_duration: cfg.fading_duration(),
        }
    }
}
