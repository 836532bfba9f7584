//! Animated tile tone overlays: fade state, ripple clock, visuals and the per-tick
//! reconciler that keeps them in step with the map's tone registry.
pub mod clock;
pub mod color_tone;
pub mod fade;
pub mod reconcile;
pub mod settings;
pub mod visual;

use bevy::prelude::*;

use crate::core::system::system_order::TileToneSet;

pub use clock::{AnimationClock, RIPPLE_PERIOD};
pub use fade::{FadePhase, FadeState};
pub use reconcile::{reconcile_tile_tones, OverlaySession, OverlayStats};
pub use settings::OverlaySettings;
pub use visual::{OverlayOpacity, RippleLayer, ShadowLayer, TileToneVisual};

/// Animate + reconcile systems and the resources they share.
///
/// Inserts [`OverlaySettings`] only when the app does not already carry one.
pub struct TileToneRenderPlugin;

impl Plugin for TileToneRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlaySettings>()
            .init_resource::<AnimationClock>()
            .init_resource::<OverlaySession>()
            .add_systems(
                Update,
                visual::animate_tile_tone_visuals.in_set(TileToneSet::Animate),
            )
            .add_systems(
                Update,
                reconcile_tile_tones.in_set(TileToneSet::Reconcile),
            );
    }
}
