//! Debug module: feature gated overlay pool logging.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
mod logging;

#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use crate::core::system::system_order::TileToneSet;

#[cfg(feature = "debug")]
pub struct DebugPlugin;
#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            logging::log_overlay_stats.after(TileToneSet::Reconcile),
        );
    }
}
