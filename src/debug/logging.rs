use bevy::prelude::*;

use crate::rendering::tile_tone::{AnimationClock, OverlaySession, OverlayStats};

/// Emits the overlay pool counters whenever they change.
pub fn log_overlay_stats(
    session: Res<OverlaySession>,
    clock: Res<AnimationClock>,
    mut last: Local<OverlayStats>,
) {
    let stats = session.stats();
    if stats == *last {
        return;
    }
    debug!(
        target: "tile_tone",
        "overlays live={} fading_out={} spawned={} despawned={} clock={}",
        stats.live,
        stats.fading_out,
        stats.spawned_total,
        stats.despawned_total,
        clock.count()
    );
    *last = stats;
}
