//! Central system ordering labels for the tile tone overlay.
//! Stages (per render tick, all in `Update`):
//! 1. Commands (scripting requests mutate the map's tone registry)
//! 2. Animate (existing overlays advance their fade and recompute appearance)
//! 3. Reconcile (diff registry against live overlays, spawn / fade / despawn, advance clock)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum TileToneSet {
    Commands,
    Animate,
    Reconcile,
}
