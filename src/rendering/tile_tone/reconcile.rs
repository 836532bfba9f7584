use bevy::prelude::*;
use std::collections::HashSet;

use super::clock::AnimationClock;
use super::fade::FadeState;
use super::settings::OverlaySettings;
use super::visual::{spawn_overlay_visual, TileToneVisual};
use crate::core::map::TileMap;
use crate::core::tone::{ToneId, ToneRegistry, ToneSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PooledOverlay {
    tone: ToneId,
    entity: Entity,
}

/// Counters describing the live overlay pool after the latest pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStats {
    pub live: usize,
    pub fading_out: usize,
    pub spawned_total: u64,
    pub despawned_total: u64,
}

/// Overlay visuals currently attached for the active map session, keyed by tone identity.
///
/// A tone that was removed and set again at the same tile gets a new id, so the old
/// overlay fades out while the new one fades in on top of it.
#[derive(Resource, Debug, Default)]
pub struct OverlaySession {
    pool: Vec<PooledOverlay>,
    map_id: Option<u32>,
    stats: OverlayStats,
}

impl OverlaySession {
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn map_id(&self) -> Option<u32> {
        self.map_id
    }

    pub fn stats(&self) -> OverlayStats {
        self.stats
    }

    /// Attached overlay entities in attach order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.pool.iter().map(|p| p.entity)
    }

    /// Tones bound to any attached overlay, fading or not.
    pub fn live_tones(&self) -> HashSet<ToneId> {
        self.pool.iter().map(|p| p.tone).collect()
    }

    /// Registry tones with no overlay yet.
    pub fn added_tones<'a>(&self, tones: &'a [ToneSpec]) -> Vec<&'a ToneSpec> {
        let live = self.live_tones();
        tones.iter().filter(|t| !live.contains(&t.id())).collect()
    }

    /// Overlays whose tone is no longer in the registry.
    pub fn removed_overlays(&self, registry: &ToneRegistry) -> Vec<Entity> {
        let current: HashSet<ToneId> = registry.tile_tones().iter().map(|t| t.id()).collect();
        self.pool
            .iter()
            .filter(|p| !current.contains(&p.tone))
            .map(|p| p.entity)
            .collect()
    }

    fn attach(&mut self, tone: ToneId, entity: Entity) {
        self.pool.push(PooledOverlay { tone, entity });
        self.stats.spawned_total += 1;
    }

    fn detach(&mut self, entity: Entity) -> bool {
        let before = self.pool.len();
        self.pool.retain(|p| p.entity != entity);
        let removed = before != self.pool.len();
        if removed {
            self.stats.despawned_total += 1;
        }
        removed
    }

    fn drain(&mut self) -> Vec<Entity> {
        self.stats.despawned_total += self.pool.len() as u64;
        self.pool.drain(..).map(|p| p.entity).collect()
    }
}

/// One reconciliation pass:
/// fade out overlays whose tone left the registry, drop the ones fully faded out,
/// spawn overlays for new tones, then advance the animation clock.
pub fn reconcile_tile_tones(
    mut commands: Commands,
    map: Res<TileMap>,
    settings: Res<OverlaySettings>,
    mut clock: ResMut<AnimationClock>,
    mut session: ResMut<OverlaySession>,
    mut q_fade: Query<&mut FadeState, With<TileToneVisual>>,
) {
    if session.map_id != Some(map.map_id) {
        let stale = session.drain();
        if let Some(prev) = session.map_id {
            info!(
                target: "tile_tone",
                "map session {} -> {}: dropping {} overlays, clock restarted",
                prev,
                map.map_id,
                stale.len()
            );
        }
        for entity in stale {
            commands.entity(entity).despawn();
        }
        clock.reset();
        session.map_id = Some(map.map_id);
    }

    for entity in session.removed_overlays(map.registry()) {
        if let Ok(mut fade) = q_fade.get_mut(entity) {
            fade.fade_out();
        }
    }

    let faded_out: Vec<Entity> = session
        .entities()
        .filter(|e| q_fade.get(*e).map_or(true, |f| f.is_faded_out()))
        .collect();
    for entity in faded_out {
        if session.detach(entity) {
            trace!(target: "tile_tone", "despawn overlay {entity}");
            commands.entity(entity).despawn();
        }
    }

    for spec in session.added_tones(map.tile_tones()) {
        let entity = spawn_overlay_visual(&mut commands, spec, &settings, &map.geometry, &clock);
        trace!(
            target: "tile_tone",
            "spawn overlay {entity} for tile ({}, {})",
            spec.x(),
            spec.y()
        );
        session.attach(spec.id(), entity);
    }

    clock.tick();

    let fading_out = session
        .entities()
        .filter(|e| q_fade.get(*e).is_ok_and(|f| f.is_fading_out()))
        .count();
    let live = session.len();
    session.stats.live = live;
    session.stats.fading_out = fading_out;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(pairs: &[(ToneId, u32)]) -> OverlaySession {
        let mut s = OverlaySession::default();
        for (tone, e) in pairs {
            s.attach(*tone, Entity::from_raw(*e));
        }
        s
    }

    #[test]
    fn added_are_registry_tones_without_overlay() {
        let mut reg = ToneRegistry::new();
        let a = reg.set_tile_tone(0, 0, 1, 1, 1, 255);
        let b = reg.set_tile_tone(1, 1, 1, 1, 1, 255);
        let s = session_with(&[(a, 10)]);
        let added: Vec<ToneId> = s.added_tones(reg.tile_tones()).iter().map(|t| t.id()).collect();
        assert_eq!(added, vec![b]);
        assert!(s.removed_overlays(&reg).is_empty());
    }

    #[test]
    fn removed_are_overlays_without_registry_tone() {
        let mut reg = ToneRegistry::new();
        let a = reg.set_tile_tone(0, 0, 1, 1, 1, 255);
        let b = reg.set_tile_tone(1, 1, 1, 1, 1, 255);
        let s = session_with(&[(a, 10), (b, 11)]);
        reg.remove_tile_tone(0, 0);
        assert_eq!(s.removed_overlays(&reg), vec![Entity::from_raw(10)]);
    }

    #[test]
    fn readded_coordinate_is_new_identity() {
        let mut reg = ToneRegistry::new();
        let old = reg.set_tile_tone(2, 2, 9, 9, 9, 255);
        let s = session_with(&[(old, 5)]);
        reg.remove_tile_tone(2, 2);
        let new = reg.set_tile_tone(2, 2, 9, 9, 9, 255);
        assert_eq!(s.removed_overlays(&reg), vec![Entity::from_raw(5)]);
        let added: Vec<ToneId> = s.added_tones(reg.tile_tones()).iter().map(|t| t.id()).collect();
        assert_eq!(added, vec![new]);
    }

    #[test]
    fn drain_counts_every_overlay() {
        let mut s = session_with(&[(ToneId(0), 1), (ToneId(1), 2), (ToneId(2), 3)]);
        assert!(s.detach(Entity::from_raw(2)));
        assert_eq!(s.drain().len(), 2);
        assert!(s.is_empty());
        let stats = s.stats();
        assert_eq!((stats.spawned_total, stats.despawned_total), (3, 3));
    }

    #[test]
    fn detach_counts_once() {
        let mut s = session_with(&[(ToneId(0), 1), (ToneId(1), 2)]);
        assert!(s.detach(Entity::from_raw(1)));
        assert!(!s.detach(Entity::from_raw(1)));
        assert_eq!(s.len(), 1);
        assert_eq!(s.stats().spawned_total, 2);
        assert_eq!(s.stats().despawned_total, 1);
        assert_eq!(s.entities().collect::<Vec<_>>(), vec![Entity::from_raw(2)]);
    }
}
