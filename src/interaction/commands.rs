use bevy::prelude::*;

use crate::core::map::TileMap;
use crate::core::system::system_order::TileToneSet;
use crate::core::tone::OPAQUE_ALPHA;

/// Scripting requests against the active map's tile tones.
///
/// Applied in [`TileToneSet::Commands`], before the overlays animate and reconcile,
/// so a request written this tick is visible to this tick's reconciliation.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileToneCommand {
    Set {
        x: i32,
        y: i32,
        r: i32,
        g: i32,
        b: i32,
        alpha: i32,
    },
    Remove {
        x: i32,
        y: i32,
    },
    Clear,
}

impl TileToneCommand {
    pub fn set(x: i32, y: i32, r: i32, g: i32, b: i32, alpha: i32) -> Self {
        TileToneCommand::Set { x, y, r, g, b, alpha }
    }

    pub fn set_opaque(x: i32, y: i32, r: i32, g: i32, b: i32) -> Self {
        Self::set(x, y, r, g, b, OPAQUE_ALPHA)
    }

    pub fn apply(&self, map: &mut TileMap) {
        match *self {
            TileToneCommand::Set { x, y, r, g, b, alpha } => {
                map.set_tile_tone(x, y, r, g, b, alpha);
            }
            TileToneCommand::Remove { x, y } => map.remove_tile_tone(x, y),
            TileToneCommand::Clear => map.clear_tile_tones(),
        }
    }
}

pub struct TileToneCommandsPlugin;

impl Plugin for TileToneCommandsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TileToneCommand>().add_systems(
            Update,
            apply_tile_tone_commands.in_set(TileToneSet::Commands),
        );
    }
}

pub fn apply_tile_tone_commands(mut events: EventReader<TileToneCommand>, mut map: ResMut<TileMap>) {
    for cmd in events.read() {
        debug!(target: "tile_tone", "command {cmd:?}");
        cmd.apply(&mut map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_mutate_registry() {
        let mut map = TileMap::default();
        TileToneCommand::set(1, 2, 10, 20, 30, 40).apply(&mut map);
        TileToneCommand::set_opaque(3, 4, 0, 0, 0).apply(&mut map);
        assert_eq!(map.tile_tones().len(), 2);
        assert_eq!(map.tile_tone(3, 4).map(|t| t.alpha()), Some(255));
        TileToneCommand::Remove { x: 1, y: 2 }.apply(&mut map);
        TileToneCommand::Remove { x: 1, y: 2 }.apply(&mut map);
        assert!(map.tile_tone(1, 2).is_none());
        TileToneCommand::Clear.apply(&mut map);
        assert!(map.tile_tones().is_empty());
    }
}
