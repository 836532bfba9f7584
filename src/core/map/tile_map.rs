use bevy::prelude::*;

use super::geometry::MapGeometry;
use crate::core::tone::{ToneId, ToneRegistry, ToneSpec};

/// The active map: geometry plus the tile tones game logic has placed on it.
///
/// A different `map_id` marks a new map session; the overlay renderer drops its
/// visuals and restarts the animation clock when it sees one.
#[derive(Resource, Debug, Clone, Default)]
pub struct TileMap {
    pub map_id: u32,
    pub geometry: MapGeometry,
    tile_tones: ToneRegistry,
}

impl TileMap {
    pub fn new(map_id: u32, geometry: MapGeometry) -> Self {
        Self {
            map_id,
            geometry,
            tile_tones: ToneRegistry::new(),
        }
    }

    pub fn set_tile_tone(&mut self, x: i32, y: i32, red: i32, green: i32, blue: i32, alpha: i32) -> ToneId {
        self.tile_tones.set_tile_tone(x, y, red, green, blue, alpha)
    }

    pub fn set_tile_tone_opaque(&mut self, x: i32, y: i32, red: i32, green: i32, blue: i32) -> ToneId {
        self.tile_tones.set_tile_tone_opaque(x, y, red, green, blue)
    }

    pub fn remove_tile_tone(&mut self, x: i32, y: i32) {
        self.tile_tones.remove_tile_tone(x, y);
    }

    pub fn tile_tone(&self, x: i32, y: i32) -> Option<&ToneSpec> {
        self.tile_tones.tile_tone(x, y)
    }

    pub fn clear_tile_tones(&mut self) {
        self.tile_tones.clear_tile_tones();
    }

    pub fn tile_tones(&self) -> &[ToneSpec] {
        self.tile_tones.tile_tones()
    }

    pub fn registry(&self) -> &ToneRegistry {
        &self.tile_tones
    }
}
