use bevy::prelude::*;

/// Tile layout and scroll state of the active map.
///
/// Map-screen space has its origin at the top-left corner of the view with y growing
/// downward; [`MapGeometry::screen_to_world`] turns that into Bevy world space for a
/// 2D camera centred on the view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGeometry {
    pub tile_width: f32,
    pub tile_height: f32,
    /// Map size in tiles.
    pub width: i32,
    pub height: i32,
    /// Scroll origin in tiles.
    pub display_x: f32,
    pub display_y: f32,
    pub loop_horizontal: bool,
    pub loop_vertical: bool,
    /// Visible area in tiles.
    pub screen_tiles_x: f32,
    pub screen_tiles_y: f32,
}

impl Default for MapGeometry {
    fn default() -> Self {
        Self {
            tile_width: 48.0,
            tile_height: 48.0,
            width: 17,
            height: 13,
            display_x: 0.0,
            display_y: 0.0,
            loop_horizontal: false,
            loop_vertical: false,
            screen_tiles_x: 17.0,
            screen_tiles_y: 13.0,
        }
    }
}

impl MapGeometry {
    /// Tile x relative to the scroll origin, wrapped onto the near side on looping maps.
    pub fn adjust_x(&self, x: f32) -> f32 {
        if self.loop_horizontal
            && x < self.display_x - (self.width as f32 - self.screen_tiles_x) / 2.0
        {
            x - self.display_x + self.width as f32
        } else {
            x - self.display_x
        }
    }

    pub fn adjust_y(&self, y: f32) -> f32 {
        if self.loop_vertical
            && y < self.display_y - (self.height as f32 - self.screen_tiles_y) / 2.0
        {
            y - self.display_y + self.height as f32
        } else {
            y - self.display_y
        }
    }

    #[inline]
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(
            self.screen_tiles_x * self.tile_width,
            self.screen_tiles_y * self.tile_height,
        )
    }

    /// Map-screen pixel position of a point inside tile `(x, y)`; `anchor` 0.5 is the centre.
    pub fn tile_to_screen(&self, x: i32, y: i32, anchor: Vec2) -> Vec2 {
        Vec2::new(
            (self.adjust_x(x as f32) + anchor.x) * self.tile_width,
            (self.adjust_y(y as f32) + anchor.y) * self.tile_height,
        )
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let half = self.screen_size() * 0.5;
        Vec2::new(screen.x - half.x, half.y - screen.y)
    }

    /// World-space centre of tile `(x, y)` after scroll and wrap adjustment.
    pub fn tile_center_world(&self, x: i32, y: i32) -> Vec2 {
        self.screen_to_world(self.tile_to_screen(x, y, Vec2::splat(0.5)))
    }
}
