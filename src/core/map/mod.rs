pub mod geometry;
pub mod tile_map;

pub use geometry::MapGeometry;
pub use tile_map::TileMap;
