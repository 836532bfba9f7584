pub mod tile_tone;
