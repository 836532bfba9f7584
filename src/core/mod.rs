pub mod config;
pub mod map;
pub mod system;
pub mod tone;
