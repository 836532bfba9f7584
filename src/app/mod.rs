pub mod demo;
pub mod game;
