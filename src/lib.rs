pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod host;
pub mod input;
pub mod spawner;
