//! Live spectator map: receives object state over UDP and draws it on a
//! zoomable map that follows the player.

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod network;
pub mod render;

pub use app::{RunState, Scheduler};
pub use config::MapConfig;
