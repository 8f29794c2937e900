//! Space Wars: a single-screen arcade game on `spacewars-engine`.

pub mod config;
pub mod player;
pub mod scene_main;

pub use config::{ConfigError, GameConfig};
pub use player::{Player, Steering};
pub use scene_main::{MainScene, MainSceneConfig};
