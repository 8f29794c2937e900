//! Space Wars engine crate.
//!
//! This crate owns the platform, GPU, audio and timing pieces that the game
//! crate builds its scenes on. The [`core`] module holds the scene contract
//! and the [`core::Game`] controller that drives the frame loop.

pub mod audio;
pub mod coords;
pub mod core;
pub mod device;
pub mod error;
pub mod headless;
pub mod input;
pub mod logging;
pub mod render;
pub mod text;
pub mod time;
pub mod window;

pub use error::{AssetError, InitError};
