//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the platform (window,
//! renderer, input, clock) and the game's scenes, plus the [`Game`]
//! controller that owns both and runs the frame loop.

mod ctx;
mod game;
mod platform;
mod scene;

pub use ctx::{FrameCtx, SceneCtx};
pub use game::{Game, GameSettings};
pub use platform::{Gfx, Platform, Texture};
pub use scene::{AppControl, Scene};
