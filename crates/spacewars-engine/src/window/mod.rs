//! Game window.
//!
//! Owns the `winit` event loop and window and wires them to the GPU canvas.
//! The event loop is pumped from the game's own frame loop instead of owning
//! control flow.

mod runtime;

pub use runtime::WinitPlatform;

use crate::coords::Extent;

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,

    /// Inner size in logical pixels. The window is not resizable.
    pub size: Extent,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Space Wars".to_string(),
            size: Extent::new(640, 960),
        }
    }
}
