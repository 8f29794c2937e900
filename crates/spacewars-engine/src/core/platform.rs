use std::path::Path;
use std::time::{Duration, Instant};

use crate::coords::{Color, Extent, Rect};
use crate::error::AssetError;
use crate::input::{InputEvent, InputState};

use super::scene::AppControl;

/// A drawable image owned by whoever loaded it.
///
/// Dropping the value releases the backend resource.
pub trait Texture {
    /// Native pixel size of the source image.
    fn extent(&self) -> Extent;
}

/// 2D graphics backend: texture loading plus textured-quad drawing.
///
/// A frame is `clear`, any number of `draw_texture` calls, then `present`.
pub trait Gfx {
    type Texture: Texture;

    /// Decodes an image file and uploads it.
    fn load_texture(&mut self, path: &Path) -> Result<Self::Texture, AssetError>;

    /// Uploads an already decoded RGBA8 image.
    fn create_texture(&mut self, image: &image::RgbaImage) -> Self::Texture;

    fn clear(&mut self, color: Color);

    /// Draws `texture` stretched over `dst` (logical pixels).
    fn draw_texture(&mut self, texture: &Self::Texture, dst: Rect);

    /// Finishes the frame. `Exit` reports an unrecoverable backend failure.
    fn present(&mut self) -> AppControl;
}

/// Host display subsystem driven by [`Game`](super::Game).
///
/// Bundles the event source, keyboard state, graphics backend and clock so
/// the controller can run against a real window or a headless stand-in.
pub trait Platform {
    type Gfx: Gfx;

    /// Pops the next pending event, or `None` once the queue is drained.
    ///
    /// Implementations apply each returned event to [`input`](Self::input)
    /// before handing it out.
    fn poll_event(&mut self) -> Option<InputEvent>;

    fn input(&self) -> &InputState;

    fn gfx(&mut self) -> &mut Self::Gfx;

    fn now(&self) -> Instant;

    /// Blocks the loop for `duration`; the loop's only yield point.
    fn sleep(&mut self, duration: Duration);
}
