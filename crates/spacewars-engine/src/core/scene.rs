use crate::error::InitError;
use crate::input::InputEvent;

use super::ctx::{FrameCtx, SceneCtx};
use super::platform::Gfx;

/// Control directive returned by the platform after presenting a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// A swappable unit of input/update/render logic: one game screen or mode.
///
/// Lifecycle, driven by [`Game`](super::Game):
/// 1. `init` once, when the scene becomes active
/// 2. per frame: `handle_event` for each drained event, then `update`, then `render`
/// 3. `clean` once, when the scene is replaced or the game shuts down
///
/// Resources acquired in `init` belong to the scene and are released in
/// `clean` (or when the scene is dropped).
pub trait Scene<G: Gfx> {
    /// Acquires the scene's assets. An error is fatal to the game.
    fn init(&mut self, ctx: &mut SceneCtx<'_, G>) -> Result<(), InitError>;

    /// Called for every event drained from the platform, including the one
    /// that ends the loop.
    fn handle_event(&mut self, event: &InputEvent) {
        let _ = event;
    }

    /// Advances the simulation by `ctx.time.dt` seconds.
    fn update(&mut self, ctx: &FrameCtx<'_>);

    /// Queues this frame's draws. The canvas is already cleared.
    fn render(&mut self, gfx: &mut G);

    /// Releases everything `init` acquired. Must tolerate a failed or missing `init`.
    fn clean(&mut self);
}
