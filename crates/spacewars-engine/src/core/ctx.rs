use crate::coords::Extent;
use crate::input::InputState;
use crate::time::FrameTime;

use super::platform::Gfx;

/// Context handed to [`Scene::init`](super::Scene::init).
pub struct SceneCtx<'a, G: Gfx> {
    /// Graphics backend used to load or create the scene's textures.
    pub gfx: &'a mut G,

    /// Window size in logical pixels.
    pub window: Extent,
}

/// Per-frame context handed to [`Scene::update`](super::Scene::update).
pub struct FrameCtx<'a> {
    pub time: FrameTime,

    /// Held-key state after this frame's event drain.
    pub input: &'a InputState,

    /// Window size in logical pixels.
    pub window: Extent,
}
