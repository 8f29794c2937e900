use spacewars_engine::coords::{Extent, Rect, Vec2};
use spacewars_engine::core::Texture;
use spacewars_engine::input::{InputState, Key};

/// The ship sprite is drawn at a quarter of its source resolution.
pub const SCALE_DIVISOR: u32 = 4;

/// Direction keys held this frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Steering {
    /// Arrows and WASD.
    pub fn from_input(input: &InputState) -> Self {
        Self {
            left: input.any_down(&[Key::ArrowLeft, Key::A]),
            right: input.any_down(&[Key::ArrowRight, Key::D]),
            up: input.any_down(&[Key::ArrowUp, Key::W]),
            down: input.any_down(&[Key::ArrowDown, Key::S]),
        }
    }

    pub fn any(self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// The player's ship.
///
/// Owns its texture; `release` (or drop) frees it. Position is the top-left
/// corner in logical pixels.
#[derive(Debug)]
pub struct Player<T> {
    texture: Option<T>,
    position: Vec2,
    size: Extent,
    speed: f32,
}

impl<T: Texture> Player<T> {
    /// Sizes the player from `texture` (divided by [`SCALE_DIVISOR`]) at the origin.
    pub fn new(texture: T, speed: f32) -> Self {
        let size = texture.extent().div(SCALE_DIVISOR);
        Self {
            texture: Some(texture),
            position: Vec2::zero(),
            size,
            speed,
        }
    }

    /// Centers horizontally and sits flush with the bottom edge.
    ///
    /// Integer arithmetic: `x = W/2 - w/2`, `y = H - h`.
    pub fn place_bottom_center(&mut self, window: Extent) {
        let (ww, wh) = (i64::from(window.width), i64::from(window.height));
        let (w, h) = (i64::from(self.size.width), i64::from(self.size.height));
        self.position = Vec2::new((ww / 2 - w / 2) as f32, (wh - h) as f32);
    }

    /// Moves `speed * dt` along each held axis, then clamps to `window`.
    ///
    /// Axes are independent, so diagonals are faster than straight moves.
    /// Nothing is clamped on frames without steering.
    pub fn steer(&mut self, steering: Steering, dt: f32, window: Extent) {
        if !steering.any() {
            return;
        }

        let step = self.speed * dt;
        if steering.left {
            self.position.x -= step;
        }
        if steering.right {
            self.position.x += step;
        }
        if steering.up {
            self.position.y -= step;
        }
        if steering.down {
            self.position.y += step;
        }

        let max_x = window.width as f32 - self.size.width as f32;
        let max_y = window.height as f32 - self.size.height as f32;
        // min before max: a sprite larger than the window pins to 0.
        self.position.x = self.position.x.min(max_x).max(0.0);
        self.position.y = self.position.y.min(max_y).max(0.0);
    }

    /// Destination rectangle at the truncated integer position.
    pub fn dst_rect(&self) -> Rect {
        Rect::new(
            self.position.x.trunc(),
            self.position.y.trunc(),
            self.size.width as f32,
            self.size.height as f32,
        )
    }

    pub fn texture(&self) -> Option<&T> {
        self.texture.as_ref()
    }

    /// Drops the texture. The player stays in place but no longer draws.
    pub fn release(&mut self) {
        self.texture = None;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn size(&self) -> Extent {
        self.size
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}
