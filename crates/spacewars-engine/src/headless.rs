//! Headless platform.
//!
//! Runs the frame loop without a window or GPU: events come from a per-frame
//! script, textures are size-only records, and the clock is virtual. Used by
//! tests and by anything that wants to drive scenes deterministically.

use std::cell::Cell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::coords::{Color, Extent, Rect};
use crate::core::{AppControl, Gfx, Platform, Texture};
use crate::error::AssetError;
use crate::input::{InputEvent, InputState};

/// A recorded `draw_texture` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Source path, or `None` for textures built from pixels.
    pub source: Option<PathBuf>,
    pub extent: Extent,
    pub dst: Rect,
}

/// Size-only texture handle. Tracks how many are alive.
#[derive(Debug)]
pub struct HeadlessTexture {
    source: Option<PathBuf>,
    extent: Extent,
    live: Rc<Cell<usize>>,
}

impl Texture for HeadlessTexture {
    fn extent(&self) -> Extent {
        self.extent
    }
}

impl Drop for HeadlessTexture {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

/// Recording graphics backend.
#[derive(Debug, Default)]
pub struct HeadlessGfx {
    assets: HashMap<PathBuf, Extent>,
    live: Rc<Cell<usize>>,
    draws: Vec<DrawCall>,
    clear: Option<Color>,
    presented: usize,
    fail_present_after: Option<usize>,
}

impl HeadlessGfx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an image file `load_texture` can "decode".
    pub fn with_texture(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.assets.insert(path.into(), Extent::new(width, height));
        self
    }

    /// Makes `present` report a fatal error once `n` frames have been presented.
    pub fn fail_present_after(mut self, n: usize) -> Self {
        self.fail_present_after = Some(n);
        self
    }

    /// Shared counter of textures not yet dropped.
    pub fn live_textures(&self) -> Rc<Cell<usize>> {
        self.live.clone()
    }

    /// Draws queued since the last `clear`.
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn clear_color(&self) -> Option<Color> {
        self.clear
    }

    /// Frames successfully presented.
    pub fn presented(&self) -> usize {
        self.presented
    }

    fn texture(&self, source: Option<PathBuf>, extent: Extent) -> HeadlessTexture {
        self.live.set(self.live.get() + 1);
        HeadlessTexture {
            source,
            extent,
            live: self.live.clone(),
        }
    }
}

impl Gfx for HeadlessGfx {
    type Texture = HeadlessTexture;

    fn load_texture(&mut self, path: &Path) -> Result<HeadlessTexture, AssetError> {
        let extent = *self
            .assets
            .get(path)
            .ok_or_else(|| AssetError::NotFound(path.to_path_buf()))?;
        Ok(self.texture(Some(path.to_path_buf()), extent))
    }

    fn create_texture(&mut self, image: &image::RgbaImage) -> HeadlessTexture {
        self.texture(None, Extent::new(image.width(), image.height()))
    }

    fn clear(&mut self, color: Color) {
        self.clear = Some(color);
        self.draws.clear();
    }

    fn draw_texture(&mut self, texture: &HeadlessTexture, dst: Rect) {
        self.draws.push(DrawCall {
            source: texture.source.clone(),
            extent: texture.extent,
            dst,
        });
    }

    fn present(&mut self) -> AppControl {
        if self.fail_present_after.is_some_and(|n| self.presented >= n) {
            return AppControl::Exit;
        }
        self.presented += 1;
        AppControl::Continue
    }
}

/// Scripted platform with a virtual clock.
///
/// Each call to `push_frame` queues the events one event drain will see.
/// Once the script runs out the next drain yields `Quit`, so a loop always
/// terminates.
#[derive(Debug)]
pub struct HeadlessPlatform {
    gfx: HeadlessGfx,
    input: InputState,

    script: VecDeque<Vec<InputEvent>>,
    pending: VecDeque<InputEvent>,
    draining: bool,

    epoch: Instant,
    elapsed: Duration,
    frame_cost: Duration,
    slept: Vec<Duration>,
}

impl HeadlessPlatform {
    pub fn new(gfx: HeadlessGfx) -> Self {
        Self {
            gfx,
            input: InputState {
                focused: true,
                ..InputState::default()
            },
            script: VecDeque::new(),
            pending: VecDeque::new(),
            draining: false,
            epoch: Instant::now(),
            elapsed: Duration::ZERO,
            frame_cost: Duration::ZERO,
            slept: Vec::new(),
        }
    }

    /// Virtual time each frame takes between its start and its pacing step.
    pub fn with_frame_cost(mut self, cost: Duration) -> Self {
        self.frame_cost = cost;
        self
    }

    pub fn push_frame(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.script.push_back(events.into_iter().collect());
    }

    /// Every duration handed to `sleep`, in order.
    pub fn slept(&self) -> &[Duration] {
        &self.slept
    }

    pub fn gfx_ref(&self) -> &HeadlessGfx {
        &self.gfx
    }
}

impl Platform for HeadlessPlatform {
    type Gfx = HeadlessGfx;

    fn poll_event(&mut self) -> Option<InputEvent> {
        if !self.draining {
            // A new drain marks a new frame; the frame's work costs `frame_cost`.
            self.draining = true;
            self.elapsed += self.frame_cost;
            let next = self.script.pop_front().unwrap_or_else(|| vec![InputEvent::Quit]);
            self.pending.extend(next);
        }

        match self.pending.pop_front() {
            Some(event) => {
                self.input.apply_event(&event);
                Some(event)
            }
            None => {
                self.draining = false;
                None
            }
        }
    }

    fn input(&self) -> &InputState {
        &self.input
    }

    fn gfx(&mut self) -> &mut HeadlessGfx {
        &mut self.gfx
    }

    fn now(&self) -> Instant {
        self.epoch + self.elapsed
    }

    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.slept.push(duration);
    }
}
