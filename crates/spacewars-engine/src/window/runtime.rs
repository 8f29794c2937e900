use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::core::Platform;
use crate::device::{Gpu, GpuInit};
use crate::error::InitError;
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputState};
use crate::render::Canvas;

use super::WindowConfig;

/// Upper bound on startup pumps while waiting for `resumed`.
const STARTUP_PUMPS: usize = 200;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(5);

/// Desktop platform: one non-resizable winit window with a wgpu canvas.
///
/// Fields drop in declaration order: the canvas (device and surface) goes
/// first, then the window, then the event loop.
pub struct WinitPlatform {
    canvas: Canvas,
    window: Arc<Window>,
    handler: WindowHandler,
    input: InputState,
    event_loop: EventLoop<()>,

    /// Set once the event loop has been pumped for the current drain.
    pumped: bool,
}

impl WinitPlatform {
    /// Creates the event loop, the window and the GPU canvas.
    pub fn open(config: &WindowConfig, gpu_init: GpuInit) -> Result<Self, InitError> {
        let mut event_loop = EventLoop::new()?;

        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(
                f64::from(config.size.width),
                f64::from(config.size.height),
            ))
            .with_resizable(false);

        let mut handler = WindowHandler::new(attrs);

        // The window can only be created from inside `resumed`.
        for _ in 0..STARTUP_PUMPS {
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut handler);
            if let Some(err) = handler.create_error.take() {
                return Err(err.into());
            }
            if handler.window.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                log::error!("event loop exited during startup (code {code})");
                break;
            }
        }

        let window = handler.window.clone().ok_or(InitError::WindowNotCreated)?;
        log::info!(
            "window created: {}x{} physical, scale {}",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), gpu_init))?;
        log::info!("renderer ready: {:?}", gpu.surface_format());

        // Startup may already have produced focus/resize events.
        handler.resized = None;

        Ok(Self {
            canvas: Canvas::new(window.clone(), gpu),
            window,
            handler,
            input: InputState {
                focused: true,
                ..InputState::default()
            },
            event_loop,
            pumped: false,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);

        if let PumpStatus::Exit(code) = status {
            log::info!("event loop exited (code {code})");
            self.handler.events.push_back(InputEvent::Quit);
        }

        if let Some(size) = self.handler.resized.take() {
            self.canvas.resize(size);
        }
    }
}

impl Platform for WinitPlatform {
    type Gfx = Canvas;

    fn poll_event(&mut self) -> Option<InputEvent> {
        if !self.pumped {
            self.pumped = true;
            self.pump();
        }

        match self.handler.events.pop_front() {
            Some(event) => {
                self.input.apply_event(&event);
                Some(event)
            }
            None => {
                self.pumped = false;
                None
            }
        }
    }

    fn input(&self) -> &InputState {
        &self.input
    }

    fn gfx(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// winit callback sink. Buffers translated events until the game drains them.
struct WindowHandler {
    attrs: Option<WindowAttributes>,
    window: Option<Arc<Window>>,
    create_error: Option<OsError>,

    events: VecDeque<InputEvent>,
    resized: Option<PhysicalSize<u32>>,
}

impl WindowHandler {
    fn new(attrs: WindowAttributes) -> Self {
        Self {
            attrs: Some(attrs),
            window: None,
            create_error: None,
            events: VecDeque::new(),
            resized: None,
        }
    }
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(attrs) = self.attrs.take() else {
            return;
        };

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(err) => {
                log::error!("failed to create window: {err}");
                self.create_error = Some(err);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::Resized(size) => self.resized = Some(*size),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    self.resized = Some(window.inner_size());
                }
            }
            _ => {}
        }

        if let Some(ev) = translate_window_event(&event) {
            self.events.push_back(ev);
        }
    }
}
