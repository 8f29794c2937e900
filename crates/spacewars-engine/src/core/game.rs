use std::time::Duration;

use crate::coords::{Color, Extent};
use crate::error::InitError;
use crate::time::FramePacer;
use crate::window::WindowConfig;

use super::ctx::{FrameCtx, SceneCtx};
use super::platform::{Gfx, Platform};
use super::scene::{AppControl, Scene};

/// Static game settings consumed by [`Game`].
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub window: WindowConfig,
    pub target_fps: u32,
    pub clear_color: Color,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            target_fps: 60,
            clear_color: Color::black(),
        }
    }
}

/// Boxed scene type for a platform's graphics backend.
type BoxedScene<P> = Box<dyn Scene<<P as Platform>::Gfx>>;

/// Game controller.
///
/// Owns the platform (window, renderer, input, clock), the active scene and
/// the run flag, and drives the cooperative frame loop. Construct it once in
/// `main` and pass it by reference; there is no global instance.
///
/// Teardown order is scene first, then platform, and runs from [`clean`]
/// or from `Drop`, whichever comes first.
///
/// [`clean`]: Game::clean
pub struct Game<P: Platform> {
    settings: GameSettings,
    // Declared before `platform` so a scene never outlives the backend
    // its textures came from.
    scene: Option<BoxedScene<P>>,
    platform: Option<P>,
    pacer: FramePacer,
    running: bool,
}

impl<P: Platform> Game<P> {
    pub fn new(settings: GameSettings) -> Self {
        let pacer = FramePacer::new(settings.target_fps);
        Self {
            settings,
            scene: None,
            platform: None,
            pacer,
            running: false,
        }
    }

    /// Opens the platform through `open` and activates `scene`.
    ///
    /// On failure the error is logged, the run flag stays cleared and
    /// everything acquired so far is released by the next `clean`/drop.
    pub fn init<F>(&mut self, open: F, scene: BoxedScene<P>) -> Result<(), InitError>
    where
        F: FnOnce(&WindowConfig) -> Result<P, InitError>,
    {
        log::info!("initializing game");

        log::info!(
            "opening window \"{}\" ({}x{})",
            self.settings.window.title,
            self.settings.window.size.width,
            self.settings.window.size.height
        );
        let platform = open(&self.settings.window).inspect_err(|e| {
            log::error!("platform initialization failed: {e}");
            self.running = false;
        })?;
        self.platform = Some(platform);

        self.pacer = FramePacer::new(self.settings.target_fps);
        log::info!(
            "target {} fps, frame budget {:?}",
            self.settings.target_fps,
            self.pacer.budget()
        );

        log::info!("initializing main scene");
        self.running = true;
        self.change_scene(Some(scene))
    }

    /// Runs frames until the run flag is cleared.
    ///
    /// Each iteration drains all pending events, checks the run flag, then
    /// updates, renders and paces. A quit drained in an iteration suppresses
    /// that iteration's update and render.
    pub fn run(&mut self) {
        if self.platform.is_none() {
            log::warn!("run called without an initialized platform");
            self.running = false;
            return;
        }

        log::info!("entering main loop");

        while self.running {
            let Some(frame_start) = self.platform.as_ref().map(P::now) else { break };

            self.handle_events();
            if !self.running {
                break;
            }

            self.update();
            self.render();

            let Some(platform) = self.platform.as_mut() else { break };
            let elapsed = platform.now().saturating_duration_since(frame_start);
            match self.pacer.finish_frame(elapsed) {
                Some(rest) => platform.sleep(rest),
                None => log::trace!("frame overran budget: {elapsed:?}"),
            }
        }

        log::info!("main loop finished after {} frames", self.pacer.frames());
    }

    /// Replaces the active scene.
    ///
    /// `None` is a no-op. Otherwise the current scene is cleaned and dropped,
    /// then `scene` is installed and initialized. A scene that fails to
    /// initialize is cleaned, not installed, and stops the game.
    pub fn change_scene(&mut self, scene: Option<BoxedScene<P>>) -> Result<(), InitError> {
        let Some(mut scene) = scene else {
            return Ok(());
        };

        if let Some(mut previous) = self.scene.take() {
            log::info!("cleaning previous scene");
            previous.clean();
        }

        let window = self.window_extent();
        let Some(platform) = self.platform.as_mut() else {
            log::error!("cannot activate a scene before the platform is open");
            self.running = false;
            return Err(InitError::NotInitialized);
        };

        let mut ctx = SceneCtx {
            gfx: platform.gfx(),
            window,
        };
        if let Err(e) = scene.init(&mut ctx) {
            log::error!("scene initialization failed: {e}");
            scene.clean();
            self.running = false;
            return Err(e);
        }

        self.scene = Some(scene);
        Ok(())
    }

    /// Releases the scene, then the platform. Safe to call repeatedly and
    /// after a failed `init`.
    pub fn clean(&mut self) {
        if let Some(mut scene) = self.scene.take() {
            log::info!("cleaning scene");
            scene.clean();
        }
        if self.platform.take().is_some() {
            log::info!("renderer and window released");
        }
        self.running = false;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn frame_budget(&self) -> Duration {
        self.pacer.budget()
    }

    /// Frames completed by `run` so far.
    pub fn frames(&self) -> u64 {
        self.pacer.frames()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// The active scene, if any.
    pub fn scene(&self) -> Option<&dyn Scene<P::Gfx>> {
        self.scene.as_deref()
    }

    pub fn platform(&self) -> Option<&P> {
        self.platform.as_ref()
    }

    pub fn platform_mut(&mut self) -> Option<&mut P> {
        self.platform.as_mut()
    }

    fn window_extent(&self) -> Extent {
        self.settings.window.size
    }

    fn handle_events(&mut self) {
        let Some(platform) = self.platform.as_mut() else {
            self.running = false;
            return;
        };

        while let Some(event) = platform.poll_event() {
            if event.is_quit_request() {
                log::info!("quit requested");
                self.running = false;
            }

            if let Some(scene) = self.scene.as_mut() {
                scene.handle_event(&event);
            }
        }
    }

    fn update(&mut self) {
        let window = self.window_extent();
        let (Some(platform), Some(scene)) = (self.platform.as_ref(), self.scene.as_mut()) else {
            return;
        };

        let ctx = FrameCtx {
            time: self.pacer.frame_time(),
            input: platform.input(),
            window,
        };
        scene.update(&ctx);
    }

    fn render(&mut self) {
        let (Some(platform), Some(scene)) = (self.platform.as_mut(), self.scene.as_mut()) else {
            return;
        };

        let gfx = platform.gfx();
        gfx.clear(self.settings.clear_color);
        scene.render(gfx);

        if gfx.present() == AppControl::Exit {
            log::error!("renderer reported a fatal error; stopping");
            self.running = false;
        }
    }
}

impl<P: Platform> Drop for Game<P> {
    fn drop(&mut self) {
        self.clean();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::coords::Rect;
    use crate::headless::{HeadlessGfx, HeadlessPlatform};
    use crate::input::{InputEvent, Key};

    type Log = Rc<RefCell<Vec<String>>>;

    /// Scene that records its lifecycle calls into a shared log.
    struct Probe {
        name: &'static str,
        log: Log,
        fail_init: bool,
        texture: Option<<HeadlessGfx as Gfx>::Texture>,
    }

    impl Probe {
        fn boxed(name: &'static str, log: &Log) -> Box<Self> {
            Box::new(Self {
                name,
                log: log.clone(),
                fail_init: false,
                texture: None,
            })
        }

        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{what}", self.name));
        }
    }

    impl Scene<HeadlessGfx> for Probe {
        fn init(&mut self, ctx: &mut SceneCtx<'_, HeadlessGfx>) -> Result<(), InitError> {
            self.record("init");
            if self.fail_init {
                return Err(ctx.gfx.load_texture(Path::new("missing.png")).unwrap_err().into());
            }
            self.texture = Some(ctx.gfx.load_texture(Path::new("probe.png"))?);
            Ok(())
        }

        fn handle_event(&mut self, event: &InputEvent) {
            if event.is_quit_request() {
                self.record("quit-event");
            }
        }

        fn update(&mut self, ctx: &FrameCtx<'_>) {
            self.record(&format!("update@{}", ctx.time.frame_index));
        }

        fn render(&mut self, gfx: &mut HeadlessGfx) {
            self.record("render");
            if let Some(t) = &self.texture {
                gfx.draw_texture(t, Rect::new(0.0, 0.0, 1.0, 1.0));
            }
        }

        fn clean(&mut self) {
            self.record("clean");
            self.texture = None;
        }
    }

    fn platform() -> HeadlessPlatform {
        HeadlessPlatform::new(HeadlessGfx::new().with_texture("probe.png", 8, 8))
    }

    fn started(log: &Log, p: HeadlessPlatform) -> Game<HeadlessPlatform> {
        let mut game = Game::new(GameSettings::default());
        game.init(move |_| Ok(p), Probe::boxed("main", log)).unwrap();
        game
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    #[test]
    fn init_activates_scene_and_sets_running() {
        let log = Log::default();
        let game = started(&log, platform());
        assert!(game.running());
        assert!(game.scene().is_some());
        assert_eq!(entries(&log), ["main:init"]);
        assert_eq!(game.frame_budget(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn failed_platform_open_leaves_game_stopped() {
        let log = Log::default();
        let mut game: Game<HeadlessPlatform> = Game::new(GameSettings::default());
        let err = game
            .init(|_| Err(InitError::WindowNotCreated), Probe::boxed("main", &log))
            .unwrap_err();
        assert!(matches!(err, InitError::WindowNotCreated));
        assert!(!game.running());
        assert!(game.scene().is_none());
        // The scene was never initialized, so it is never cleaned either.
        assert!(entries(&log).is_empty());

        game.run();
        assert_eq!(game.frames(), 0);
    }

    #[test]
    fn failed_scene_init_is_fatal_and_cleaned() {
        let log = Log::default();
        let mut game = Game::new(GameSettings::default());
        let mut scene = Probe::boxed("main", &log);
        scene.fail_init = true;

        let err = game.init(|_| Ok(platform()), scene).unwrap_err();
        assert!(matches!(err, InitError::Asset(_)));
        assert!(!game.running());
        assert!(game.scene().is_none());
        assert_eq!(entries(&log), ["main:init", "main:clean"]);
    }

    #[test]
    fn change_scene_none_is_noop() {
        let log = Log::default();
        let mut game = started(&log, platform());
        game.change_scene(None).unwrap();
        assert!(game.scene().is_some());
        assert!(game.running());
        assert_eq!(entries(&log), ["main:init"]);
    }

    #[test]
    fn change_scene_cleans_old_exactly_once_before_new_init() {
        let log = Log::default();
        let mut game = started(&log, platform());
        game.change_scene(Some(Probe::boxed("next", &log))).unwrap();
        assert_eq!(entries(&log), ["main:init", "main:clean", "next:init"]);

        game.clean();
        assert_eq!(entries(&log), ["main:init", "main:clean", "next:init", "next:clean"]);
    }

    #[test]
    fn change_scene_before_init_is_rejected() {
        let log = Log::default();
        let mut game: Game<HeadlessPlatform> = Game::new(GameSettings::default());
        let err = game.change_scene(Some(Probe::boxed("early", &log))).unwrap_err();
        assert!(matches!(err, InitError::NotInitialized));
        assert!(game.scene().is_none());
    }

    #[test]
    fn clean_is_idempotent() {
        let log = Log::default();
        let mut game = started(&log, platform());
        game.clean();
        game.clean();
        assert!(game.platform().is_none());
        assert_eq!(entries(&log), ["main:init", "main:clean"]);

        // Drop after clean does nothing further.
        drop(game);
        assert_eq!(entries(&log).len(), 2);
    }

    #[test]
    fn clean_without_init_is_safe() {
        let mut game: Game<HeadlessPlatform> = Game::new(GameSettings::default());
        game.clean();
        assert!(!game.running());
    }

    #[test]
    fn quit_on_first_frame_suppresses_update_and_render() {
        let log = Log::default();
        let mut p = platform();
        p.push_frame([InputEvent::Quit]);
        let mut game = started(&log, p);

        game.run();

        assert_eq!(entries(&log), ["main:init", "main:quit-event"]);
        assert_eq!(game.frames(), 0);
        assert!(!game.running());
    }

    #[test]
    fn escape_in_third_frame_stops_after_two_full_frames() {
        let log = Log::default();
        let mut p = platform();
        p.push_frame([]);
        p.push_frame([InputEvent::key_pressed(Key::Space)]);
        p.push_frame([InputEvent::key_pressed(Key::Escape)]);
        let mut game = started(&log, p);

        game.run();

        assert_eq!(
            entries(&log),
            [
                "main:init",
                "main:update@0",
                "main:render",
                "main:update@1",
                "main:render",
                "main:quit-event",
            ]
        );
        assert_eq!(game.frames(), 2);
        let gfx = game.platform().unwrap().gfx_ref();
        assert_eq!(gfx.presented(), 2);
    }

    #[test]
    fn early_frames_sleep_the_rest_of_the_budget() {
        let log = Log::default();
        let mut p = platform().with_frame_cost(Duration::from_millis(5));
        p.push_frame([]);
        p.push_frame([]);
        let mut game = started(&log, p);

        game.run();

        let budget = game.frame_budget();
        let slept = game.platform().unwrap().slept().to_vec();
        assert_eq!(slept, vec![budget - Duration::from_millis(5); 2]);
    }

    #[test]
    fn slow_frames_do_not_sleep() {
        let log = Log::default();
        let mut p = platform().with_frame_cost(Duration::from_millis(30));
        p.push_frame([]);
        let mut game = started(&log, p);

        game.run();

        assert!(game.platform().unwrap().slept().is_empty());
        assert_eq!(game.frames(), 1);
    }

    #[test]
    fn fatal_present_stops_the_loop() {
        let log = Log::default();
        let mut p = HeadlessPlatform::new(
            HeadlessGfx::new()
                .with_texture("probe.png", 8, 8)
                .fail_present_after(1),
        );
        for _ in 0..5 {
            p.push_frame([]);
        }
        let mut game = started(&log, p);

        game.run();

        assert!(!game.running());
        assert_eq!(game.frames(), 2);
    }

    #[test]
    fn scene_textures_are_released_before_platform() {
        let log = Log::default();
        let mut game = started(&log, platform());
        let live = game.platform().unwrap().gfx_ref().live_textures();
        assert_eq!(live.get(), 1);

        game.clean();
        assert_eq!(live.get(), 0);
    }
}
