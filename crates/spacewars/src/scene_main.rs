use std::path::PathBuf;

use serde::Deserialize;
use spacewars_engine::audio::Music;
use spacewars_engine::coords::{Color, Rect};
use spacewars_engine::core::{FrameCtx, Gfx, Scene, SceneCtx, Texture};
use spacewars_engine::text::Font;
use spacewars_engine::InitError;

use crate::player::{Player, Steering};

/// Distance of the title label from the top-left corner.
pub const LABEL_MARGIN: f32 = 10.0;

/// Looping background track.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MusicConfig {
    pub path: PathBuf,

    #[serde(default = "MusicConfig::default_volume")]
    pub volume: f32,
}

impl MusicConfig {
    pub const DEFAULT_VOLUME: f32 = 0.5;

    fn default_volume() -> f32 {
        Self::DEFAULT_VOLUME
    }
}

/// Text drawn in the top-left corner.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelConfig {
    pub font: PathBuf,

    #[serde(default = "LabelConfig::default_text")]
    pub text: String,

    /// Pixel height of the glyphs.
    #[serde(default = "LabelConfig::default_size")]
    pub size: f32,
}

impl LabelConfig {
    pub const DEFAULT_SIZE: f32 = 32.0;

    fn default_text() -> String {
        "Space Wars".to_string()
    }

    fn default_size() -> f32 {
        Self::DEFAULT_SIZE
    }
}

/// Assets and tuning for [`MainScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct MainSceneConfig {
    pub player_texture: PathBuf,
    pub player_speed: f32,
    pub music: Option<MusicConfig>,
    pub label: Option<LabelConfig>,
}

struct Label<T> {
    texture: T,
    dst: Rect,
}

/// The playfield: one steerable ship, plus an optional label and music.
pub struct MainScene<G: Gfx> {
    config: MainSceneConfig,
    player: Option<Player<G::Texture>>,
    label: Option<Label<G::Texture>>,
    music: Option<Music>,
}

impl<G: Gfx> MainScene<G> {
    pub fn new(config: MainSceneConfig) -> Self {
        Self {
            config,
            player: None,
            label: None,
            music: None,
        }
    }

    pub fn player(&self) -> Option<&Player<G::Texture>> {
        self.player.as_ref()
    }

    fn load_label(gfx: &mut G, label: &LabelConfig) -> Result<Option<Label<G::Texture>>, InitError> {
        let font = Font::load(&label.font)?;
        let image = font.rasterize(&label.text, label.size, Color::white());
        if image.width() == 0 || image.height() == 0 {
            log::warn!("label {:?} rendered empty; skipping", label.text);
            return Ok(None);
        }

        let texture = gfx.create_texture(&image);
        let extent = texture.extent();
        Ok(Some(Label {
            texture,
            dst: Rect::new(
                LABEL_MARGIN,
                LABEL_MARGIN,
                extent.width as f32,
                extent.height as f32,
            ),
        }))
    }
}

impl<G: Gfx> Scene<G> for MainScene<G> {
    fn init(&mut self, ctx: &mut SceneCtx<'_, G>) -> Result<(), InitError> {
        let texture = ctx.gfx.load_texture(&self.config.player_texture)?;
        let mut player = Player::new(texture, self.config.player_speed);
        player.place_bottom_center(ctx.window);
        log::info!(
            "player {}x{} at ({}, {})",
            player.size().width,
            player.size().height,
            player.position().x,
            player.position().y
        );
        self.player = Some(player);

        if let Some(label) = &self.config.label {
            self.label = Self::load_label(ctx.gfx, label)?;
        }

        if let Some(music) = &self.config.music {
            self.music = Some(Music::play_looped(&music.path, music.volume)?);
        }

        Ok(())
    }

    fn update(&mut self, ctx: &FrameCtx<'_>) {
        if let Some(player) = self.player.as_mut() {
            player.steer(Steering::from_input(ctx.input), ctx.time.dt, ctx.window);
        }
    }

    fn render(&mut self, gfx: &mut G) {
        if let Some(player) = &self.player {
            if let Some(texture) = player.texture() {
                gfx.draw_texture(texture, player.dst_rect());
            }
        }

        if let Some(label) = &self.label {
            gfx.draw_texture(&label.texture, label.dst);
        }
    }

    fn clean(&mut self) {
        if let Some(music) = self.music.take() {
            music.stop();
        }
        self.label = None;
        if let Some(mut player) = self.player.take() {
            player.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use spacewars_engine::coords::{Extent, Vec2};
    use spacewars_engine::core::{Game, Platform};
    use spacewars_engine::headless::{HeadlessGfx, HeadlessPlatform};
    use spacewars_engine::input::{InputEvent, Key};
    use spacewars_engine::AssetError;

    use super::*;
    use crate::config::GameConfig;

    const SHIP: &str = "assets/image/SpaceShip.png";

    fn platform() -> HeadlessPlatform {
        HeadlessPlatform::new(HeadlessGfx::new().with_texture(SHIP, 400, 200))
    }

    fn game(p: HeadlessPlatform) -> Game<HeadlessPlatform> {
        let config = GameConfig::default();
        let mut game = Game::new(config.settings());
        game.init(move |_| Ok(p), Box::new(MainScene::<HeadlessGfx>::new(config.scene())))
            .unwrap();
        game
    }

    #[test]
    fn init_places_quarter_size_ship_bottom_center() {
        let mut p = platform();
        let mut scene = MainScene::<HeadlessGfx>::new(GameConfig::default().scene());
        let mut ctx = SceneCtx {
            gfx: p.gfx(),
            window: Extent::new(640, 960),
        };
        scene.init(&mut ctx).unwrap();

        let player = scene.player().unwrap();
        assert_eq!(player.size(), Extent::new(100, 50));
        assert_eq!(player.position(), Vec2::new(270.0, 910.0));
    }

    #[test]
    fn missing_ship_texture_fails_init() {
        let mut p = HeadlessPlatform::new(HeadlessGfx::new());
        let mut scene = MainScene::<HeadlessGfx>::new(GameConfig::default().scene());
        let mut ctx = SceneCtx {
            gfx: p.gfx(),
            window: Extent::new(640, 960),
        };
        let err = scene.init(&mut ctx).unwrap_err();
        assert!(matches!(err, InitError::Asset(AssetError::NotFound(ref path)) if path == Path::new(SHIP)));
    }

    #[test]
    fn missing_font_fails_init() {
        let mut config = GameConfig::default().scene();
        config.label = Some(LabelConfig {
            font: PathBuf::from("no/such/font.ttf"),
            text: "hi".into(),
            size: 16.0,
        });
        let mut p = platform();
        let mut scene = MainScene::<HeadlessGfx>::new(config);
        let mut ctx = SceneCtx {
            gfx: p.gfx(),
            window: Extent::new(640, 960),
        };
        assert!(scene.init(&mut ctx).is_err());
        scene.clean();
        assert_eq!(p.gfx_ref().live_textures().get(), 0);
    }

    #[test]
    fn renders_ship_at_truncated_position() {
        let mut p = platform();
        p.push_frame([]);
        let mut game = game(p);
        game.run();

        let draws = game.platform().unwrap().gfx_ref().draws().to_vec();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].source.as_deref(), Some(Path::new(SHIP)));
        assert_eq!(draws[0].dst, Rect::new(270.0, 910.0, 100.0, 50.0));
    }

    #[test]
    fn held_left_moves_by_speed_times_budget() {
        let mut p = platform();
        p.push_frame([InputEvent::key_pressed(Key::ArrowLeft)]);
        p.push_frame([]);
        let mut game = game(p);
        game.run();

        // Two frames at dt = 1/60 s and 300 px/s: 10 px, drawn after each update.
        let draws = game.platform().unwrap().gfx_ref().draws().to_vec();
        assert_eq!(draws[0].dst.origin, Vec2::new(260.0, 910.0));
    }

    #[test]
    fn escape_stops_before_any_movement() {
        let mut p = platform();
        p.push_frame([
            InputEvent::key_pressed(Key::ArrowUp),
            InputEvent::key_pressed(Key::Escape),
        ]);
        let mut game = game(p);
        game.run();

        assert_eq!(game.frames(), 0);
        assert_eq!(game.platform().unwrap().gfx_ref().presented(), 0);
    }

    #[test]
    fn clean_releases_ship_texture() {
        let mut game = game(platform());
        let live = game.platform().unwrap().gfx_ref().live_textures();
        assert_eq!(live.get(), 1);

        game.clean();
        assert_eq!(live.get(), 0);
        game.clean();
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn swapping_scenes_releases_the_old_ship() {
        let mut game = game(platform());
        let live = game.platform().unwrap().gfx_ref().live_textures();

        let next = MainScene::<HeadlessGfx>::new(GameConfig::default().scene());
        game.change_scene(Some(Box::new(next))).unwrap();
        assert_eq!(live.get(), 1);
        assert!(game.running());
    }
}
