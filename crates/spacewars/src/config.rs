use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use spacewars_engine::coords::{Color, Extent};
use spacewars_engine::core::GameSettings;
use spacewars_engine::window::WindowConfig;
use thiserror::Error;

use crate::scene_main::{LabelConfig, MainSceneConfig, MusicConfig};

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "spacewars.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Game configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,

    /// Straight-alpha RGBA, 0.0..=1.0 per channel.
    pub clear_color: [f32; 4],

    pub player: PlayerConfig,
    pub music: Option<MusicConfig>,
    pub label: Option<LabelConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub texture: PathBuf,

    /// Pixels per second along each axis.
    pub speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Space Wars".to_string(),
            window_width: 640,
            window_height: 960,
            target_fps: 60,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            player: PlayerConfig::default(),
            music: None,
            label: None,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            texture: PathBuf::from("assets/image/SpaceShip.png"),
            speed: 300.0,
        }
    }
}

impl GameConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no {} found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn settings(&self) -> GameSettings {
        GameSettings {
            window: WindowConfig {
                title: self.title.clone(),
                size: Extent::new(self.window_width, self.window_height),
            },
            target_fps: self.target_fps,
            clear_color: Color::from(self.clear_color),
        }
    }

    pub fn scene(&self) -> MainSceneConfig {
        MainSceneConfig {
            player_texture: self.player.texture.clone(),
            player_speed: self.player.speed,
            music: self.music.clone(),
            label: self.label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_game() {
        let c = GameConfig::default();
        let s = c.settings();
        assert_eq!(s.window.title, "Space Wars");
        assert_eq!(s.window.size, Extent::new(640, 960));
        assert_eq!(s.target_fps, 60);
        assert_eq!(s.clear_color, Color::black());

        let scene = c.scene();
        assert_eq!(scene.player_texture, Path::new("assets/image/SpaceShip.png"));
        assert_eq!(scene.player_speed, 300.0);
        assert!(scene.music.is_none());
        assert!(scene.label.is_none());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let c = GameConfig::from_toml(
            r#"
            target_fps = 30

            [player]
            speed = 120.0

            [music]
            path = "assets/music/theme.ogg"

            [label]
            font = "assets/font/mono.ttf"
            "#,
        )
        .unwrap();

        assert_eq!(c.target_fps, 30);
        assert_eq!(c.window_width, 640);
        assert_eq!(c.player.speed, 120.0);
        assert_eq!(c.player.texture, PathBuf::from("assets/image/SpaceShip.png"));

        let music = c.music.unwrap();
        assert_eq!(music.path, PathBuf::from("assets/music/theme.ogg"));
        assert_eq!(music.volume, MusicConfig::DEFAULT_VOLUME);

        let label = c.label.unwrap();
        assert_eq!(label.text, "Space Wars");
        assert_eq!(label.size, LabelConfig::DEFAULT_SIZE);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(GameConfig::from_toml("windw_width = 10").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let c = GameConfig::load(Path::new("definitely/not/here/spacewars.toml")).unwrap();
        assert_eq!(c, GameConfig::default());
    }
}
