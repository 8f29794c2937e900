use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use spacewars::config::CONFIG_FILE;
use spacewars::{GameConfig, MainScene};
use spacewars_engine::core::Game;
use spacewars_engine::device::GpuInit;
use spacewars_engine::logging::{LoggingConfig, init_logging};
use spacewars_engine::render::Canvas;
use spacewars_engine::window::WinitPlatform;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => {
            log::info!("shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = GameConfig::load(Path::new(CONFIG_FILE)).context("failed to load configuration")?;

    let mut game: Game<WinitPlatform> = Game::new(config.settings());
    let scene = MainScene::<Canvas>::new(config.scene());

    game.init(
        |window| WinitPlatform::open(window, GpuInit::default()),
        Box::new(scene),
    )
    .context("failed to initialize game")?;

    game.run();
    game.clean();
    Ok(())
}
