//! Cannon Range entry point
//!
//! Loads `cannon-range.json` from the working directory if present, opens the
//! native window and runs the game loop until Escape or window close.

use std::path::Path;
use std::process::ExitCode;

use cannon_range::platform::NativePlatform;
use cannon_range::{GameConfig, GameLoop};

fn main() -> ExitCode {
    env_logger::init();

    let config = GameConfig::load(Path::new(GameConfig::FILE_NAME));

    let mut platform = match NativePlatform::new(&config) {
        Ok(platform) => platform,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut game = GameLoop::new(config);
    game.run(&mut platform);

    ExitCode::SUCCESS
}
