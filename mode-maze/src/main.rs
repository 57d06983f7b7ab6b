use maze_core::app::{App, AppConfig};
use maze_crossterm::CrosstermDriver;

use mode_maze_lib::{MazeModel, UI_HEIGHT, UI_WIDTH, load_from_env};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; redirect it (2>log.txt) to keep the screen clean.
    env_logger::init();

    let (config, path) = load_from_env();
    if let Some(path) = path {
        log::debug!("config file: {}", path.display());
    }
    let driver = CrosstermDriver::new().with_tick(config.tick());
    let model = MazeModel::new(config);
    let mut app = App::new(AppConfig {
        model,
        driver,
        width: UI_WIDTH,
        height: UI_HEIGHT,
    });
    app.run()?;
    Ok(())
}
