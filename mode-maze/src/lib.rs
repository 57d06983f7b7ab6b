//! Terminal visualizer for the mode maze: watch the risk scan and the
//! tool-switching route search advance one step at a time.

pub mod colors;
pub mod config;
pub mod model;

pub use config::{ConfigError, MazeConfig, load_from_env};
pub use model::{MAP_HEIGHT, MazeModel, Mode, UI_HEIGHT, UI_WIDTH};
