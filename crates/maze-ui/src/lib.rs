//! Widgets for the mode-maze visualizer: a bordered box and a multi-line text
//! area for editing puzzle input.

mod box_;
mod text_area;

pub use box_::{Alignment, BoxDecor};
pub use text_area::{TextArea, TextAreaAction, TextAreaConfig, TextAreaKeys, TextAreaStyle};
