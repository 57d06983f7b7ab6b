//! **maze-core**: core types for the mode-maze visualizer.
//!
//! Geometry primitives shared by the cave model and the pathfinder, plus the
//! display side: styled cells, a shared-buffer grid, input messages with an
//! animation tick, and the Elm-architecture application loop.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use cell::{Cell, Color, Style};
pub use geom::{Point, Range};
pub use grid::{Frame, FrameCell, Grid};
pub use messages::{Key, Mods, Msg};
