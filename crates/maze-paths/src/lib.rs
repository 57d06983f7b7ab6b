//! Uniform-cost search over (region, equipment) states.
//!
//! The search graph is implicit: a [`ToolPather`] lists the fused
//! "move, switching tools if needed" edges leaving a [`PathCell`], and a
//! [`Pathfinder`] expands one cell per [`step`](Pathfinder::step) so the
//! search can be animated frame by frame, or [`run`](Pathfinder::run) to
//! completion.
//!
//! | Type | Role |
//! |---|---|
//! | [`Equipment`] | Tool held while moving |
//! | [`PathCell`] | Search state: region + tool |
//! | [`CellId`] | Stable per-run handle of a `PathCell` |
//! | [`ToolPather`] | Edge source (implemented by the cave model) |
//! | [`Pathfinder`] | Steppable search with path reconstruction |

mod equipment;
mod search;
mod table;
mod traits;

pub use equipment::Equipment;
pub use search::{PathNode, Pathfinder, SearchState, Step};
pub use table::{CellId, UNREACHABLE};
pub use traits::{Edge, MOVE_COST, PathCell, SWITCH_COST, ToolPather};
