use maze_core::Point;

use crate::Equipment;

/// Cost of moving to an adjacent region with the held tool.
pub const MOVE_COST: i32 = 1;
/// Cost of switching tools while standing in a region.
pub const SWITCH_COST: i32 = 7;

/// A search state: a region together with the tool held there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCell {
    pub pos: Point,
    pub tool: Equipment,
}

impl PathCell {
    #[inline]
    pub const fn new(pos: Point, tool: Equipment) -> Self {
        Self { pos, tool }
    }
}

/// A fused "move, switching if needed" edge of the search graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub to: PathCell,
    pub cost: i32,
}

impl Edge {
    /// Edge into `to` for a traveller currently holding `held`: costs
    /// [`MOVE_COST`], plus [`SWITCH_COST`] when `to.tool` differs.
    #[inline]
    pub fn fused(held: Equipment, to: PathCell) -> Self {
        let cost = if held == to.tool {
            MOVE_COST
        } else {
            MOVE_COST + SWITCH_COST
        };
        Self { to, cost }
    }
}

/// Source of the implicit search graph.
pub trait ToolPather {
    /// Append the edges leaving `from` into `buf`. The caller clears `buf`
    /// before calling. Costs must be positive.
    fn edges(&self, from: PathCell, buf: &mut Vec<Edge>);
}
