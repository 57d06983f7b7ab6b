use std::collections::BinaryHeap;

use maze_core::{Point, Range};

use crate::table::{CellId, CellTable, NodeRef, UNREACHABLE};
use crate::traits::{Edge, PathCell, ToolPather};

/// Result of a single [`Pathfinder::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell was finalized; the search goes on.
    Expanded(PathCell),
    /// The goal cell was finalized. Repeated steps keep returning it.
    GoalReached(PathCell),
    /// The frontier ran dry before the goal was finalized.
    Exhausted,
}

/// Lifecycle of a search run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Found,
    Exhausted,
}

/// A finalized cell on a reconstructed path, with its cumulative cost.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub cell: PathCell,
    pub cost: i32,
}

/// Resumable uniform-cost search from a start cell to a goal cell.
///
/// Each call to [`step`](Pathfinder::step) pops exactly one live frontier
/// entry, finalizes it and relaxes its outgoing edges, so an external clock
/// can animate the search one expansion per frame. All bookkeeping belongs to
/// this run; start a new search by building a new `Pathfinder`.
///
/// The graph is supplied per step through a [`ToolPather`]; every step of one
/// run must be given the same pather.
pub struct Pathfinder {
    table: CellTable,
    frontier: BinaryHeap<NodeRef>,
    start: PathCell,
    goal: PathCell,
    state: SearchState,
    last: Option<PathCell>,
    finalized: usize,
    ebuf: Vec<Edge>,
}

impl Pathfinder {
    /// Prepare a search over the regions of `bounds`. Cells whose region lies
    /// outside `bounds` are never created. A start outside `bounds` gives a
    /// search that is exhausted on its first step.
    pub fn new(bounds: Range, start: PathCell, goal: PathCell) -> Self {
        let mut table = CellTable::new(bounds);
        let mut frontier = BinaryHeap::new();
        if let Some(id) = table.id(start) {
            table.touch(id).cost = 0;
            frontier.push(NodeRef { id, cost: 0 });
        }
        Self {
            table,
            frontier,
            start,
            goal,
            state: SearchState::Running,
            last: None,
            finalized: 0,
            ebuf: Vec::with_capacity(8),
        }
    }

    /// Expand one frontier entry.
    ///
    /// Stale entries, pushed before a cheaper route to the same cell was
    /// found, are discarded without counting as a step.
    pub fn step<P: ToolPather>(&mut self, pather: &P) -> Step {
        match self.state {
            SearchState::Found => return Step::GoalReached(self.goal),
            SearchState::Exhausted => return Step::Exhausted,
            SearchState::Running => {}
        }

        let current = loop {
            let Some(entry) = self.frontier.pop() else {
                self.state = SearchState::Exhausted;
                log::debug!(
                    "search exhausted after {} expansions without reaching {:?}",
                    self.finalized,
                    self.goal
                );
                return Step::Exhausted;
            };
            let node = self.table.node(entry.id);
            if node.finalized || entry.cost > node.cost {
                continue;
            }
            break entry;
        };

        let cid = current.id;
        let cell = self.table.cell(cid);
        self.table.touch(cid).finalized = true;
        self.finalized += 1;
        self.last = Some(cell);
        log::trace!("finalized {cell:?} at cost {}", current.cost);

        if cell == self.goal {
            self.state = SearchState::Found;
            log::debug!(
                "goal {:?} reached at cost {} after {} expansions",
                cell,
                current.cost,
                self.finalized
            );
            return Step::GoalReached(cell);
        }

        let mut ebuf = std::mem::take(&mut self.ebuf);
        ebuf.clear();
        pather.edges(cell, &mut ebuf);

        for edge in ebuf.iter() {
            let Some(nid) = self.table.id(edge.to) else {
                continue;
            };
            let tentative = current.cost + edge.cost;
            let n = self.table.touch(nid);
            if tentative >= n.cost {
                continue;
            }
            n.cost = tentative;
            n.parent = Some(cid);
            self.frontier.push(NodeRef {
                id: nid,
                cost: tentative,
            });
        }

        self.ebuf = ebuf;
        Step::Expanded(cell)
    }

    /// Step until the goal is finalized or the frontier empties. Returns the
    /// goal's cost, or `None` when no route exists.
    pub fn run<P: ToolPather>(&mut self, pather: &P) -> Option<i32> {
        loop {
            match self.step(pather) {
                Step::Expanded(_) => {}
                Step::GoalReached(_) => return self.goal_cost(),
                Step::Exhausted => return None,
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state != SearchState::Running
    }

    /// Regions this search may create cells in.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.table.range()
    }

    #[inline]
    pub fn start(&self) -> PathCell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> PathCell {
        self.goal
    }

    /// Frontier entries waiting to be popped, stale ones included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of cells finalized so far.
    #[inline]
    pub fn finalized_count(&self) -> usize {
        self.finalized
    }

    /// Number of distinct cells discovered so far.
    #[inline]
    pub fn cells_created(&self) -> usize {
        self.table.created()
    }

    /// The most recently finalized cell.
    #[inline]
    pub fn last_expanded(&self) -> Option<PathCell> {
        self.last
    }

    /// Stable handle of `cell`, if its region is inside the searched bounds.
    pub fn cell_id(&self, cell: PathCell) -> Option<CellId> {
        self.table.id(cell)
    }

    /// Best cost recorded for `cell` so far. Final once
    /// [`is_finalized`](Pathfinder::is_finalized) holds.
    pub fn cost_of(&self, cell: PathCell) -> Option<i32> {
        let id = self.table.id(cell)?;
        let cost = self.table.node(id).cost;
        (cost != UNREACHABLE).then_some(cost)
    }

    pub fn is_finalized(&self, cell: PathCell) -> bool {
        self.table
            .id(cell)
            .is_some_and(|id| self.table.node(id).finalized)
    }

    /// Whether the region at `p` has been finalized with any tool.
    pub fn visited(&self, p: Point) -> bool {
        self.table.region_finalized(p)
    }

    /// The goal's cost, once it has been finalized.
    pub fn goal_cost(&self) -> Option<i32> {
        if self.state != SearchState::Found {
            return None;
        }
        self.cost_of(self.goal)
    }

    /// Route from the start to a finalized `cell`, following predecessors.
    /// Empty if `cell` is not finalized yet.
    pub fn path_to(&self, cell: PathCell) -> Vec<PathNode> {
        let Some(mut id) = self.table.id(cell) else {
            return Vec::new();
        };
        if !self.table.node(id).finalized {
            return Vec::new();
        }
        let mut path = Vec::new();
        loop {
            let node = self.table.node(id);
            path.push(PathNode {
                cell: self.table.cell(id),
                cost: node.cost,
            });
            match node.parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Route from the start to the goal. Empty until the goal is finalized.
    pub fn path(&self) -> Vec<PathNode> {
        if self.state != SearchState::Found {
            return Vec::new();
        }
        self.path_to(self.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Equipment::{self, ClimbingGear, Neither, Torch};
    use std::collections::HashSet;

    /// Open floor where every tool works, except `gear_only` regions which
    /// accept only climbing gear, and `walls` which accept nothing.
    struct Floor {
        rng: Range,
        walls: HashSet<Point>,
        gear_only: HashSet<Point>,
    }

    impl Floor {
        fn open(w: i32, h: i32) -> Self {
            Self {
                rng: Range::sized(w, h),
                walls: HashSet::new(),
                gear_only: HashSet::new(),
            }
        }
    }

    impl ToolPather for Floor {
        fn edges(&self, from: PathCell, buf: &mut Vec<Edge>) {
            for n in from.pos.neighbors_4() {
                if !self.rng.contains(n) || self.walls.contains(&n) {
                    continue;
                }
                let tools: &[Equipment] = if self.gear_only.contains(&n) {
                    &[ClimbingGear]
                } else {
                    &Equipment::ALL
                };
                for &tool in tools {
                    buf.push(Edge::fused(from.tool, PathCell::new(n, tool)));
                }
            }
        }
    }

    fn search(floor: &Floor, goal: Point) -> Pathfinder {
        Pathfinder::new(
            floor.rng,
            PathCell::new(Point::ZERO, Torch),
            PathCell::new(goal, Torch),
        )
    }

    #[test]
    fn start_equal_to_goal_finishes_immediately() {
        let floor = Floor::open(1, 1);
        let mut pf = search(&floor, Point::ZERO);
        assert_eq!(pf.frontier_len(), 1);
        assert_eq!(
            pf.step(&floor),
            Step::GoalReached(PathCell::new(Point::ZERO, Torch))
        );
        assert_eq!(pf.goal_cost(), Some(0));
        assert_eq!(pf.path().len(), 1);
    }

    #[test]
    fn straight_corridor_costs_one_per_move() {
        let floor = Floor::open(5, 1);
        let mut pf = search(&floor, Point::new(4, 0));
        assert_eq!(pf.run(&floor), Some(4));
        let path = pf.path();
        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|n| n.cell.tool == Torch));
        assert_eq!(path.last().map(|n| n.cost), Some(4));
    }

    #[test]
    fn forced_switches_use_fused_edges() {
        let mut floor = Floor::open(3, 1);
        floor.gear_only.insert(Point::new(1, 0));
        let mut pf = search(&floor, Point::new(2, 0));
        // switch to gear entering (1,0), back to torch entering (2,0)
        assert_eq!(pf.run(&floor), Some(16));
        let tools: Vec<Equipment> = pf.path().iter().map(|n| n.cell.tool).collect();
        assert_eq!(tools, vec![Torch, ClimbingGear, Torch]);
    }

    #[test]
    fn walled_off_goal_is_exhausted_not_fatal() {
        let mut floor = Floor::open(3, 3);
        floor.walls.insert(Point::new(1, 2));
        floor.walls.insert(Point::new(2, 1));
        let mut pf = search(&floor, Point::new(2, 2));
        assert_eq!(pf.run(&floor), None);
        assert_eq!(pf.state(), SearchState::Exhausted);
        assert_eq!(pf.step(&floor), Step::Exhausted);
        assert!(pf.path().is_empty());
        assert_eq!(pf.goal_cost(), None);
    }

    #[test]
    fn steps_after_goal_are_idempotent() {
        let floor = Floor::open(2, 2);
        let mut pf = search(&floor, Point::new(1, 1));
        pf.run(&floor);
        let finalized = pf.finalized_count();
        let goal = pf.goal();
        assert_eq!(pf.step(&floor), Step::GoalReached(goal));
        assert_eq!(pf.finalized_count(), finalized);
    }

    #[test]
    fn finalization_costs_never_decrease() {
        let mut floor = Floor::open(6, 6);
        for p in [Point::new(2, 1), Point::new(2, 2), Point::new(3, 4)] {
            floor.gear_only.insert(p);
        }
        let mut pf = search(&floor, Point::new(5, 5));
        let mut prev = 0;
        loop {
            match pf.step(&floor) {
                Step::Expanded(cell) | Step::GoalReached(cell) => {
                    let cost = pf.cost_of(cell).expect("finalized cells have a cost");
                    assert!(cost >= prev, "{cost} after {prev}");
                    prev = cost;
                    if pf.is_done() {
                        break;
                    }
                }
                Step::Exhausted => panic!("goal is reachable"),
            }
        }
        assert_eq!(pf.goal_cost(), Some(10));
    }

    #[test]
    fn partial_paths_start_at_start() {
        let floor = Floor::open(4, 4);
        let mut pf = search(&floor, Point::new(3, 3));
        for _ in 0..6 {
            pf.step(&floor);
        }
        let last = pf.last_expanded().expect("six expansions");
        let path = pf.path_to(last);
        assert_eq!(path.first().map(|n| n.cell), Some(pf.start()));
        assert_eq!(path.last().map(|n| n.cell), Some(last));
        assert!(pf.path().is_empty());
        assert!(pf.visited(Point::ZERO));
        assert!(pf.cells_created() <= floor.rng.len() * Equipment::COUNT);
        assert!(pf.path_to(PathCell::new(Point::new(3, 3), Neither)).is_empty());
    }

    #[test]
    fn start_outside_bounds_is_exhausted() {
        let floor = Floor::open(2, 2);
        let mut pf = Pathfinder::new(
            floor.rng,
            PathCell::new(Point::new(-1, 0), Torch),
            PathCell::new(Point::new(1, 1), Torch),
        );
        assert_eq!(pf.step(&floor), Step::Exhausted);
        assert_eq!(pf.cells_created(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::Equipment;

    #[test]
    fn path_node_round_trip() {
        let node = PathNode {
            cell: PathCell::new(Point::new(3, 7), Equipment::ClimbingGear),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
