use maze_core::{Point, Range};

use crate::{Equipment, PathCell};

/// Sentinel cost of a cell that has not been reached.
pub const UNREACHABLE: i32 = i32::MAX;

/// Stable handle of a search cell within one [`Pathfinder`](crate::Pathfinder)
/// run. The same (region, tool) pair always yields the same handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Internal node bookkeeping
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) cost: i32,
    pub(crate) parent: Option<CellId>,
    pub(crate) created: bool,
    pub(crate) finalized: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            cost: UNREACHABLE,
            parent: None,
            created: false,
            finalized: false,
        }
    }
}

/// Frontier entry, ordered by cost for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct NodeRef {
    pub(crate) id: CellId,
    pub(crate) cost: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the cheapest entry first.
        other.cost.cmp(&self.cost).then(other.id.cmp(&self.id))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// CellTable
// ---------------------------------------------------------------------------

/// Dense table of search cells over a region rectangle, three slots per
/// region (one per [`Equipment`]). Cells count as created the first time
/// they are touched.
pub(crate) struct CellTable {
    rng: Range,
    nodes: Vec<Node>,
    created: usize,
}

impl CellTable {
    pub(crate) fn new(rng: Range) -> Self {
        Self {
            rng,
            nodes: vec![Node::default(); rng.len() * Equipment::COUNT],
            created: 0,
        }
    }

    #[inline]
    pub(crate) fn range(&self) -> Range {
        self.rng
    }

    /// Handle of `cell`, or `None` if its region lies outside the table.
    #[inline]
    pub(crate) fn id(&self, cell: PathCell) -> Option<CellId> {
        let slot = self.rng.index_of(cell.pos)?;
        Some(CellId(slot * Equipment::COUNT + cell.tool.index()))
    }

    /// The cell behind a handle.
    #[inline]
    pub(crate) fn cell(&self, id: CellId) -> PathCell {
        let pos = self.rng.point_at(id.0 / Equipment::COUNT);
        let tool = Equipment::ALL[id.0 % Equipment::COUNT];
        PathCell::new(pos, tool)
    }

    #[inline]
    pub(crate) fn node(&self, id: CellId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutable access, creating the cell on first touch.
    #[inline]
    pub(crate) fn touch(&mut self, id: CellId) -> &mut Node {
        let node = &mut self.nodes[id.0];
        if !node.created {
            node.created = true;
            self.created += 1;
        }
        node
    }

    #[inline]
    pub(crate) fn created(&self) -> usize {
        self.created
    }

    /// Whether any tool's cell at region `p` has been finalized.
    pub(crate) fn region_finalized(&self, p: Point) -> bool {
        Equipment::ALL.iter().any(|&tool| {
            self.id(PathCell::new(p, tool))
                .is_some_and(|id| self.node(id).finalized)
        })
    }
}
