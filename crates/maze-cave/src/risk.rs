use maze_core::{Point, Range};

use crate::cave::Cave;

/// Outcome of one [`RiskScan::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RiskProgress {
    /// Regions scanned so far.
    pub scanned: usize,
    /// Running risk total.
    pub total: u32,
    /// Whether every region of the target rectangle has been scanned.
    pub done: bool,
    /// Region added by this step, `None` once the scan is complete.
    pub last: Option<Point>,
}

/// Row-major accumulation of risk over a cave's target rectangle, one region
/// per step.
#[derive(Clone, Debug)]
pub struct RiskScan {
    range: Range,
    next: usize,
    total: u32,
}

impl RiskScan {
    pub fn new(cave: &Cave) -> Self {
        Self {
            range: cave.target_range(),
            next: 0,
            total: 0,
        }
    }

    /// Add the next region's risk. Once complete, further steps change
    /// nothing.
    pub fn step(&mut self, cave: &Cave) -> RiskProgress {
        let mut last = None;
        if self.next < self.range.len() {
            let p = self.range.point_at(self.next);
            self.total += cave.region_type(p).map_or(0, |ty| ty.risk());
            self.next += 1;
            last = Some(p);
            if self.is_done() {
                log::debug!("risk scan of {} finished: {}", self.range, self.total);
            }
        }
        RiskProgress {
            scanned: self.next,
            total: self.total,
            done: self.is_done(),
            last,
        }
    }

    /// Scan the remaining regions and return the total.
    pub fn run(&mut self, cave: &Cave) -> u32 {
        while !self.step(cave).done {}
        self.total
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[inline]
    pub fn scanned(&self) -> usize {
        self.next
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.next >= self.range.len()
    }

    /// Whether region `p` has already been added to the total.
    pub fn is_scanned(&self, p: Point) -> bool {
        self.range.index_of(p).is_some_and(|i| i < self.next)
    }

    /// Most recently scanned region.
    pub fn last(&self) -> Option<Point> {
        self.next.checked_sub(1).map(|i| self.range.point_at(i))
    }
}
