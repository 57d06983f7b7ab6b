//! Cave and screen coordinates: [`Point`] and [`Range`].
//!
//! The cave mouth sits at the origin; `x` counts columns to the right and
//! `y` counts rows downwards. Every dense table in the workspace (erosion
//! levels, search nodes, display cells) is laid out row-major over a
//! [`Range`], so [`Range::index_of`] and [`Range::point_at`] are the only
//! place slot arithmetic happens.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A region of the cave, or a terminal cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The cave mouth.
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Regions reachable in one move: above, left, right, below. Searches
    /// emit successors in this order.
    #[inline]
    pub const fn neighbors_4(self) -> [Point; 4] {
        let Self { x, y } = self;
        [
            Self::new(x, y - 1),
            Self::new(x - 1, y),
            Self::new(x + 1, y),
            Self::new(x, y + 1),
        ]
    }
}

/// Reading order: top row first, left to right within a row.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Same `X,Y` form as the puzzle's target line.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// The rectangle of points `p` with `min.x <= p.x < max.x` and
/// `min.y <= p.y < max.y`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Rectangle spanned by two opposite corners, given in any order.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (xs, ys) = (minmax(x0, x1), minmax(y0, y1));
        Self {
            min: Point::new(xs.0, ys.0),
            max: Point::new(xs.1, ys.1),
        }
    }

    /// `width` columns and `height` rows starting at the origin. Negative
    /// sizes give the empty range.
    #[inline]
    pub fn sized(width: i32, height: i32) -> Self {
        Self {
            min: Point::ZERO,
            max: Point::new(width.max(0), height.max(0)),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of points, and so the length of a dense table over the range.
    #[inline]
    pub fn len(self) -> usize {
        self.width().max(0) as usize * self.height().max(0) as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Overlap of two ranges; `Range::default()` when they do not meet.
    pub fn intersect(self, other: Range) -> Self {
        let overlap = Self {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if overlap.is_empty() {
            Self::default()
        } else {
            overlap
        }
    }

    /// The range moved so that its corner lands on `min + by`.
    #[inline]
    pub fn translate(self, by: Point) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Row-major slot of `p` in a dense table over this range.
    #[inline]
    pub fn index_of(self, p: Point) -> Option<usize> {
        self.contains(p).then(|| {
            let (col, row) = ((p.x - self.min.x) as usize, (p.y - self.min.y) as usize);
            row * self.width() as usize + col
        })
    }

    /// The point stored in slot `idx`. Only meaningful for
    /// `idx < self.len()`.
    #[inline]
    pub fn point_at(self, idx: usize) -> Point {
        let w = self.width().max(1) as usize;
        self.min + Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Every point, in slot order.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
            end: self.len(),
        }
    }
}

#[inline]
fn minmax(a: i32, b: i32) -> (i32, i32) {
    if a <= b { (a, b) } else { (b, a) }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at {}", self.width(), self.height(), self.min)
    }
}

/// Iterator over a [`Range`] in slot order, see [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
    end: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        (self.next < self.end).then(|| {
            self.next += 1;
            self.range.point_at(self.next - 1)
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_in_search_order() {
        assert_eq!(
            Point::new(3, 3).neighbors_4(),
            [
                Point::new(3, 2),
                Point::new(2, 3),
                Point::new(4, 3),
                Point::new(3, 4)
            ]
        );
        assert_eq!(Point::new(1, 2) + Point::new(3, 4), Point::new(4, 6));
        assert_eq!(Point::new(10, 7).to_string(), "10,7");
    }

    #[test]
    fn points_sort_in_reading_order() {
        let mut pts = vec![Point::new(2, 1), Point::new(0, 1), Point::new(5, 0)];
        pts.sort();
        assert_eq!(pts, [Point::new(5, 0), Point::new(0, 1), Point::new(2, 1)]);
    }

    #[test]
    fn corners_in_any_order() {
        let r = Range::new(5, 4, 1, 0);
        assert_eq!(r, Range::new(1, 0, 5, 4));
        assert_eq!((r.width(), r.height(), r.len()), (4, 4, 16));
        assert!(Range::sized(-3, 2).is_empty());
        assert_eq!(Range::sized(11, 11).to_string(), "11x11 at 0,0");
    }

    #[test]
    fn slots_match_iteration_order() {
        let r = Range::new(2, 3, 6, 5);
        for (i, p) in r.iter().enumerate() {
            assert_eq!(r.index_of(p), Some(i));
            assert_eq!(r.point_at(i), p);
        }
        assert_eq!(r.index_of(Point::new(1, 3)), None);
        assert_eq!(r.index_of(Point::new(6, 3)), None);
        assert_eq!(r.iter().count(), r.len());
    }

    #[test]
    fn intersect_and_translate() {
        let a = Range::sized(2, 2);
        assert_eq!(a.intersect(Range::new(5, 5, 7, 7)), Range::default());
        assert_eq!(a.intersect(Range::sized(1, 5)), Range::sized(1, 2));

        let moved = Range::sized(4, 3).translate(Point::new(-2, 1));
        assert_eq!(moved, Range::new(-2, 1, 2, 4));
    }

    #[test]
    fn iter_reports_remaining_len() {
        let mut it = Range::sized(3, 2).iter();
        assert_eq!(it.len(), 6);
        it.by_ref().take(3).for_each(drop);
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some(Point::new(0, 1)));
        assert_eq!(Range::default().iter().next(), None);
    }
}
