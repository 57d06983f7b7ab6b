//! The display [`Grid`]: a 2D buffer of [`Cell`]s with slice semantics.
//!
//! A `Grid` is a *view* into a shared backing buffer. Cloning a `Grid` yields
//! another view of the same storage; [`slice`](Grid::slice) narrows the view.
//! Points passed to a view are relative to its top-left corner, so a model
//! can draw its map panel and its status line with independent coordinates.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::{Cell, Style};
use crate::geom::{Point, Range};

#[derive(Debug, Clone)]
struct GridBuffer {
    cells: Vec<Cell>,
    rng: Range,
}

/// A 2D grid of [`Cell`]s backed by shared storage.
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: Rc<RefCell<GridBuffer>>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with blank cells.
    pub fn new(width: i32, height: i32) -> Self {
        let rng = Range::sized(width, height);
        Self {
            buffer: Rc::new(RefCell::new(GridBuffer {
                cells: vec![Cell::BLANK; rng.len()],
                rng,
            })),
            bounds: rng,
        }
    }

    /// Absolute bounds of this view within the backing buffer.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether the view-relative point `p` is inside this view.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        Range::sized(self.width(), self.height()).contains(p)
    }

    /// A sub-view. `r` is relative to this view and is clipped to it.
    pub fn slice(&self, r: Range) -> Grid {
        Grid {
            buffer: Rc::clone(&self.buffer),
            bounds: self.bounds.intersect(r.translate(self.bounds.min)),
        }
    }

    /// Read the cell at view-relative `p`; blank when out of bounds.
    pub fn at(&self, p: Point) -> Cell {
        if !self.contains(p) {
            return Cell::BLANK;
        }
        let buf = self.buffer.borrow();
        buf.rng
            .index_of(p + self.bounds.min)
            .map(|i| buf.cells[i])
            .unwrap_or_default()
    }

    /// Set the cell at view-relative `p`. No-op when out of bounds.
    pub fn set(&self, p: Point, cell: Cell) {
        if !self.contains(p) {
            return;
        }
        let mut buf = self.buffer.borrow_mut();
        if let Some(i) = buf.rng.index_of(p + self.bounds.min) {
            buf.cells[i] = cell;
        }
    }

    /// Fill every cell of the view with `cell`.
    pub fn fill(&self, cell: Cell) {
        let mut buf = self.buffer.borrow_mut();
        for p in self.bounds.iter() {
            if let Some(i) = buf.rng.index_of(p) {
                buf.cells[i] = cell;
            }
        }
    }

    /// Write `text` on one line starting at `p`, clipped to the view.
    /// Returns the number of characters drawn.
    pub fn draw_text(&self, p: Point, text: &str, style: Style) -> i32 {
        let mut drawn = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p + Point::new(i as i32, 0);
            if q.x >= self.width() {
                break;
            }
            if self.contains(q) {
                self.set(q, Cell::new(ch, style));
                drawn += 1;
            }
        }
        drawn
    }

    /// Copy the overlapping area of `src` into `self`, aligning top-left
    /// corners.
    pub fn copy_from(&self, src: &Grid) {
        let w = src.width().min(self.width());
        let h = src.height().min(self.height());
        for p in Range::sized(w, h) {
            self.set(p, src.at(p));
        }
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// The cells that changed since the previous frame.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Diff two same-sized grids, keeping only the cells that differ.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let cells = Range::sized(curr.width(), curr.height())
        .iter()
        .filter_map(|p| {
            let cc = curr.at(p);
            (prev.at(p) != cc).then_some(FrameCell { cell: cc, pos: p })
        })
        .collect();
    Frame {
        cells,
        width: curr.width(),
        height: curr.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let g = Grid::new(4, 3);
        g.set(Point::new(2, 1), Cell::plain('X'));
        assert_eq!(g.at(Point::new(2, 1)).ch, 'X');
        assert_eq!(g.at(Point::new(10, 10)), Cell::BLANK);
    }

    #[test]
    fn slice_is_relative_and_shares_buffer() {
        let g = Grid::new(6, 4);
        let s = g.slice(Range::new(2, 1, 6, 4));
        assert_eq!((s.width(), s.height()), (4, 3));
        s.set(Point::new(0, 0), Cell::plain('#'));
        assert_eq!(g.at(Point::new(2, 1)).ch, '#');
        // writes outside the slice are dropped
        s.set(Point::new(4, 0), Cell::plain('!'));
        assert_eq!(g.at(Point::new(6, 1)), Cell::BLANK);
    }

    #[test]
    fn draw_text_clips() {
        let g = Grid::new(5, 1);
        let n = g.draw_text(Point::new(2, 0), "risk", Style::PLAIN);
        assert_eq!(n, 3);
        assert_eq!(g.at(Point::new(4, 0)).ch, 's');
    }

    #[test]
    fn frame_contains_only_changes() {
        let a = Grid::new(3, 2);
        let b = Grid::new(3, 2);
        b.set(Point::new(1, 0), Cell::plain('A'));
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Point::new(1, 0));
        a.copy_from(&b);
        assert!(compute_frame(&a, &b).cells.is_empty());
    }
}
