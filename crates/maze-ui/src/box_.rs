use maze_core::{Cell, Grid, Point, Range, Style};

/// Placement of a title on the top border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
}

/// A single-line border drawn around a panel, with an optional title.
#[derive(Debug, Clone, Default)]
pub struct BoxDecor {
    /// Style of the border characters.
    pub style: Style,
    pub title: String,
    pub title_style: Style,
    pub align_title: Alignment,
}

impl BoxDecor {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self.title_style = style;
        self
    }

    pub fn with_title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    pub fn with_alignment(mut self, align: Alignment) -> Self {
        self.align_title = align;
        self
    }

    /// Area left inside the border of a `width` x `height` panel.
    pub fn inner(width: i32, height: i32) -> Range {
        if width < 2 || height < 2 {
            return Range::sized(width, height);
        }
        Range::new(1, 1, width - 1, height - 1)
    }

    /// Draw the border along the edges of `grid` and return the inner range,
    /// relative to `grid`. Grids too small for a border are left untouched.
    pub fn draw(&self, grid: &Grid) -> Range {
        let (w, h) = (grid.width(), grid.height());
        if w < 2 || h < 2 {
            return Range::sized(w, h);
        }
        let s = self.style;

        set(grid, Point::new(0, 0), '\u{250c}', s);
        set(grid, Point::new(w - 1, 0), '\u{2510}', s);
        set(grid, Point::new(0, h - 1), '\u{2514}', s);
        set(grid, Point::new(w - 1, h - 1), '\u{2518}', s);
        for x in 1..w - 1 {
            set(grid, Point::new(x, 0), '\u{2500}', s);
            set(grid, Point::new(x, h - 1), '\u{2500}', s);
        }
        for y in 1..h - 1 {
            set(grid, Point::new(0, y), '\u{2502}', s);
            set(grid, Point::new(w - 1, y), '\u{2502}', s);
        }

        if !self.title.is_empty() {
            let room = w - 2;
            let tw = (self.title.chars().count() as i32).min(room);
            let offset = match self.align_title {
                Alignment::Left => 0,
                Alignment::Right => room - tw,
                Alignment::Center => (room - tw) / 2,
            };
            let top = grid.slice(Range::new(1, 0, w - 1, 1));
            top.draw_text(Point::new(offset, 0), &self.title, self.title_style);
        }

        Self::inner(w, h)
    }
}

fn set(grid: &Grid, p: Point, ch: char, style: Style) {
    grid.set(p, Cell::new(ch, style));
}
