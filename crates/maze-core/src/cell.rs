//! What a single terminal cell shows: a character, its colours and
//! whether it is emphasised.

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A foreground or background colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Whatever the terminal itself uses.
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

impl Color {
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Colours of a cell, plus bold for emphasised text such as the route
/// cost on the status line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Style {
    /// Terminal colours, not bold.
    pub const PLAIN: Self = Self {
        fg: Color::Default,
        bg: Color::Default,
        bold: false,
    };

    #[inline]
    pub const fn with_fg(self, fg: Color) -> Self {
        Self { fg, ..self }
    }

    #[inline]
    pub const fn with_bg(self, bg: Color) -> Self {
        Self { bg, ..self }
    }

    #[inline]
    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Foreground and background exchanged. Text cursors are drawn this way.
    #[inline]
    pub const fn reversed(self) -> Self {
        Self {
            fg: self.bg,
            bg: self.fg,
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    /// An empty cell in terminal colours; grids start out filled with it.
    pub const BLANK: Self = Self::plain(' ');

    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// `ch` in [`Style::PLAIN`].
    #[inline]
    pub const fn plain(ch: char) -> Self {
        Self::new(ch, Style::PLAIN)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
