//! Multi-line text area widget with a cursor, used to edit puzzle text.

use maze_core::messages::{Key, Mods, Msg};
use maze_core::{Cell, Grid, Point, Range, Style};

use crate::BoxDecor;

/// A key together with the modifiers that must be held.
pub type KeyBinding = (Key, Mods);

/// Configuration for a [`TextArea`] widget.
#[derive(Debug, Clone, Default)]
pub struct TextAreaConfig {
    /// Initial content; lines are separated by `\n`.
    pub content: String,
    pub keys: TextAreaKeys,
    /// Optional border drawn around the text.
    pub box_: Option<BoxDecor>,
    pub style: TextAreaStyle,
}

/// Key bindings for the text area. Enter always inserts a line break unless
/// it is bound here.
#[derive(Debug, Clone)]
pub struct TextAreaKeys {
    pub confirm: Vec<KeyBinding>,
    pub cancel: Vec<KeyBinding>,
}

impl Default for TextAreaKeys {
    fn default() -> Self {
        Self {
            confirm: vec![(Key::Char('s'), Mods::CTRL)],
            cancel: vec![(Key::Esc, Mods::NONE)],
        }
    }
}

/// Visual style for the text area.
#[derive(Debug, Clone, Default)]
pub struct TextAreaStyle {
    pub text: Style,
    /// Cursor style. When left at the default, the reversed text style is used.
    pub cursor: Style,
}

/// Actions returned by [`TextArea::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAreaAction {
    Pass,
    /// The cursor moved without changing the text.
    Move,
    Change,
    Confirm,
    Cancel,
}

/// A multi-line text editor. The cursor is a (line, column) pair counted in
/// characters.
#[derive(Debug, Clone)]
pub struct TextArea {
    lines: Vec<Vec<char>>,
    row: usize,
    col: usize,
    keys: TextAreaKeys,
    box_: Option<BoxDecor>,
    style: TextAreaStyle,
    action: TextAreaAction,
}

impl TextArea {
    /// Create a text area with the cursor at the end of the content.
    pub fn new(config: TextAreaConfig) -> Self {
        let mut style = config.style;
        if style.cursor == Style::PLAIN {
            style.cursor = style.text.reversed();
        }
        let mut area = Self {
            lines: Vec::new(),
            row: 0,
            col: 0,
            keys: config.keys,
            box_: config.box_,
            style,
            action: TextAreaAction::Pass,
        };
        area.set_content(&config.content);
        area
    }

    /// Process an input message and return the resulting action.
    pub fn update(&mut self, msg: Msg) -> TextAreaAction {
        self.action = TextAreaAction::Pass;
        let Msg::KeyDown { key, modifiers, .. } = msg else {
            return self.action;
        };

        if bound(&self.keys.confirm, &key, modifiers) {
            self.action = TextAreaAction::Confirm;
            return self.action;
        }
        if bound(&self.keys.cancel, &key, modifiers) {
            self.action = TextAreaAction::Cancel;
            return self.action;
        }

        self.action = match key {
            // control chords that are not bound do not type anything
            Key::Char(_) if modifiers.ctrl => TextAreaAction::Pass,
            Key::Char(ch) => {
                self.lines[self.row].insert(self.col, ch);
                self.col += 1;
                TextAreaAction::Change
            }
            Key::Enter => {
                let rest = self.lines[self.row].split_off(self.col);
                self.row += 1;
                self.col = 0;
                self.lines.insert(self.row, rest);
                TextAreaAction::Change
            }
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            Key::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.lines[self.row].len();
                }
                TextAreaAction::Move
            }
            Key::Right => {
                if self.col < self.lines[self.row].len() {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
                TextAreaAction::Move
            }
            Key::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.col = self.col.min(self.lines[self.row].len());
                }
                TextAreaAction::Move
            }
            Key::Down => {
                if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = self.col.min(self.lines[self.row].len());
                }
                TextAreaAction::Move
            }
            Key::Home => {
                self.col = 0;
                TextAreaAction::Move
            }
            Key::End => {
                self.col = self.lines[self.row].len();
                TextAreaAction::Move
            }
            Key::Esc | Key::Tab => TextAreaAction::Pass,
        };
        self.action
    }

    fn backspace(&mut self) -> TextAreaAction {
        if self.col > 0 {
            self.col -= 1;
            self.lines[self.row].remove(self.col);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].len();
            self.lines[self.row].extend(line);
        } else {
            return TextAreaAction::Pass;
        }
        TextAreaAction::Change
    }

    fn delete(&mut self) -> TextAreaAction {
        if self.col < self.lines[self.row].len() {
            self.lines[self.row].remove(self.col);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].extend(next);
        } else {
            return TextAreaAction::Pass;
        }
        TextAreaAction::Change
    }

    /// Draw the text area into `grid`, scrolled so the cursor stays visible.
    pub fn draw(&self, grid: &Grid) {
        let inner = match self.box_ {
            Some(ref b) => b.draw(grid),
            None => Range::sized(grid.width(), grid.height()),
        };
        let view = grid.slice(inner);
        let (w, h) = (view.width().max(0) as usize, view.height().max(0) as usize);
        if w == 0 || h == 0 {
            return;
        }
        view.fill(Cell::new(' ', self.style.text));

        let top = (self.row + 1).saturating_sub(h);
        let left = (self.col + 1).saturating_sub(w);
        for (y, line) in self.lines.iter().enumerate().skip(top).take(h) {
            let vy = (y - top) as i32;
            for (x, &ch) in line.iter().enumerate().skip(left).take(w) {
                view.set(
                    Point::new((x - left) as i32, vy),
                    Cell::new(ch, self.style.text),
                );
            }
        }

        let cursor = Point::new((self.col - left) as i32, (self.row - top) as i32);
        let ch = self.lines[self.row].get(self.col).copied().unwrap_or(' ');
        view.set(cursor, Cell::new(ch, self.style.cursor));
    }

    /// The text, lines joined with `\n`.
    pub fn content(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the content and move the cursor to its end.
    pub fn set_content(&mut self, s: &str) {
        self.lines = s
            .split('\n')
            .map(|l| l.trim_end_matches('\r').chars().collect())
            .collect();
        self.row = self.lines.len() - 1;
        self.col = self.lines[self.row].len();
    }

    /// Cursor as (column, line).
    pub fn cursor(&self) -> Point {
        Point::new(self.col as i32, self.row as i32)
    }

    /// Move the cursor, clamping it to the text.
    pub fn set_cursor(&mut self, p: Point) {
        self.row = (p.y.max(0) as usize).min(self.lines.len() - 1);
        self.col = (p.x.max(0) as usize).min(self.lines[self.row].len());
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn action(&self) -> TextAreaAction {
        self.action
    }

    pub fn set_box(&mut self, box_: Option<BoxDecor>) {
        self.box_ = box_;
    }
}

fn bound(bindings: &[KeyBinding], key: &Key, modifiers: Mods) -> bool {
    bindings
        .iter()
        .any(|(k, m)| k == key && modifiers.covers(*m))
}
