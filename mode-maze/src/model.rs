//! Elm-architecture model of the visualizer.
//!
//! The model owns the current cave and, when started, a [`RiskScan`] and a
//! [`Pathfinder`]. Each [`Msg::Tick`] advances whichever of them is still
//! running by the configured number of steps.

use std::collections::HashSet;

use maze_cave::{Cave, Puzzle, RiskScan};
use maze_core::{
    Cell, Point, Range,
    app::{Effect, Model},
    cell::Style,
    grid::Grid,
    messages::{Key, Msg},
};
use maze_paths::{Pathfinder, SearchState, Step};
use maze_ui::{Alignment, BoxDecor, TextArea, TextAreaAction, TextAreaConfig, TextAreaStyle};

use crate::colors::*;
use crate::config::{DEFAULT_PUZZLE, MazeConfig};

pub const UI_WIDTH: i32 = 80;
pub const UI_HEIGHT: i32 = 24;
/// Rows of the map panel; the rest of the screen is the status area.
pub const MAP_HEIGHT: i32 = 21;

const HELP_LINE: &str = "r risk  p path  e edit  arrows scroll  Q quit";
const EDIT_HELP: &str = "Ctrl+S apply  Esc cancel";

/// UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Editing,
}

/// The visualizer model.
pub struct MazeModel {
    config: MazeConfig,
    puzzle: Puzzle,
    cave: Cave,
    scan: Option<RiskScan>,
    search: Option<Pathfinder>,
    mode: Mode,
    editor: Option<TextArea>,
    error: Option<String>,
    /// Cave point shown at the top-left of the map panel.
    offset: Point,
}

impl MazeModel {
    /// Build the model from `config`. Puzzle text that does not parse is
    /// logged and replaced by the default puzzle.
    pub fn new(config: MazeConfig) -> Self {
        let (puzzle, error) = match Puzzle::parse(&config.puzzle) {
            Ok(p) => (p, None),
            Err(err) => {
                log::warn!("configured puzzle rejected: {err}");
                let fallback = Puzzle::parse(DEFAULT_PUZZLE)
                    .unwrap_or_else(|_| Puzzle::new(510, Point::new(10, 10)));
                (fallback, Some(format!("configured puzzle: {err}")))
            }
        };
        let cave = Cave::from_puzzle(&puzzle, &config.cave_config());
        Self {
            config,
            puzzle,
            cave,
            scan: None,
            search: None,
            mode: Mode::View,
            editor: None,
            error,
            offset: Point::ZERO,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn cave(&self) -> &Cave {
        &self.cave
    }

    pub fn puzzle(&self) -> Puzzle {
        self.puzzle
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Total risk, once a scan has finished.
    pub fn risk_level(&self) -> Option<u32> {
        self.scan.as_ref().filter(|s| s.is_done()).map(RiskScan::total)
    }

    /// Route cost, once a search has reached the target.
    pub fn route_cost(&self) -> Option<i32> {
        self.search.as_ref().and_then(Pathfinder::goal_cost)
    }

    pub fn search_state(&self) -> Option<SearchState> {
        self.search.as_ref().map(Pathfinder::state)
    }

    /// Whether a scan or search is still in progress.
    pub fn is_busy(&self) -> bool {
        self.scan.as_ref().is_some_and(|s| !s.is_done())
            || self.search.as_ref().is_some_and(|s| !s.is_done())
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    fn update_view(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('r') => {
                log::debug!("risk scan started");
                self.scan = Some(RiskScan::new(&self.cave));
            }
            Key::Char('p') => {
                log::debug!("route search started");
                self.search = Some(self.cave.pathfinder());
            }
            Key::Char('e') => self.open_editor(),
            Key::Up => self.scroll(0, -1),
            Key::Down => self.scroll(0, 1),
            Key::Left => self.scroll(-1, 0),
            Key::Right => self.scroll(1, 0),
            Key::Char('Q') | Key::Esc => return Some(Effect::End),
            _ => {}
        }
        None
    }

    fn update_editing(&mut self, msg: Msg) -> Option<Effect> {
        let Some(editor) = self.editor.as_mut() else {
            self.mode = Mode::View;
            return None;
        };
        match editor.update(msg) {
            TextAreaAction::Confirm => {
                let text = editor.content();
                self.apply_puzzle(&text);
            }
            TextAreaAction::Cancel => {
                self.editor = None;
                self.mode = Mode::View;
            }
            TextAreaAction::Change => self.error = None,
            TextAreaAction::Pass | TextAreaAction::Move => {}
        }
        None
    }

    fn open_editor(&mut self) {
        let content = self.puzzle.to_string();
        self.editor = Some(TextArea::new(TextAreaConfig {
            content: content.trim_end().to_string(),
            box_: Some(
                BoxDecor::new(" puzzle ")
                    .with_style(Style::PLAIN.with_fg(CYAN))
                    .with_alignment(Alignment::Left),
            ),
            style: TextAreaStyle {
                text: Style::PLAIN.with_fg(FG_EMPH),
                cursor: Style::PLAIN,
            },
            ..TextAreaConfig::default()
        }));
        self.error = None;
        self.mode = Mode::Editing;
    }

    /// Replace the cave with the one described by `text`. On a parse error
    /// the current cave stays and the editor stays open.
    fn apply_puzzle(&mut self, text: &str) {
        match Puzzle::parse(text) {
            Ok(puzzle) => {
                log::info!("puzzle applied: depth {}, target {}", puzzle.depth, puzzle.target);
                self.cave = Cave::from_puzzle(&puzzle, &self.config.cave_config());
                self.puzzle = puzzle;
                self.scan = None;
                self.search = None;
                self.offset = Point::ZERO;
                self.error = None;
                self.editor = None;
                self.mode = Mode::View;
            }
            Err(err) => {
                log::warn!("puzzle rejected: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        let b = self.cave.bounds();
        let max_x = (b.width() - UI_WIDTH).max(0);
        let max_y = (b.height() - MAP_HEIGHT).max(0);
        self.offset = Point::new(
            (self.offset.x + dx).clamp(0, max_x),
            (self.offset.y + dy).clamp(0, max_y),
        );
    }

    /// Scroll just enough to bring cave point `p` into the map panel.
    fn follow(&mut self, p: Point) {
        let view = Range::sized(UI_WIDTH, MAP_HEIGHT).translate(self.offset);
        if view.contains(p) {
            return;
        }
        let dx = if p.x < view.min.x {
            p.x - view.min.x
        } else if p.x >= view.max.x {
            p.x - view.max.x + 1
        } else {
            0
        };
        let dy = if p.y < view.min.y {
            p.y - view.min.y
        } else if p.y >= view.max.y {
            p.y - view.max.y + 1
        } else {
            0
        };
        self.scroll(dx, dy);
    }

    fn tick(&mut self) {
        let steps = self.config.steps();
        let mut focus = None;
        if let Some(scan) = self.scan.as_mut() {
            for _ in 0..steps {
                let progress = scan.step(&self.cave);
                focus = progress.last.or(focus);
                if progress.done {
                    break;
                }
            }
        }
        if let Some(search) = self.search.as_mut() {
            for _ in 0..steps {
                match search.step(&self.cave) {
                    Step::Expanded(cell) => focus = Some(cell.pos),
                    Step::GoalReached(_) | Step::Exhausted => break,
                }
            }
        }
        if let Some(p) = focus {
            self.follow(p);
        }
    }

    // -----------------------------------------------------------------------
    // Draw
    // -----------------------------------------------------------------------

    fn draw_map(&self, grid: &Grid) {
        let target_range = self.cave.target_range();
        let route: HashSet<Point> = self
            .search
            .as_ref()
            .map(|s| s.path().iter().map(|n| n.cell.pos).collect())
            .unwrap_or_default();
        let cursor = self
            .search
            .as_ref()
            .filter(|s| !s.is_done())
            .and_then(Pathfinder::last_expanded)
            .map(|c| c.pos)
            .or_else(|| {
                self.scan
                    .as_ref()
                    .filter(|s| !s.is_done())
                    .and_then(RiskScan::last)
            });

        for v in Range::sized(grid.width(), grid.height()) {
            let p = v + self.offset;
            let (Some(ch), Some(ty)) = (self.cave.symbol(p), self.cave.region_type(p)) else {
                continue;
            };
            let mut style = Style::PLAIN.with_fg(region_color(ty)).with_bg(BG);
            if !target_range.contains(p) {
                style = style.with_fg(FG_DIM);
            }
            if self.scan.as_ref().is_some_and(|s| s.is_scanned(p)) {
                style = style.with_bg(BG_SCANNED);
            }
            if self.search.as_ref().is_some_and(|s| s.visited(p)) {
                style = style.with_bg(BG_VISITED);
            }
            if route.contains(&p) {
                style = style.with_bg(BG_ROUTE).with_fg(FG_EMPH);
            }
            if cursor == Some(p) {
                style = style.with_bg(BG_CURSOR).with_fg(BG);
            }
            if self.cave.is_start(p) || self.cave.is_target(p) {
                style = style.with_fg(FG_EMPH).bold();
            }
            grid.set(v, Cell::new(ch, style));
        }
    }

    fn draw_status(&self, grid: &Grid) {
        let plain = Style::PLAIN.with_fg(FG);
        let t = self.cave.target();
        let mut x = grid.draw_text(
            Point::new(0, 0),
            &format!("depth {}  target {},{}  ", self.cave.depth(), t.x, t.y),
            plain,
        );
        let risk = match &self.scan {
            None => "risk: -".to_string(),
            Some(s) if s.is_done() => format!("risk: {}", s.total()),
            Some(s) => format!("risk: {} ({}/{})", s.total(), s.scanned(), s.len()),
        };
        x += grid.draw_text(Point::new(x, 0), &risk, Style::PLAIN.with_fg(YELLOW));
        grid.draw_text(
            Point::new(x, 0),
            &format!("  view {}", self.offset),
            Style::PLAIN.with_fg(FG_DIM),
        );

        let (line, color) = match &self.search {
            None => ("route: -".to_string(), FG),
            Some(s) => match s.state() {
                SearchState::Running => (
                    format!(
                        "route: searching  frontier {}  finalized {}  cells {}",
                        s.frontier_len(),
                        s.finalized_count(),
                        s.cells_created()
                    ),
                    FG,
                ),
                SearchState::Found => (
                    format!(
                        "route: {} minutes  ({} steps, {} finalized)",
                        s.goal_cost().unwrap_or_default(),
                        s.path().len().saturating_sub(1),
                        s.finalized_count()
                    ),
                    GREEN,
                ),
                SearchState::Exhausted => ("route: target unreachable".to_string(), RED),
            },
        };
        grid.draw_text(Point::new(0, 1), &line, Style::PLAIN.with_fg(color));

        match (&self.error, self.mode) {
            (Some(err), _) => {
                grid.draw_text(Point::new(0, 2), err, Style::PLAIN.with_fg(RED));
            }
            (None, Mode::Editing) => {
                grid.draw_text(Point::new(0, 2), EDIT_HELP, Style::PLAIN.with_fg(FG_DIM));
            }
            (None, Mode::View) => {
                grid.draw_text(Point::new(0, 2), HELP_LINE, Style::PLAIN.with_fg(FG_DIM));
            }
        }
    }
}

impl Model for MazeModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::debug!(
                    "visualizer started with depth {} target {}",
                    self.puzzle.depth,
                    self.puzzle.target
                );
                None
            }
            Msg::Tick { .. } => {
                self.tick();
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown { ref key, .. } if self.mode == Mode::View => self.update_view(key.clone()),
            _ if self.mode == Mode::Editing => self.update_editing(msg),
            _ => None,
        }
    }

    fn draw(&self, grid: &Grid) {
        grid.fill(Cell::BLANK);
        self.draw_map(&grid.slice(Range::sized(UI_WIDTH, MAP_HEIGHT)));
        self.draw_status(&grid.slice(Range::new(0, MAP_HEIGHT, UI_WIDTH, UI_HEIGHT)));
        if let (Mode::Editing, Some(editor)) = (self.mode, &self.editor) {
            let area = grid.slice(Range::new(20, 6, 60, 12));
            area.fill(Cell::BLANK);
            editor.draw(&area);
        }
    }
}
