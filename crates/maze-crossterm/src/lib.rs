//! Crossterm terminal driver for the mode-maze visualizer.
//!
//! [`CrosstermDriver`] implements [`maze_core::Driver`]: it forwards key and
//! resize events, emits a [`Msg::Tick`] every tick interval so the model can
//! advance its scans and searches, and writes changed cells to the terminal.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use maze_core::{
    app::{Context, Driver},
    cell::Color,
    grid::Frame,
    messages::{Key, Mods, Msg},
};

/// Default interval between two [`Msg::Tick`] messages.
pub const DEFAULT_TICK: Duration = Duration::from_millis(30);

fn to_ct_color(c: Color) -> CtColor {
    match c {
        Color::Default => CtColor::Reset,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

fn to_mods(mods: KeyModifiers) -> Mods {
    Mods {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        _ => None,
    }
}

fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) if kind != KeyEventKind::Release => Some(Msg::KeyDown {
            key: to_key(code)?,
            modifiers: to_mods(modifiers),
            time: Instant::now(),
        }),
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
            time: Instant::now(),
        }),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tick clock
// ---------------------------------------------------------------------------

/// Fixed-interval tick schedule.
#[derive(Debug, Clone, Copy)]
struct TickClock {
    interval: Duration,
    next: Instant,
}

impl TickClock {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    /// Time left until the next tick.
    fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Whether a tick is due at `now`. Consumes the tick; ticks missed while
    /// the loop was busy are dropped rather than replayed.
    fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    tick: Duration,
    clock: Option<TickClock>,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            tick: DEFAULT_TICK,
            clock: None,
        }
    }

    /// Set the interval between ticks. Zero is raised to one millisecond.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.clock = Some(TickClock::new(self.tick, Instant::now()));
        log::debug!("terminal initialised, tick every {:?}", self.tick);
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let clock = self
            .clock
            .get_or_insert_with(|| TickClock::new(self.tick, Instant::now()));

        // Block until input arrives or the next tick is due.
        if event::poll(clock.remaining(Instant::now()))? {
            while event::poll(Duration::ZERO)? {
                if ctx.is_done() {
                    return Ok(());
                }
                if let Some(msg) = to_msg(event::read()?) {
                    tx.send(msg).ok();
                }
            }
        }

        let now = Instant::now();
        if clock.fire(now) {
            tx.send(Msg::Tick { time: now }).ok();
        }
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();

        for fc in &frame.cells {
            let (p, cell) = (fc.pos, fc.cell);
            queue!(
                stdout,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(cell.style.fg)),
                SetBackgroundColor(to_ct_color(cell.style.bg))
            )?;

            if cell.style.bold {
                queue!(stdout, style::SetAttribute(Attribute::Bold))?;
                write!(stdout, "{}", cell.ch)?;
                queue!(stdout, style::SetAttribute(Attribute::Reset))?;
            } else {
                write!(stdout, "{}", cell.ch)?;
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
