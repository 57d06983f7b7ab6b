//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! The loop is single-threaded. The driver pushes input and [`Msg::Tick`]
//! messages, the model updates and redraws, and only the changed cells are
//! flushed. Steppable work (risk scans, path searches) lives in the model and
//! advances on ticks, so nothing is ever in flight between two messages.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::grid::{compute_frame, Frame, Grid};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token shared between the loop and the driver.
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug)]
pub enum Effect {
    /// Feed another message back into the model before drawing.
    Msg(Msg),
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &Grid);
}

/// Back-end driver (terminal or test harness).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Push pending input messages through `tx`. Drivers emit one
    /// [`Msg::Tick`] per animation frame; the call should return promptly.
    fn poll_msgs(&mut self, ctx: &Context, tx: &Sender<Msg>)
    -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    /// The model, e.g. for inspection after [`run`](App::run) returns.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the Model-View-Update loop until the model returns
    /// [`Effect::End`], a [`Msg::Quit`] arrives, or the driver fails.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let prev = Grid::new(self.width, self.height);
        let curr = Grid::new(self.width, self.height);
        // First frame must paint everything, so `prev` starts different.
        prev.fill(crate::cell::Cell::plain('\0'));

        let result = self.event_loop(&ctx, &tx, &rx, &prev, &curr);
        self.driver.close();
        result
    }

    fn event_loop(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        rx: &Receiver<Msg>,
        prev: &Grid,
        curr: &Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            self.process_pending(rx, ctx, prev, curr)?;
            if ctx.is_done() {
                return Ok(());
            }
            if let Err(e) = self.driver.poll_msgs(ctx, tx) {
                log::error!("driver poll failed: {e}");
                ctx.cancel();
                return Err(e);
            }
        }
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev: &Grid,
        curr: &Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut pending: VecDeque<Msg> = rx.try_iter().collect();
        if pending.is_empty() {
            return Ok(());
        }

        while let Some(msg) = pending.pop_front() {
            let quit = matches!(msg, Msg::Quit);
            match self.model.update(msg) {
                Some(Effect::End) => {
                    ctx.cancel();
                    return Ok(());
                }
                Some(Effect::Msg(next)) => pending.push_front(next),
                None => {}
            }
            if quit {
                ctx.cancel();
                return Ok(());
            }
        }

        self.model.draw(curr);
        let frame = compute_frame(prev, curr);
        if !frame.cells.is_empty() {
            self.driver.flush(frame)?;
        }
        prev.copy_from(curr);
        Ok(())
    }
}
