use std::{io, time::Instant};

use crossterm::event::{self, Event};

use crate::frame_clock::FrameClock;

/// What the runtime should do next.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum LoopEvent {
    /// A frame deadline was reached; advance the application.
    Frame,
    /// State changed since the last draw.
    Redraw,
    /// Key input, mouse or resize from the terminal.
    Input(Event),
}

/// Event loop state management.
///
/// Frames fire on the [`FrameClock`]; a render is requested after every
/// frame or input event; otherwise the loop waits for input until the next
/// frame deadline.
#[derive(Debug)]
pub(super) struct EventLoop {
    clock: FrameClock,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with frames disabled.
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(Instant::now()),
            dirty: true, // Initial render is required on startup
        }
    }

    pub(super) fn set_frame_rate(&mut self, rate: Option<f64>) {
        self.clock.set_rate(rate, Instant::now());
    }

    /// Returns the next event.
    ///
    /// Blocks until a frame deadline is reached or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if self.clock.is_due(now) {
                self.clock.mark(now);
                self.dirty = true;
                return Ok(LoopEvent::Frame);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(LoopEvent::Redraw);
            }

            if let Some(timeout) = self.clock.poll_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
