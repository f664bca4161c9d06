use std::io;

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use ratatui::DefaultTerminal;

use crate::{
    App,
    event_loop::{EventLoop, LoopEvent},
};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
    want_key_releases: bool,
    key_releases: bool,
}

impl Runtime {
    /// Creates a new Runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame rate (frames per second); `None` stops frame events.
    pub fn set_frame_rate(&mut self, rate: Option<f64>) {
        self.events.set_frame_rate(rate);
    }

    /// Asks the terminal to report key release events when it supports it.
    ///
    /// Must be called before [`run`](Self::run).
    #[must_use]
    pub fn with_key_release_events(self) -> Self {
        Self {
            want_key_releases: true,
            ..self
        }
    }

    /// Returns whether key release events are being reported.
    #[must_use]
    pub fn key_release_events(&self) -> bool {
        self.key_releases
    }

    /// Runs the application.
    ///
    /// 1. Sets up the terminal and calls `app.init()`
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - frame deadline: calls `app.update()`
    ///    - redraw request: calls `app.draw()`
    ///    - terminal event: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            self.key_releases = self.want_key_releases && enable_key_releases()?;
            app.init(&mut self);

            let result = self.event_loop(terminal, app);

            if self.key_releases {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }

    fn event_loop<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                LoopEvent::Frame => {
                    app.update(self);
                }
                LoopEvent::Redraw => {
                    terminal.draw(|f| app.draw(f))?;
                }
                LoopEvent::Input(event) => {
                    app.handle_event(self, event);
                }
            }
        }
        Ok(())
    }
}

fn enable_key_releases() -> io::Result<bool> {
    if !terminal::supports_keyboard_enhancement()? {
        tracing::info!("terminal does not report key releases");
        return Ok(false);
    }
    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )?;
    tracing::debug!("key release reporting enabled");
    Ok(true)
}
