use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// An application driven at a fixed frame rate by [`Runtime::run`].
///
/// State changes happen in [`update`](Self::update), once per frame, and in
/// [`handle_event`](Self::handle_event), once per terminal event. The screen
/// is redrawn after either of them.
pub trait App {
    /// Called after terminal setup, before the first frame.
    ///
    /// The default does nothing, which leaves frames disabled until
    /// [`Runtime::set_frame_rate`] is called.
    fn init(&mut self, runtime: &mut Runtime) {
        let _ = runtime;
    }

    fn should_exit(&self) -> bool;

    /// Key input, mouse and resize events.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances by one frame.
    fn update(&mut self, runtime: &mut Runtime);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Idle {
        updates: usize,
    }

    impl App for Idle {
        fn should_exit(&self) -> bool {
            self.updates > 0
        }

        fn handle_event(&mut self, _runtime: &mut Runtime, _event: Event) {}

        fn draw(&self, _frame: &mut Frame) {}

        fn update(&mut self, _runtime: &mut Runtime) {
            self.updates += 1;
        }
    }

    #[test]
    fn test_default_init_keeps_runtime_unchanged() {
        let mut app = Idle { updates: 0 };
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        assert!(!runtime.key_release_events());
        assert!(!app.should_exit());

        app.update(&mut runtime);
        assert!(app.should_exit());
    }
}
