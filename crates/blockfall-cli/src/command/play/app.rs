use blockfall_engine::GameSession;
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use ratatui_runtime::{App, Runtime};

use crate::{
    command::play::input::{self, Action},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["Space"], "Hard Drop"),
    (&["Z", "X"], "Rotate"),
    (&["↑"], "Hold"),
    (&["Esc"], "Reset"),
    (&["Q"], "Quit"),
];

const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["Esc"], "Reset"), (&["Q"], "Quit")];

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    key_releases: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            key_releases: false,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Game(command) => self.session.apply(command),
            Action::Quit => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(Some(f64::from(self.session.config().fps)));
        self.key_releases = runtime.key_release_events();
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event()
            && let Some(action) = input::map_key(&key, self.key_releases)
        {
            self.handle_action(action);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = if self.session.is_game_over() {
            GAME_OVER_BINDINGS
        } else {
            PLAYING_BINDINGS
        };
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.session.advance_frame();
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::GameConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app() -> PlayApp {
        PlayApp::new(GameSession::new(GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        }))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_key_exits() {
        let mut app = app();
        let mut runtime = Runtime::new();
        assert!(!app.should_exit());
        app.handle_event(&mut runtime, key(KeyCode::Char('q')));
        assert!(app.should_exit());
    }

    #[test]
    fn test_hard_drop_key_locks_piece() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.handle_event(&mut runtime, key(KeyCode::Char(' ')));
        let filled = app
            .session()
            .game()
            .board()
            .rows()
            .flatten()
            .filter(|&&c| c != 0)
            .count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn test_update_applies_gravity() {
        let mut app = app();
        let mut runtime = Runtime::new();
        for _ in 0..6 {
            app.update(&mut runtime);
        }
        let y = app.session().game().active_piece().unwrap().position().y;
        assert_eq!(y, 1);
    }

    #[test]
    fn test_draw_shows_score_and_game_over() {
        let mut app = app();
        let mut runtime = Runtime::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        terminal.draw(|f| app.draw(f)).unwrap();
        let screen = format!("{:?}", terminal.backend().buffer());
        assert!(screen.contains("SCORE"));
        assert!(screen.contains("HOLD"));
        assert!(!screen.contains("GAME OVER"));

        while !app.session().is_game_over() {
            app.handle_event(&mut runtime, key(KeyCode::Char(' ')));
        }
        terminal.draw(|f| app.draw(f)).unwrap();
        let screen = format!("{:?}", terminal.backend().buffer());
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Press ESC"));
    }
}
