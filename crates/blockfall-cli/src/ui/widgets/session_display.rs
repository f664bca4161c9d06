use blockfall_engine::{GameSession, GameState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, HoldDisplay, ScoreDisplay, color, style};

/// Full game screen: hold slot and score on the left, the board in the center.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    horizontal_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            horizontal_padding: 1,
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let game = self.session.game();
        let palette = &self.session.config().palette;
        let block_padding = Padding::horizontal(self.horizontal_padding);
        let border_style = match game.state() {
            GameState::Running => color::WHITE,
            GameState::GameOver => color::ORANGE,
        };

        let game_board = {
            let widget = BoardDisplay::new(game.board(), palette)
                .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
            match game.active_piece() {
                Some(piece) => widget.active_piece(piece),
                None => widget,
            }
        };
        let hold_panel = HoldDisplay::new(palette)
            .piece(game.held_piece())
            .block(
                Block::bordered()
                    .title(Line::from("HOLD").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let score_panel = ScoreDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("SCORE").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), score_panel.width())),
            Constraint::Length(game_board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, score_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(score_panel.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let [hold_area] = Layout::horizontal([Constraint::Length(hold_panel.width())])
            .flex(Flex::End)
            .areas(hold_area);
        let [score_area] = Layout::horizontal([Constraint::Length(score_panel.width())])
            .flex(Flex::End)
            .areas(score_area);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);

        let game_board_width = game_board.width();
        hold_panel.render(hold_area, buf);
        score_panel.render(score_area, buf);
        game_board.render(board_area, buf);

        if game.state().is_game_over() {
            let text = Text::from(vec![
                Line::styled("GAME OVER", style::GAME_OVER),
                Line::styled("Press ESC", style::GAME_OVER_HINT),
            ])
            .centered();
            let block = Block::new().style(style::DEFAULT);
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(4));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(2)), buf);
        }
    }
}
