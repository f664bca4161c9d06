use std::iter;

use blockfall_engine::{Board, Palette, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

/// The playing field with locked cells and the falling piece.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    palette: &'a Palette,
    active_piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board, palette: &'a Palette) -> Self {
        Self {
            board,
            palette,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: &'a Piece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        to_u16(self.board.width()) * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        to_u16(self.board.height()) * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// Board cells with the active piece drawn on top.
    ///
    /// Piece cells above the top row are not shown.
    fn compose_cells(&self) -> Vec<Vec<u8>> {
        let mut cells: Vec<Vec<u8>> = self.board.rows().map(<[u8]>::to_vec).collect();
        if let Some(piece) = self.active_piece {
            let color = piece.color().get();
            for (row, col) in piece.board_positions() {
                let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
                    continue;
                };
                if let Some(cell) = cells.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *cell = color;
                }
            }
        }
        cells
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.board.width()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..self.board.height()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let cells = self.compose_cells();
        let row_areas = vertical.split(area);
        for (row_area, row) in iter::zip(row_areas.iter(), &cells) {
            let cell_areas = horizontal.split(*row_area);
            for (cell_area, &cell) in iter::zip(cell_areas.iter(), row) {
                CellDisplay::from_color(self.palette.cell_color(cell), true)
                    .render(*cell_area, buf);
            }
        }
    }
}
