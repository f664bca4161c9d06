use blockfall_engine::{Palette, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

const SLOT_SIZE: u16 = 4;

/// The hold slot, showing the held piece in its spawn orientation.
#[derive(Debug)]
pub struct HoldDisplay<'a> {
    piece: Option<&'a Piece>,
    palette: &'a Palette,
    block: Option<BlockWidget<'a>>,
}

impl<'a> HoldDisplay<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            piece: None,
            palette,
            block: None,
        }
    }

    pub fn piece(self, piece: Option<&'a Piece>) -> Self {
        Self { piece, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        SLOT_SIZE * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        SLOT_SIZE * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for HoldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &HoldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let slot_area = area.centered(
            Constraint::Length(SLOT_SIZE * CellDisplay::width()),
            Constraint::Length(SLOT_SIZE * CellDisplay::height()),
        );
        let col_constraints = (0..SLOT_SIZE).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..SLOT_SIZE).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = slot_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let empty_cell = CellDisplay::from_color(None, false);
        let Some(piece) = self.piece else {
            for cell in grid_rows.flatten() {
                Widget::render(&empty_cell, cell, buf);
            }
            return;
        };

        let filled_cell = CellDisplay::from_color(Some(self.palette.color(piece.color())), false);
        for (row, grid_row) in grid_rows.enumerate() {
            for (col, grid_cell) in grid_row.into_iter().enumerate() {
                if piece.kind().is_occupied(0, (row, col)) {
                    Widget::render(&filled_cell, grid_cell, buf);
                } else {
                    Widget::render(&empty_cell, grid_cell, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{ColorIndex, PieceKind};
    use ratatui::style::Color;

    use super::*;

    #[test]
    fn test_renders_held_piece_in_spawn_orientation() {
        let palette = Palette::DEFAULT;
        let mut piece = Piece::new(PieceKind::I, ColorIndex::new(2).unwrap(), 5, 5);
        piece.rotate_forward();

        let display = HoldDisplay::new(&palette).piece(Some(&piece));
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let expected = Color::Rgb(100, 179, 179);
        let filled: Vec<(u16, u16)> = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].bg == expected)
            .collect();
        // I piece at rotation 0 occupies column 1 of the 4x4 slot
        assert_eq!(filled.len(), 8);
        assert!(filled.iter().all(|&(x, _)| x == 2 || x == 3));
    }

    #[test]
    fn test_empty_slot_has_no_color() {
        let palette = Palette::DEFAULT;
        let display = HoldDisplay::new(&palette).block(BlockWidget::bordered());
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        assert_eq!((area.width, area.height), (10, 6));
        for y in 1..area.height - 1 {
            for x in 1..area.width - 1 {
                assert_eq!(buf[(x, y)].bg, Color::Rgb(0, 0, 0), "({x}, {y})");
            }
        }
    }
}
