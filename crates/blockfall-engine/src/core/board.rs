use super::piece::Piece;

/// The playing field: a fixed-size grid of palette indices.
///
/// Cells hold `0` when empty and a [`Palette`](super::palette::Palette) index
/// otherwise. Rows are numbered from the top (`0`) to the bottom
/// (`height - 1`), columns from the left.
///
/// # Example
///
/// ```
/// use blockfall_engine::Board;
///
/// let mut board = Board::new(20, 10);
/// board.set_cell(19, 0, 3);
/// assert_eq!(board.cell(19, 0), Some(3));
/// assert_eq!(board.cell(20, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<u8>,
}

impl Board {
    #[must_use]
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![0; height * width],
        }
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Sets the cell at `(row, col)`. Writes outside the grid are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, value: u8) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = value;
        }
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.width.max(1)).take(self.height)
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        (row < self.height).then(|| &self.cells[row * self.width..][..self.width])
    }

    /// Returns `true` when any occupied cell of `piece` is below the bottom row,
    /// outside the side walls, or on a filled cell.
    ///
    /// Rows above the top of the grid are treated as open.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece.board_positions().into_iter().any(|(row, col)| {
            if row >= self.height_i32() || col < 0 || col >= self.width_i32() {
                return true;
            }
            row >= 0 && self.cells[self.offset(row, col)] != 0
        })
    }

    /// Writes the piece's color into every grid cell it occupies.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let color = piece.color().get();
        for (row, col) in piece.board_positions() {
            if let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) {
                self.set_cell(row, col, color);
            }
        }
    }

    /// Removes full rows and returns how many were found.
    ///
    /// Row 0 is never examined. For each full row `i` found while scanning
    /// downward, rows `1..i` move down by one; row 1 keeps its content and
    /// row 0 is untouched. A full row at index 1 is therefore counted but
    /// stays on the board.
    // NOTE: partial shift is the established game behavior (top rows are not
    // blanked). The quirk tests below pin it down.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut count = 0;
        for i in 1..self.height {
            if !self.is_row_full(i) {
                continue;
            }
            count += 1;
            for r in (2..=i).rev() {
                let above = (r - 1) * self.width;
                self.cells.copy_within(above..above + self.width, r * self.width);
            }
        }
        count
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.row(row).is_some_and(|cells| cells.iter().all(|&c| c != 0))
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then_some(row * self.width + col)
    }

    #[expect(clippy::cast_sign_loss)]
    fn offset(&self, row: i32, col: i32) -> usize {
        row as usize * self.width + col as usize
    }

    fn height_i32(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }

    fn width_i32(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }
}
