use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::palette::ColorIndex;

/// A falling piece (tetromino): kind, color, rotation state and anchor.
///
/// The shape of each rotation state is looked up in a static rotation table
/// as a set of offsets into a 4×4 local grid:
///
/// ```text
///  0  1  2  3
///  4  5  6  7
///  8  9 10 11
/// 12 13 14 15
/// ```
///
/// The anchor ([`PiecePosition`]) is the board coordinate of the local grid's
/// top-left corner. Unlike the board cells it may be negative, since empty
/// columns of the local grid are allowed to hang past the left wall.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ColorIndex, Piece, PieceKind};
///
/// let color = ColorIndex::new(1).unwrap();
/// let mut piece = Piece::new(PieceKind::T, color, 3, 0);
/// assert_eq!(piece.cells().collect::<Vec<_>>(), [1, 4, 5, 6]);
///
/// piece.rotate_forward();
/// assert_eq!(piece.cells().collect::<Vec<_>>(), [1, 4, 5, 9]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    color: ColorIndex,
    rotation: usize,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece in its base orientation anchored at `(x, y)`.
    #[must_use]
    pub const fn new(kind: PieceKind, color: ColorIndex, x: i32, y: i32) -> Self {
        Self {
            kind,
            color,
            rotation: 0,
            position: PiecePosition::new(x, y),
        }
    }

    /// Creates a piece with a random kind and color anchored at `(x, y)`.
    pub fn random<R>(rng: &mut R, x: i32, y: i32) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(rng.random(), rng.random(), x, y)
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn color(&self) -> ColorIndex {
        self.color
    }

    /// Index of the current rotation state, in `0..self.rotation_count()`.
    #[must_use]
    pub const fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub const fn rotation_count(&self) -> usize {
        self.kind.rotation_count()
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    /// Occupied local offsets (`0..16`) of the current rotation state.
    pub fn cells(&self) -> impl Iterator<Item = u8> + Clone + '_ {
        self.kind.cells(self.rotation)
    }

    /// Occupied cells of the current rotation as local `(row, col)` pairs.
    pub fn local_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells()
            .map(|offset| (i32::from(offset / 4), i32::from(offset % 4)))
    }

    /// Occupied cells translated to board `(row, col)` coordinates.
    ///
    /// Coordinates are not clipped to any board; callers test them with
    /// [`Board::is_colliding`](super::board::Board::is_colliding).
    #[must_use]
    pub fn board_positions(&self) -> ArrayVec<(i32, i32), 4> {
        let PiecePosition { x, y } = self.position;
        self.local_positions()
            .map(|(row, col)| (row + y, col + x))
            .collect()
    }

    pub fn rotate_forward(&mut self) {
        self.rotation = (self.rotation + 1) % self.rotation_count();
    }

    pub fn rotate_backward(&mut self) {
        let count = self.rotation_count();
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Restores a rotation state saved from [`rotation`](Self::rotation).
    pub(crate) fn set_rotation(&mut self, rotation: usize) {
        self.rotation = rotation % self.rotation_count();
    }

    /// Moves the anchor by `(dx, dy)`.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Moves the anchor to `(x, y)` without touching the rotation state.
    pub fn reset_to(&mut self, x: i32, y: i32) -> &mut Self {
        self.position = PiecePosition::new(x, y);
        self
    }
}

/// Board coordinates of a piece's 4×4 local grid origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The seven tetromino shapes, in rotation table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// Z-piece.
    Z = 1,
    /// S-piece.
    S = 2,
    /// J-piece.
    J = 3,
    /// L-piece.
    L = 4,
    /// T-piece.
    T = 5,
    /// O-piece.
    O = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
        PieceKind::O,
    ];

    const fn rotations(self) -> &'static [RotationState] {
        ROTATION_TABLE[self as usize]
    }

    /// Number of distinct rotation states (1, 2 or 4).
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        self.rotations().len()
    }

    /// Occupied local offsets of the given rotation state.
    ///
    /// `rotation` wraps modulo [`rotation_count`](Self::rotation_count).
    pub fn cells(self, rotation: usize) -> impl Iterator<Item = u8> + Clone {
        let rotations = self.rotations();
        rotations[rotation % rotations.len()].iter().copied()
    }

    /// Returns whether the local `(row, col)` cell is occupied in the given rotation.
    #[must_use]
    pub fn is_occupied(self, rotation: usize, (row, col): (usize, usize)) -> bool {
        row < 4 && col < 4 && self.cells(rotation).any(|offset| usize::from(offset) == row * 4 + col)
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
            PieceKind::O => 'O',
        }
    }
}

/// Occupied offsets of one rotation state in the 4×4 local grid.
type RotationState = [u8; 4];

const ROTATION_TABLE: [&[RotationState]; PieceKind::LEN] = [
    // I-piece
    &[[1, 5, 9, 13], [4, 5, 6, 7]],
    // Z-piece
    &[[4, 5, 9, 10], [2, 6, 5, 9]],
    // S-piece
    &[[6, 7, 9, 10], [1, 5, 6, 10]],
    // J-piece
    &[[1, 2, 5, 9], [0, 4, 5, 6], [1, 5, 9, 8], [4, 5, 6, 10]],
    // L-piece
    &[[1, 2, 6, 10], [5, 6, 7, 9], [2, 6, 10, 11], [3, 5, 6, 7]],
    // T-piece
    &[[1, 4, 5, 6], [1, 4, 5, 9], [4, 5, 6, 9], [1, 5, 6, 9]],
    // O-piece
    &[[1, 2, 5, 6]],
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn color() -> ColorIndex {
        ColorIndex::new(1).unwrap()
    }

    #[test]
    fn test_rotation_states_are_valid() {
        for kind in PieceKind::ALL {
            for rotation in 0..kind.rotation_count() {
                let cells: Vec<u8> = kind.cells(rotation).collect();
                let distinct: HashSet<u8> = cells.iter().copied().collect();
                assert!(
                    (1..=4).contains(&cells.len()),
                    "{kind:?}#{rotation} has {} cells",
                    cells.len()
                );
                assert_eq!(distinct.len(), cells.len(), "{kind:?}#{rotation} repeats cells");
                assert!(cells.iter().all(|&c| c < 16), "{kind:?}#{rotation} out of 4x4 grid");
            }
        }
    }

    #[test]
    fn test_rotation_counts() {
        let counts: Vec<usize> = PieceKind::ALL.iter().map(|k| k.rotation_count()).collect();
        assert_eq!(counts, [2, 2, 2, 4, 4, 4, 1]);
    }

    #[test]
    fn test_rotate_forward_round_trip() {
        for kind in PieceKind::ALL {
            let mut piece = Piece::new(kind, color(), 3, 0);
            piece.rotate_forward();
            let start = piece.rotation();
            for _ in 0..piece.rotation_count() {
                piece.rotate_forward();
            }
            assert_eq!(piece.rotation(), start, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_backward_round_trip_and_wrap() {
        for kind in PieceKind::ALL {
            let mut piece = Piece::new(kind, color(), 3, 0);
            piece.rotate_backward();
            assert_eq!(
                piece.rotation(),
                kind.rotation_count() - 1,
                "{kind:?} should wrap from 0 to the last state"
            );
            for _ in 0..piece.rotation_count() {
                piece.rotate_backward();
                assert!(piece.rotation() < piece.rotation_count());
            }
            assert_eq!(piece.rotation(), kind.rotation_count() - 1, "{kind:?}");
        }
    }

    #[test]
    fn test_forward_then_backward_is_identity() {
        let mut piece = Piece::new(PieceKind::J, color(), 3, 0);
        piece.rotate_forward();
        piece.rotate_forward();
        piece.rotate_backward();
        assert_eq!(piece.rotation(), 1);
    }

    #[test]
    fn test_cells_are_restartable() {
        let piece = Piece::new(PieceKind::L, color(), 0, 0);
        let cells = piece.cells();
        let first: Vec<u8> = cells.clone().collect();
        let second: Vec<u8> = cells.collect();
        assert_eq!(first, second);
        assert_eq!(first, [1, 2, 6, 10]);
    }

    #[test]
    fn test_board_positions_apply_anchor() {
        let mut piece = Piece::new(PieceKind::I, color(), 3, 0);
        piece.rotate_forward();
        let positions: Vec<_> = piece.board_positions().into_iter().collect();
        assert_eq!(positions, [(1, 3), (1, 4), (1, 5), (1, 6)]);

        piece.shift(-4, 2);
        let positions: Vec<_> = piece.board_positions().into_iter().collect();
        assert_eq!(positions, [(3, -1), (3, 0), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_reset_to_keeps_rotation() {
        let mut piece = Piece::new(PieceKind::T, color(), 5, 12);
        piece.rotate_forward();
        let position = piece.reset_to(3, 0).position();
        assert_eq!(position, PiecePosition::new(3, 0));
        assert_eq!(piece.rotation(), 1);
    }

    #[test]
    fn test_is_occupied_matches_cells() {
        assert!(PieceKind::O.is_occupied(0, (0, 1)));
        assert!(PieceKind::O.is_occupied(0, (1, 2)));
        assert!(!PieceKind::O.is_occupied(0, (0, 0)));
        assert!(!PieceKind::O.is_occupied(0, (4, 0)));
    }

    #[test]
    fn test_random_pieces_cover_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let kinds: HashSet<PieceKind> = (0..500)
            .map(|_| Piece::random(&mut rng, 3, 0).kind())
            .collect();
        assert_eq!(kinds.len(), PieceKind::LEN);
    }
}
