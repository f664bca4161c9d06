use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::core::{
    board::Board,
    piece::{Piece, PiecePosition},
};

/// Default spawn anchor for new pieces.
pub const DEFAULT_SPAWN: PiecePosition = PiecePosition::new(3, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, derive_more::Display)]
pub enum GameState {
    #[display("running")]
    Running,
    #[display("game over")]
    GameOver,
}

/// The board, the falling and held pieces, score and game state.
///
/// All operations are total: moves and rotations that would collide are
/// silently rejected, and the only terminal condition is
/// [`GameState::GameOver`], entered when a freshly spawned piece collides.
/// Once the game is over every mutating operation except
/// [`reset`](Self::reset) is a no-op.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Game, GameState};
///
/// let mut game = Game::with_seed(20, 10, 42);
/// game.spawn_new_piece();
///
/// game.move_horizontal(-1);
/// game.rotate_forward();
/// game.hard_drop();
///
/// assert_eq!(game.state(), GameState::Running);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active_piece: Option<Piece>,
    held_piece: Option<Piece>,
    hold_available: bool,
    score: u64,
    state: GameState,
    spawn: PiecePosition,
    rng: Pcg32,
}

impl Game {
    /// Creates an empty game with a randomly seeded piece generator.
    ///
    /// No piece is active until [`spawn_new_piece`](Self::spawn_new_piece) is
    /// called.
    #[must_use]
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_rng(height, width, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Creates an empty game whose piece sequence is determined by `seed`.
    #[must_use]
    pub fn with_seed(height: usize, width: usize, seed: u64) -> Self {
        Self::with_rng(height, width, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(height: usize, width: usize, rng: Pcg32) -> Self {
        Self {
            board: Board::new(height, width),
            active_piece: None,
            held_piece: None,
            hold_available: true,
            score: 0,
            state: GameState::Running,
            spawn: DEFAULT_SPAWN,
            rng,
        }
    }

    /// Sets where new and swapped-in pieces are anchored.
    #[must_use]
    pub fn spawn_at(self, spawn: PiecePosition) -> Self {
        Self { spawn, ..self }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.active_piece.as_ref()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<&Piece> {
        self.held_piece.as_ref()
    }

    #[must_use]
    pub fn hold_available(&self) -> bool {
        self.hold_available
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn spawn_position(&self) -> PiecePosition {
        self.spawn
    }

    /// Clears the board, score, hold slot and game state.
    ///
    /// Equivalent to constructing a new game of the given size, except that
    /// the piece generator and spawn position carry over.
    pub fn reset(&mut self, height: usize, width: usize) {
        self.board = Board::new(height, width);
        self.active_piece = None;
        self.held_piece = None;
        self.hold_available = true;
        self.score = 0;
        self.state = GameState::Running;
        tracing::info!(height, width, "game reset");
    }

    /// Replaces the active piece with a new random piece at the spawn position.
    pub fn spawn_new_piece(&mut self) {
        let PiecePosition { x, y } = self.spawn;
        self.active_piece = Some(Piece::random(&mut self.rng, x, y));
    }

    /// Replaces the active piece without checking for collision.
    pub fn set_active_piece(&mut self, piece: Piece) {
        self.active_piece = Some(piece);
    }

    /// Returns whether the active piece overlaps a wall, the floor or a filled cell.
    #[must_use]
    pub fn collides(&self) -> bool {
        self.active_piece
            .as_ref()
            .is_some_and(|piece| self.board.is_colliding(piece))
    }

    pub fn move_horizontal(&mut self, dx: i32) {
        self.try_shift(dx, 0);
    }

    /// Moves the active piece down one row, locking it if it cannot move.
    pub fn move_down_one_step(&mut self) {
        if self.state.is_game_over() || self.active_piece.is_none() {
            return;
        }
        if !self.try_shift(0, 1) {
            self.lock_piece();
        }
    }

    /// Drops the active piece as far as it goes and locks it.
    ///
    /// A piece that already overlaps the board locks one row above where it
    /// stands.
    pub fn hard_drop(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        let Some(piece) = self.active_piece.as_mut() else {
            return;
        };
        while !self.board.is_colliding(piece) {
            piece.shift(0, 1);
        }
        piece.shift(0, -1);
        self.lock_piece();
    }

    pub fn rotate_forward(&mut self) {
        self.try_rotate(Piece::rotate_forward);
    }

    pub fn rotate_backward(&mut self) {
        self.try_rotate(Piece::rotate_backward);
    }

    /// Writes the active piece into the board, clears lines and spawns the
    /// next piece.
    ///
    /// Ends the game if the next piece collides at the spawn position; that
    /// piece stays active so it can still be drawn.
    pub fn lock_piece(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        let Some(piece) = self.active_piece.take() else {
            return;
        };
        self.board.fill_piece(&piece);
        let cleared = self.clear_full_lines();
        tracing::debug!(
            kind = %piece.kind().as_char(),
            x = piece.position().x,
            y = piece.position().y,
            cleared,
            score = self.score,
            "piece locked"
        );

        self.spawn_new_piece();
        self.hold_available = true;
        if self.collides() {
            self.state = GameState::GameOver;
            tracing::info!(score = self.score, "game over");
        }
    }

    /// Clears full lines and adds the square of the count to the score.
    ///
    /// See [`Board::clear_full_lines`] for which rows are examined.
    pub fn clear_full_lines(&mut self) -> usize {
        let cleared = self.board.clear_full_lines();
        let cleared_u64 = cleared as u64;
        self.score += cleared_u64 * cleared_u64;
        cleared
    }

    /// Sets the active piece aside, once per lock cycle.
    ///
    /// With an empty hold slot a new piece is spawned; otherwise the held
    /// piece returns to the spawn position in its held orientation.
    pub fn hold(&mut self) {
        if !self.hold_available || self.state.is_game_over() {
            return;
        }
        let Some(current) = self.active_piece.take() else {
            return;
        };
        self.hold_available = false;
        match self.held_piece.replace(current) {
            None => self.spawn_new_piece(),
            Some(mut held) => {
                let PiecePosition { x, y } = self.spawn;
                held.reset_to(x, y);
                self.active_piece = Some(held);
            }
        }
        tracing::debug!(held = %current.kind().as_char(), "piece held");
    }

    /// Shifts the active piece, reverting if it collides. Returns whether it moved.
    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let Some(piece) = self.active_piece.as_mut() else {
            return false;
        };
        piece.shift(dx, dy);
        if self.board.is_colliding(piece) {
            piece.shift(-dx, -dy);
            return false;
        }
        true
    }

    fn try_rotate(&mut self, rotate: impl FnOnce(&mut Piece)) {
        if self.state.is_game_over() {
            return;
        }
        let Some(piece) = self.active_piece.as_mut() else {
            return;
        };
        let saved = piece.rotation();
        rotate(piece);
        if self.board.is_colliding(piece) {
            piece.set_rotation(saved);
        }
    }
}
