//! Game rules and the driver-facing session.
//!
//! - [`Game`] - board, falling piece, hold slot, score and game state
//! - [`GameSession`] - a game plus gravity timing and soft-drop state
//! - [`Command`] - discrete inputs a driver feeds into a session
//!
//! # Game Flow
//!
//! 1. A new piece spawns at the spawn position
//! 2. The player moves, rotates or holds it; gravity moves it down
//! 3. When it cannot move down it locks, full lines clear and score increases
//! 4. The next piece spawns; if it collides immediately the game is over
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Command, GameConfig, GameSession};
//!
//! let mut session = GameSession::new(GameConfig::default());
//!
//! session.apply(Command::RotateForward);
//! session.apply(Command::HardDrop);
//! session.advance_frame();
//!
//! if session.is_game_over() {
//!     println!("Game over! Score: {}", session.game().score());
//! }
//! ```

pub use self::{game::*, session::*};

mod game;
mod session;
