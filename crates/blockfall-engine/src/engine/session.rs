use crate::{
    config::GameConfig,
    engine::game::{Game, GameState},
};

/// Frame counter value at which [`GravityTimer`] wraps back to zero.
const FRAME_COUNTER_WRAP: u64 = 100_000;

/// Discrete input commands sent by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Command {
    #[display("rotate forward")]
    RotateForward,
    #[display("rotate backward")]
    RotateBackward,
    #[display("hold")]
    Hold,
    #[display("move left")]
    MoveLeft,
    #[display("move right")]
    MoveRight,
    #[display("hard drop")]
    HardDrop,
    /// A single soft-drop step, for drivers that cannot report key releases.
    #[display("soft drop step")]
    SoftDropStep,
    /// Soft-drop key went down; the piece falls every frame until released.
    #[display("soft drop pressed")]
    SoftDropPressed,
    #[display("soft drop released")]
    SoftDropReleased,
    #[display("reset")]
    Reset,
}

/// Fixed-frame gravity cadence.
///
/// The piece falls one row every `fps / level / 2` frames (floor division,
/// at least one frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityTimer {
    ticks_per_drop: u64,
    frame: u64,
}

impl GravityTimer {
    #[must_use]
    pub fn new(fps: u32, level: u32) -> Self {
        Self {
            ticks_per_drop: ticks_per_drop(fps, level),
            frame: 0,
        }
    }

    #[must_use]
    pub fn ticks_per_drop(&self) -> u64 {
        self.ticks_per_drop
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances one frame and returns whether gravity applies on it.
    pub fn advance(&mut self) -> bool {
        self.frame += 1;
        if self.frame > FRAME_COUNTER_WRAP {
            self.frame = 0;
        }
        self.frame % self.ticks_per_drop == 0
    }

    pub fn restart(&mut self) {
        self.frame = 0;
    }
}

fn ticks_per_drop(fps: u32, level: u32) -> u64 {
    u64::from(fps / level.max(1) / 2).max(1)
}

/// A game plus the per-frame driver state around it.
///
/// Owns what a driver loop would otherwise keep in loose variables: the
/// gravity frame counter and whether soft drop is held. The driver calls
/// [`apply`](Self::apply) for each input command and
/// [`advance_frame`](Self::advance_frame) once per frame, then reads
/// [`game`](Self::game) to render.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Command, GameConfig, GameSession};
///
/// let config = GameConfig { seed: Some(1), ..GameConfig::default() };
/// let mut session = GameSession::new(config);
///
/// session.apply(Command::MoveLeft);
/// for _ in 0..25 {
///     session.advance_frame();
/// }
/// assert!(session.game().active_piece().unwrap().position().y > 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    game: Game,
    gravity: GravityTimer,
    soft_drop_held: bool,
}

impl GameSession {
    /// Starts a session with a piece already falling.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let game = new_game(&config);
        let gravity = GravityTimer::new(config.fps, config.level);
        tracing::info!(
            height = config.height,
            width = config.width,
            level = config.level,
            fps = config.fps,
            ticks_per_drop = gravity.ticks_per_drop(),
            "session started"
        );
        let mut session = Self {
            config,
            game,
            gravity,
            soft_drop_held: false,
        };
        session.game.spawn_new_piece();
        session
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn gravity(&self) -> &GravityTimer {
        &self.gravity
    }

    #[must_use]
    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game.state().is_game_over()
    }

    /// Applies one input command. After game over only [`Command::Reset`] has an effect.
    pub fn apply(&mut self, command: Command) {
        if self.is_game_over() && command != Command::Reset {
            return;
        }
        tracing::trace!(%command, "command");
        match command {
            Command::RotateForward => self.game.rotate_forward(),
            Command::RotateBackward => self.game.rotate_backward(),
            Command::Hold => self.game.hold(),
            Command::MoveLeft => self.game.move_horizontal(-1),
            Command::MoveRight => self.game.move_horizontal(1),
            Command::HardDrop => self.game.hard_drop(),
            Command::SoftDropStep => self.game.move_down_one_step(),
            Command::SoftDropPressed => self.soft_drop_held = true,
            Command::SoftDropReleased => self.soft_drop_held = false,
            Command::Reset => self.reset(),
        }
    }

    /// Runs one frame: applies gravity when due or while soft drop is held.
    pub fn advance_frame(&mut self) {
        if self.game.active_piece().is_none() {
            self.game.spawn_new_piece();
        }
        let gravity_due = self.gravity.advance();
        if (gravity_due || self.soft_drop_held) && self.game.state() == GameState::Running {
            self.game.move_down_one_step();
        }
    }

    /// Starts over with an empty board of the configured size.
    pub fn reset(&mut self) {
        self.game.reset(self.config.height, self.config.width);
        self.game.spawn_new_piece();
        self.gravity.restart();
        self.soft_drop_held = false;
    }
}

fn new_game(config: &GameConfig) -> Game {
    let game = match config.seed {
        Some(seed) => Game::with_seed(config.height, config.width, seed),
        None => Game::new(config.height, config.width),
    };
    game.spawn_at(config.spawn_position())
}
