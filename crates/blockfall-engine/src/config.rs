use serde::{Deserialize, Serialize};

use crate::{core::palette::Palette, core::piece::PiecePosition, engine::DEFAULT_SPAWN};

/// Width and height of a piece's local grid.
const PIECE_GRID_SIZE: usize = 4;

/// Settings for a game session.
///
/// Every field has a default, so a partial JSON document is accepted:
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "level": 5 }"#).unwrap();
/// assert_eq!(config.level, 5);
/// assert_eq!(config.width, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Board rows.
    pub height: usize,
    /// Board columns.
    pub width: usize,
    /// Gravity level; higher is faster.
    pub level: u32,
    /// Frames per second of the driver loop.
    pub fps: u32,
    /// Spawn column of the piece grid's left edge.
    pub spawn_x: i32,
    /// Spawn row of the piece grid's top edge.
    pub spawn_y: i32,
    /// Seed for the piece generator; random when unset.
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 20,
            width: 10,
            level: 2,
            fps: 25,
            spawn_x: DEFAULT_SPAWN.x,
            spawn_y: DEFAULT_SPAWN.y,
            seed: None,
            palette: Palette::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board of {height}x{width} is too small for spawning pieces")]
    BoardTooSmall { height: usize, width: usize },
    #[display("spawn position ({spawn_x}, {spawn_y}) is outside the board")]
    SpawnOutOfBounds { spawn_x: i32, spawn_y: i32 },
    #[display("frame rate must be positive")]
    ZeroFrameRate,
    #[display("level must be positive")]
    ZeroLevel,
}

impl GameConfig {
    #[must_use]
    pub fn spawn_position(&self) -> PiecePosition {
        PiecePosition::new(self.spawn_x, self.spawn_y)
    }

    /// Checks that every piece fits at the spawn position of an empty board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.level == 0 {
            return Err(ConfigError::ZeroLevel);
        }
        let spawn_out_of_bounds = ConfigError::SpawnOutOfBounds {
            spawn_x: self.spawn_x,
            spawn_y: self.spawn_y,
        };
        let (Ok(spawn_x), Ok(spawn_y)) = (usize::try_from(self.spawn_x), usize::try_from(self.spawn_y))
        else {
            return Err(spawn_out_of_bounds);
        };
        if self.height < PIECE_GRID_SIZE || self.width < PIECE_GRID_SIZE {
            return Err(ConfigError::BoardTooSmall {
                height: self.height,
                width: self.width,
            });
        }
        if spawn_x + PIECE_GRID_SIZE > self.width || spawn_y + PIECE_GRID_SIZE > self.height {
            return Err(spawn_out_of_bounds);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Rgb;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.spawn_position(), PiecePosition::new(3, 0));
    }

    #[test]
    fn test_validate_rejects_small_board() {
        let config = GameConfig {
            height: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooSmall {
                height: 3,
                width: 10
            })
        );
    }

    #[test]
    fn test_validate_rejects_spawn_outside_board() {
        let narrow = GameConfig {
            width: 6,
            ..GameConfig::default()
        };
        assert!(matches!(
            narrow.validate(),
            Err(ConfigError::SpawnOutOfBounds { spawn_x: 3, .. })
        ));

        let negative = GameConfig {
            spawn_x: -1,
            ..GameConfig::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::SpawnOutOfBounds { spawn_x: -1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_rates() {
        let no_fps = GameConfig {
            fps: 0,
            ..GameConfig::default()
        };
        assert_eq!(no_fps.validate(), Err(ConfigError::ZeroFrameRate));

        let no_level = GameConfig {
            level: 0,
            ..GameConfig::default()
        };
        assert_eq!(no_level.validate(), Err(ConfigError::ZeroLevel));
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "height": 22, "width": 12, "level": 3, "fps": 30,
            "spawn_x": 4, "spawn_y": 1, "seed": 7,
            "palette": [[0,0,0],[1,1,1],[2,2,2],[3,3,3],[4,4,4],[5,5,5],[6,6,6]]
        }"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.height, 22);
        assert_eq!(config.spawn_position(), PiecePosition::new(4, 1));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.palette.iter().nth(3), Some(Rgb(3, 3, 3)));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        assert!(serde_json::from_str::<GameConfig>(r#"{ "speed": 3 }"#).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::BoardTooSmall {
            height: 2,
            width: 2,
        };
        assert_eq!(err.to_string(), "board of 2x2 is too small for spawning pieces");
        assert_eq!(ConfigError::ZeroLevel.to_string(), "level must be positive");
    }
}
