use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{GameConfig, GameSession};
use ratatui_runtime::Runtime;

use crate::{command::play::app::PlayApp, logging, util};

mod app;
mod input;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// JSON file with game settings; flags below override its values
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Board rows [default: 20]
    #[clap(long)]
    pub(crate) height: Option<usize>,
    /// Board columns [default: 10]
    #[clap(long)]
    pub(crate) width: Option<usize>,
    /// Gravity level, higher is faster [default: 2]
    #[clap(long)]
    pub(crate) level: Option<u32>,
    /// Frames per second [default: 25]
    #[clap(long)]
    pub(crate) fps: Option<u32>,
    /// Seed for the piece sequence
    #[clap(long)]
    pub(crate) seed: Option<u64>,
    /// Write logs to this file
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
    /// Log filter directive, e.g. `debug` (falls back to `RUST_LOG`)
    #[clap(long)]
    pub(crate) log_level: Option<String>,
}

impl PlayArg {
    fn load_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::load_game_config(path)?,
            None => GameConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    logging::init(arg.log_file.as_deref(), arg.log_level.as_deref())?;
    let config = arg.load_config()?;

    let mut app = PlayApp::new(GameSession::new(config));
    Runtime::new()
        .with_key_release_events()
        .run(&mut app)
        .context("Terminal I/O failed")?;

    tracing::info!(score = app.session().game().score(), "exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let config = PlayArg::default().load_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let arg = PlayArg {
            height: Some(24),
            level: Some(5),
            seed: Some(11),
            ..PlayArg::default()
        };
        let config = arg.load_config().unwrap();
        assert_eq!(config.height, 24);
        assert_eq!(config.width, 10);
        assert_eq!(config.level, 5);
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let arg = PlayArg {
            width: Some(3),
            ..PlayArg::default()
        };
        let err = arg.load_config().unwrap_err();
        assert!(format!("{err:#}").contains("too small"), "{err:#}");
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = env::temp_dir().join(format!("blockfall-config-{}.json", process::id()));
        fs::write(&path, r#"{ "width": 12, "level": 3, "fps": 30 }"#).unwrap();

        let arg = PlayArg {
            config: Some(path.clone()),
            level: Some(7),
            ..PlayArg::default()
        };
        let config = arg.load_config();
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.fps, 30);
        assert_eq!(config.level, 7);
    }

    #[test]
    fn test_missing_config_file_reports_path() {
        let arg = PlayArg {
            config: Some(PathBuf::from("/nonexistent/blockfall.json")),
            ..PlayArg::default()
        };
        let err = arg.load_config().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/blockfall.json"), "{err}");
    }
}
