pub use self::{
    config::{ConfigError, GameConfig},
    core::*,
    engine::*,
};

pub mod config;
pub mod core;
pub mod engine;
