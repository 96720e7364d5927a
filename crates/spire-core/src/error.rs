//! Error taxonomy
//!
//! Draw-level failures come from [`spire_rng::RngError`]. Configuration
//! mistakes are caller bugs and are reported when a config is built or
//! validated, never in the middle of generation.

use spire_rng::RngError;
use thiserror::Error;

use crate::stream::{GameEvent, StreamId};

/// Top-level error for every fallible operation in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error(transparent)]
    Rng(#[from] RngError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("pool '{pool}' has no candidates")]
    EmptyPool { pool: String },
}

/// Invalid configuration, detected at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ascension level {0} is out of range (0..={max})", max = crate::config::MAX_ASCENSION)]
    AscensionOutOfRange(u8),

    #[error("unknown act {0}")]
    UnknownAct(u8),

    #[error("chance '{field}' = {value} is outside [0, 1]")]
    InvalidChance { field: &'static str, value: f32 },

    #[error("map grid {width}x{height} is too small")]
    InvalidGrid { width: usize, height: usize },

    #[error("path density must be at least 1")]
    InvalidDensity,

    #[error("invalid config JSON: {0}")]
    Json(String),
}

/// Seed strings that cannot be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("seed string is empty")]
    Empty,

    #[error("invalid seed character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("decimal seed {0} does not fit in 64 bits")]
    DecimalOutOfRange(String),
}

/// Stream registry misuse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("stream {0} has not been seeded")]
    Uninitialized(StreamId),

    #[error("no run in progress")]
    NotStarted,

    #[error("{0} draws depend on run state; run its generator instead")]
    GeneratedEvent(GameEvent),
}

pub type Result<T> = core::result::Result<T, CoreError>;
