//! spire-core: deterministic run generation
//!
//! Map layout and reward rolls for a seeded run, reproduced draw for draw on
//! top of the streams in `spire-rng`. The crate has no I/O; callers feed it a
//! seed and a sequence of game events and read back maps, rewards and the
//! counter of every stream.

pub mod catalog;
pub mod config;
pub mod cosmetic;
pub mod dungeon;
pub mod error;
pub mod hash_order;
pub mod reward;
pub mod run;
pub mod seed;
pub mod stream;

pub use config::{MapConfig, MapModifiers, RewardTables, RunConfig};
pub use dungeon::{RoomGraph, RoomType};
pub use error::{ConfigError, CoreError, Result, SeedError, StreamError};
pub use run::RunState;
pub use seed::Seed;
pub use stream::{StreamId, StreamRegistry};
