//! spire-rng: bit-exact draw streams
//!
//! Rust port of the reference application's random number stack:
//! the xorshift128+ engine, the counted `Random` wrapper built on it, and the
//! runtime LCG used for one-off collection shuffles.
//!
//! Every type here is a plain value. Copying a [`SpireRng`] is a snapshot;
//! there is no shared state to lock.

mod draw;
mod lcg;
mod trace;
mod xs128;

pub use draw::{Draw, RngSnapshot, SpireRng};
pub use lcg::JavaRandom;
pub use trace::{first_divergence, RngTraceEntry, Traced};
pub use xs128::{murmur_hash3, Xs128};

/// Draw requests that cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RngError {
    #[error("{func}: invalid bound [{low}, {high}]")]
    InvalidBound {
        func: &'static str,
        low: i64,
        high: i64,
    },
}
