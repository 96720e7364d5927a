//! Treasure chests
//!
//! One size roll picks the chest, then one content roll decides both the
//! relic tier and whether gold comes with it.

use serde::{Deserialize, Serialize};
use spire_rng::{Draw, RngError};
use strum::{Display, EnumIter};

use super::round_half_up;
use crate::catalog::RelicTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ChestSize {
    Small,
    Medium,
    Large,
}

impl ChestSize {
    /// `(common, uncommon, gold)` chances in percent.
    pub const fn odds(self) -> (i32, i32, i32) {
        match self {
            ChestSize::Small => (75, 25, 50),
            ChestSize::Medium => (35, 50, 35),
            ChestSize::Large => (0, 75, 50),
        }
    }

    /// Gold amount the random range is centred on.
    pub const fn base_gold(self) -> f32 {
        match self {
            ChestSize::Small => 25.0,
            ChestSize::Medium => 50.0,
            ChestSize::Large => 75.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChestReward {
    pub size: ChestSize,
    pub relic_tier: RelicTier,
    pub gold: Option<i32>,
}

/// Roll a chest on the treasure stream.
pub fn chest_reward<R: Draw>(rng: &mut R) -> Result<ChestReward, RngError> {
    let size = match rng.ranged_int_inclusive(0, 99)? {
        0..=49 => ChestSize::Small,
        50..=82 => ChestSize::Medium,
        _ => ChestSize::Large,
    };

    let (common, uncommon, gold_chance) = size.odds();
    let roll = rng.ranged_int_inclusive(0, 99)?;
    let relic_tier = if roll < common {
        RelicTier::Common
    } else if roll < common + uncommon {
        RelicTier::Uncommon
    } else {
        RelicTier::Rare
    };

    let gold = if roll < gold_chance {
        let base = size.base_gold();
        let amount = rng.float_range(base * 0.9, base * 1.1);
        Some(round_half_up(amount))
    } else {
        None
    };
    Ok(ChestReward {
        size,
        relic_tier,
        gold,
    })
}
