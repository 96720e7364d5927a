//! Relic rewards
//!
//! Tier pools are consumed from the front (combat and chest rewards) or the
//! back (shops). An empty tier falls through to the next one on its chain;
//! the end of each chain is a placeholder relic that is never in any pool.
//! Shop relics fall back to uncommon only.

use serde::{Deserialize, Serialize};
use spire_rng::{Draw, RngError};

use crate::catalog::{PoolEnd, RelicPools, RelicTier, BOSS_PLACEHOLDER, PLACEHOLDER_RELIC};
use crate::config::RelicChances;

/// Result of taking a relic from the pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelicTake {
    Relic(String),
    /// Every tier on the chain was empty
    Placeholder(String),
}

impl RelicTake {
    pub fn id(&self) -> &str {
        match self {
            RelicTake::Relic(id) | RelicTake::Placeholder(id) => id,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RelicTake::Placeholder(_))
    }
}

/// Tier roll on a 0-99 range.
pub fn roll_relic_tier<R: Draw>(rng: &mut R, chances: RelicChances) -> Result<RelicTier, RngError> {
    let roll = rng.ranged_int_inclusive(0, 99)?;
    Ok(if roll < chances.common {
        RelicTier::Common
    } else if roll < chances.common + chances.uncommon {
        RelicTier::Uncommon
    } else {
        RelicTier::Rare
    })
}

/// Tiers tried in order for a draw of `tier`, and the placeholder ending
/// the chain.
fn chain(tier: RelicTier) -> (&'static [RelicTier], &'static str) {
    match tier {
        RelicTier::Common => (
            &[RelicTier::Common, RelicTier::Uncommon, RelicTier::Rare],
            PLACEHOLDER_RELIC,
        ),
        RelicTier::Uncommon => (&[RelicTier::Uncommon, RelicTier::Rare], PLACEHOLDER_RELIC),
        RelicTier::Rare => (&[RelicTier::Rare], PLACEHOLDER_RELIC),
        RelicTier::Shop => (&[RelicTier::Shop, RelicTier::Uncommon], PLACEHOLDER_RELIC),
        RelicTier::Boss => (&[RelicTier::Boss], BOSS_PLACEHOLDER),
    }
}

impl RelicPools {
    /// Roll a tier and take the front relic of that tier.
    pub fn random_relic<R: Draw>(
        &mut self,
        rng: &mut R,
        chances: RelicChances,
    ) -> Result<RelicTake, RngError> {
        let tier = roll_relic_tier(rng, chances)?;
        Ok(self.take(tier, PoolEnd::Front))
    }

    /// Take one relic of `tier` from `end`, cascading through empty tiers.
    pub fn take(&mut self, tier: RelicTier, end: PoolEnd) -> RelicTake {
        let (tiers, placeholder) = chain(tier);
        for &next in tiers {
            if let Some(id) = self.pool_mut(next).take(end) {
                return RelicTake::Relic(id);
            }
        }
        log::warn!("relic pools exhausted from {tier}, handing out {placeholder}");
        RelicTake::Placeholder(placeholder.to_string())
    }

    /// Like [`RelicPools::take`], skipping relics `can_spawn` rejects.
    ///
    /// A rejected relic is gone from its pool; the next attempt comes from
    /// the other end of the pool.
    pub fn take_eligible<F>(&mut self, tier: RelicTier, end: PoolEnd, can_spawn: F) -> RelicTake
    where
        F: Fn(&str) -> bool,
    {
        let mut end = end;
        loop {
            let take = self.take(tier, end);
            match &take {
                RelicTake::Relic(id) if !can_spawn(id) => {
                    log::debug!("relic {id} cannot spawn, drawing again");
                    end = match end {
                        PoolEnd::Front => PoolEnd::Back,
                        PoolEnd::Back => PoolEnd::Front,
                    };
                }
                _ => return take,
            }
        }
    }
}
