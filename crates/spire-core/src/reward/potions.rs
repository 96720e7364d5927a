//! Potion drops

use serde::{Deserialize, Serialize};
use spire_rng::Draw;

use super::{PityState, RewardContext};
use crate::catalog::{PotionPools, Rarity};
use crate::config::RewardTables;
use crate::dungeon::RoomType;
use crate::error::{CoreError, Result};

/// Reward screens with this many items get no potion.
pub const MAX_REWARD_ITEMS: usize = 4;

/// Outcome of one potion drop roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotionDrop {
    /// Drop chance in percent the roll was compared against
    pub chance: i32,
    pub roll: i32,
    pub potion: Option<String>,
}

/// Drop chance for this context, pity included.
pub fn drop_chance(ctx: &RewardContext, pity: &PityState) -> i32 {
    if ctx.reward_items >= MAX_REWARD_ITEMS {
        0
    } else if ctx.forced_potion {
        100
    } else if matches!(ctx.room, RoomType::Monster | RoomType::Elite | RoomType::Event) {
        ctx.tables.potion_base_chance + pity.potion_chance
    } else {
        0
    }
}

/// Tier roll then a pick within that tier, redrawn while the pick is in
/// `seen`. Shops pass an empty `seen`.
pub fn roll_potion<R: Draw>(
    rng: &mut R,
    pools: &PotionPools,
    tables: &RewardTables,
    seen: &[String],
) -> Result<(String, Rarity)> {
    let tier = rng.ranged_int_inclusive(0, 99)?;
    let rarity = if tier < tables.potion_common {
        Rarity::Common
    } else if tier < tables.potion_uncommon {
        Rarity::Uncommon
    } else {
        Rarity::Rare
    };
    let pool = pools.for_rarity(rarity);
    if pool.items().iter().all(|id| seen.contains(id)) {
        return Err(CoreError::EmptyPool {
            pool: format!("{rarity} potions"),
        });
    }
    loop {
        let idx = rng.bounded_int_inclusive(pool.len() as i32 - 1)? as usize;
        if let Some(id) = pool.get(idx) {
            if !seen.iter().any(|s| s == id) {
                return Ok((id.to_string(), rarity));
            }
        }
    }
}

/// Roll the potion drop for a reward screen on the potion stream.
///
/// The drop roll is always drawn. A miss raises the pity, a hit resets it.
pub fn potion_reward<R: Draw>(
    rng: &mut R,
    pity: &mut PityState,
    pools: &PotionPools,
    ctx: &RewardContext,
    seen: &[String],
) -> Result<PotionDrop> {
    ctx.validate()?;
    let chance = drop_chance(ctx, pity);
    let roll = rng.ranged_int_inclusive(0, 99)?;
    if roll >= chance {
        pity.record_potion(false, ctx.tables.potion_pity_step);
        return Ok(PotionDrop {
            chance,
            roll,
            potion: None,
        });
    }
    pity.record_potion(true, ctx.tables.potion_pity_step);
    let (id, _) = roll_potion(rng, pools, &ctx.tables, seen)?;
    Ok(PotionDrop {
        chance,
        roll,
        potion: Some(id),
    })
}
