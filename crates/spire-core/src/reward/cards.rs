//! Card rewards

use serde::{Deserialize, Serialize};
use spire_rng::Draw;

use super::{PityState, RewardContext};
use crate::catalog::{CardPools, Pool, Rarity};
use crate::config::CardRarityOdds;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCard {
    pub id: String,
    pub rarity: Rarity,
    pub upgraded: bool,
}

/// One rarity roll on the card stream, biased by the blizzard.
///
/// The roll is drawn even when `odds` is `None` (boss rooms), which always
/// yield a rare.
pub fn roll_card_rarity<R: Draw>(
    rng: &mut R,
    pity: &PityState,
    odds: Option<CardRarityOdds>,
) -> Result<Rarity> {
    let roll = rng.bounded_int_inclusive(99)? + pity.card_blizzard;
    let Some(odds) = odds else {
        return Ok(Rarity::Rare);
    };
    Ok(if roll < odds.rare {
        Rarity::Rare
    } else if roll < odds.rare + odds.uncommon {
        Rarity::Uncommon
    } else {
        Rarity::Common
    })
}

/// Uniform pick from `pool` on the card stream.
pub(crate) fn pick<R: Draw>(rng: &mut R, pool: &[&str], name: &str) -> Result<String> {
    if pool.is_empty() {
        return Err(CoreError::EmptyPool {
            pool: name.to_string(),
        });
    }
    let idx = rng.bounded_int_inclusive(pool.len() as i32 - 1)? as usize;
    Ok(pool[idx].to_string())
}

fn pool_ids(pool: &Pool) -> Vec<&str> {
    pool.items().iter().map(String::as_str).collect()
}

/// Roll a card reward on the card stream.
///
/// Per card: rarity roll, blizzard update, then picks in that rarity's pool
/// until the id is new to this reward. Once every card is chosen, each
/// non-rare card gets one upgrade roll, drawn even at a zero chance.
pub fn card_reward<R: Draw>(
    rng: &mut R,
    pools: &CardPools,
    pity: &mut PityState,
    ctx: &RewardContext,
) -> Result<Vec<RewardCard>> {
    ctx.validate()?;
    let odds = ctx.tables.card_odds(ctx.room);
    let mut cards: Vec<RewardCard> = Vec::with_capacity(ctx.card_count);

    for _ in 0..ctx.card_count {
        let rarity = roll_card_rarity(rng, pity, odds)?;
        pity.record_card(rarity);

        let ids = pool_ids(pools.for_rarity(rarity));
        let fresh = ids
            .iter()
            .filter(|id| !cards.iter().any(|c| c.id == **id))
            .count();
        if fresh == 0 {
            return Err(CoreError::EmptyPool {
                pool: format!("{rarity} cards"),
            });
        }
        let id = loop {
            let id = pick(rng, &ids, "cards")?;
            if !cards.iter().any(|c| c.id == id) {
                break id;
            }
        };
        cards.push(RewardCard {
            id,
            rarity,
            upgraded: false,
        });
    }

    let chance = ctx.tables.upgrade_chance(ctx.act, ctx.ascension);
    for card in cards.iter_mut().filter(|c| c.rarity != Rarity::Rare) {
        card.upgraded = rng.bool_chance(chance);
    }
    Ok(cards)
}
