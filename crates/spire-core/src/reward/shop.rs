//! Merchant stock
//!
//! Card choices come off the card stream, prices and the sale slot off the
//! merchant stream, potion choices off the potion stream. Relics leave their
//! pools from the back.

use serde::{Deserialize, Serialize};
use spire_rng::{Draw, RngError};

use super::cards::{pick, roll_card_rarity};
use super::potions::roll_potion;
use super::{round_half_up, PityState, RewardContext};
use crate::catalog::{
    relic_def, CardPools, CardType, PoolEnd, PotionPools, Rarity, RelicPools, RelicTier,
};
use crate::dungeon::RoomType;
use crate::error::{CoreError, Result};
use crate::stream::{StreamId, StreamRegistry};

pub const PURGE_COST: i32 = 75;
/// Colorless cards cost this much more than colored ones.
pub const COLORLESS_MARKUP: f32 = 1.2;
/// Price multiplier at high ascension.
pub const ASCENSION_MARKUP: f32 = 1.1;

/// Colored card slots in shelf order.
pub const CARD_SLOTS: [CardType; 5] = [
    CardType::Attack,
    CardType::Attack,
    CardType::Skill,
    CardType::Skill,
    CardType::Power,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopCard {
    pub id: String,
    pub rarity: Rarity,
    pub colorless: bool,
    pub price: i32,
    pub on_sale: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopRelic {
    pub id: String,
    pub tier: RelicTier,
    pub price: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopPotion {
    pub id: String,
    pub rarity: Rarity,
    pub price: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShopInventory {
    pub cards: Vec<ShopCard>,
    pub colorless: Vec<ShopCard>,
    pub relics: Vec<ShopRelic>,
    pub potions: Vec<ShopPotion>,
    pub purge_cost: i32,
}

const fn card_price(rarity: Rarity) -> f32 {
    match rarity {
        Rarity::Basic | Rarity::Common => 50.0,
        Rarity::Uncommon => 75.0,
        Rarity::Rare => 150.0,
    }
}

const fn relic_price(tier: RelicTier) -> f32 {
    match tier {
        RelicTier::Common | RelicTier::Shop => 150.0,
        RelicTier::Uncommon => 250.0,
        RelicTier::Rare => 300.0,
        RelicTier::Boss => 999.0,
    }
}

const fn potion_price(rarity: Rarity) -> f32 {
    match rarity {
        Rarity::Basic | Rarity::Common => 50.0,
        Rarity::Uncommon => 75.0,
        Rarity::Rare => 100.0,
    }
}

/// A card of `kind` at `rarity`, stepping to a neighbouring rarity when the
/// pool has none of that type.
fn card_of_type<R: Draw>(
    rng: &mut R,
    pools: &CardPools,
    rarity: Rarity,
    kind: CardType,
) -> Result<(String, Rarity)> {
    let mut rarity = rarity;
    let mut tried = Vec::new();
    loop {
        let ids = pools.of_type(rarity, kind);
        if !ids.is_empty() {
            return Ok((pick(rng, &ids, "shop cards")?, rarity));
        }
        if tried.contains(&rarity) {
            return Err(CoreError::EmptyPool {
                pool: format!("{kind} cards"),
            });
        }
        tried.push(rarity);
        log::debug!("no {rarity} {kind} cards, trying another rarity");
        rarity = match rarity {
            Rarity::Rare => Rarity::Uncommon,
            Rarity::Uncommon if kind == CardType::Power => Rarity::Rare,
            Rarity::Uncommon => Rarity::Common,
            Rarity::Common | Rarity::Basic => Rarity::Uncommon,
        };
    }
}

/// Relic tier roll used for the two rolled shelf relics.
fn roll_shop_relic_tier<R: Draw>(rng: &mut R) -> std::result::Result<RelicTier, RngError> {
    Ok(match rng.bounded_int_inclusive(99)? {
        0..=47 => RelicTier::Common,
        48..=81 => RelicTier::Uncommon,
        _ => RelicTier::Rare,
    })
}

/// Stock a shop.
pub fn shop_inventory(
    streams: &mut StreamRegistry,
    card_pools: &CardPools,
    relic_pools: &mut RelicPools,
    potion_pools: &PotionPools,
    pity: &PityState,
    ctx: &RewardContext,
) -> Result<ShopInventory> {
    ctx.validate()?;
    let mut shop = ShopInventory {
        purge_cost: PURGE_COST,
        ..ShopInventory::default()
    };

    let card_rng = streams.get_mut(StreamId::Card)?;
    let odds = ctx.tables.card_odds(RoomType::Shop);
    for (slot, kind) in CARD_SLOTS.into_iter().enumerate() {
        let previous = (slot > 0 && CARD_SLOTS[slot - 1] == kind)
            .then(|| shop.cards[slot - 1].id.clone());
        let (id, rarity) = loop {
            let rarity = roll_card_rarity(card_rng, pity, odds)?;
            let (id, rarity) = card_of_type(card_rng, card_pools, rarity, kind)?;
            if previous.as_deref() != Some(id.as_str()) {
                break (id, rarity);
            }
        };
        shop.cards.push(ShopCard {
            id,
            rarity,
            colorless: false,
            price: 0,
            on_sale: false,
        });
    }
    for rarity in [Rarity::Uncommon, Rarity::Rare] {
        let ids: Vec<&str> = card_pools
            .colorless(rarity)
            .items()
            .iter()
            .map(String::as_str)
            .collect();
        shop.colorless.push(ShopCard {
            id: pick(card_rng, &ids, "colorless cards")?,
            rarity,
            colorless: true,
            price: 0,
            on_sale: false,
        });
    }

    let merchant = streams.get_mut(StreamId::Merchant)?;
    for card in &mut shop.cards {
        card.price = (card_price(card.rarity) * merchant.float_range(0.9, 1.1)) as i32;
    }
    for card in &mut shop.colorless {
        card.price =
            (card_price(card.rarity) * merchant.float_range(0.9, 1.1) * COLORLESS_MARKUP) as i32;
    }
    let sale = merchant.ranged_int_inclusive(0, CARD_SLOTS.len() as i32 - 1)? as usize;
    if let Some(card) = shop.cards.get_mut(sale) {
        card.price /= 2;
        card.on_sale = true;
    }

    for slot in 0..3 {
        let tier = if slot < 2 {
            roll_shop_relic_tier(merchant)?
        } else {
            RelicTier::Shop
        };
        let take = relic_pools.take(tier, PoolEnd::Back);
        let tier = relic_def(take.id()).map_or(tier, |def| def.tier);
        let price = round_half_up(relic_price(tier) * merchant.float_range(0.95, 1.05));
        shop.relics.push(ShopRelic {
            id: take.id().to_string(),
            tier,
            price,
        });
    }

    let potion_rng = streams.get_mut(StreamId::Potion)?;
    let mut potions = Vec::with_capacity(3);
    for _ in 0..3 {
        potions.push(roll_potion(potion_rng, potion_pools, &ctx.tables, &[])?);
    }
    let merchant = streams.get_mut(StreamId::Merchant)?;
    for (id, rarity) in potions {
        let price = round_half_up(potion_price(rarity) * merchant.float_range(0.95, 1.05));
        shop.potions.push(ShopPotion { id, rarity, price });
    }

    if ctx.ascension >= ctx.tables.shop_price_ascension {
        shop.apply_markup(ASCENSION_MARKUP);
    }
    Ok(shop)
}

impl ShopInventory {
    /// Scale every price, purge included.
    pub fn apply_markup(&mut self, multiplier: f32) {
        let scale = |price: &mut i32| *price = round_half_up(*price as f32 * multiplier);
        self.cards
            .iter_mut()
            .chain(self.colorless.iter_mut())
            .for_each(|c| scale(&mut c.price));
        self.relics.iter_mut().for_each(|r| scale(&mut r.price));
        self.potions.iter_mut().for_each(|p| scale(&mut p.price));
        scale(&mut self.purge_cost);
    }
}
