//! Item catalogs and candidate pools
//!
//! Static definitions of the cards, relics and potions that rewards are drawn
//! from, plus the ordered [`Pool`] type the generators consume. Pool order is
//! fixed once at run start by the hash-order emulator.

mod cards;
mod potions;
mod relics;

pub use cards::{card_def, CardColor, CardDef, CardPools, CardType, COLORLESS_CARDS, RED_CARDS};
pub use potions::{potion_def, PotionDef, PotionPools, POTIONS};
pub use relics::{
    relic_def, RelicDef, RelicPools, RelicTier, BOSS_PLACEHOLDER, PLACEHOLDER_RELIC, RED_RELICS,
    SHARED_RELICS,
};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Item rarity shared by cards and potions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Rarity {
    Basic,
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    /// One step up, saturating at rare.
    pub const fn upgrade(self) -> Rarity {
        match self {
            Rarity::Basic => Rarity::Common,
            Rarity::Common => Rarity::Uncommon,
            Rarity::Uncommon | Rarity::Rare => Rarity::Rare,
        }
    }

    /// One step down, saturating at common.
    pub const fn downgrade(self) -> Rarity {
        match self {
            Rarity::Rare => Rarity::Uncommon,
            _ => Rarity::Common,
        }
    }
}

/// Which end of a pool to take from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEnd {
    Front,
    Back,
}

/// Ordered candidate list that only ever shrinks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pool {
    items: Vec<String>,
}

impl Pool {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item == id)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn take(&mut self, end: PoolEnd) -> Option<String> {
        match end {
            PoolEnd::Front if !self.items.is_empty() => Some(self.items.remove(0)),
            PoolEnd::Front => None,
            PoolEnd::Back => self.items.pop(),
        }
    }

    /// Remove `id` wherever it sits; `false` if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<String> {
        &mut self.items
    }
}
