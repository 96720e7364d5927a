//! Reward generation
//!
//! Card, relic, potion and gold rewards, plus chest contents, shop stock and
//! "?" room resolution. Every generator draws from the stream the reference
//! application uses for it, in the same order, so counters stay in lockstep.

pub mod cards;
pub mod chest;
pub mod gold;
pub mod pity;
pub mod potions;
pub mod relics;
pub mod shop;
pub mod unknown;

pub use cards::{card_reward, roll_card_rarity, RewardCard};
pub use chest::{chest_reward, ChestReward, ChestSize};
pub use gold::gold_reward;
pub use pity::PityState;
pub use potions::{potion_reward, roll_potion, PotionDrop};
pub use relics::{roll_relic_tier, RelicTake};
pub use shop::{shop_inventory, ShopCard, ShopInventory, ShopPotion, ShopRelic};
pub use unknown::{resolve_unknown_room, UnknownRoomOdds};

use serde::{Deserialize, Serialize};

use crate::config::{check_act, check_ascension, RewardTables};
use crate::dungeon::RoomType;
use crate::error::ConfigError;

/// Float to int rounding of the reference runtime: half rounds up.
pub(crate) fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// Cards offered after a normal fight.
pub const DEFAULT_CARD_COUNT: usize = 3;

/// Where and when a reward is being rolled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardContext {
    pub room: RoomType,
    pub act: u8,
    pub ascension: u8,
    /// Number of cards in a card reward
    pub card_count: usize,
    /// Guarantees a potion drop (e.g. a relic that always drops one)
    pub forced_potion: bool,
    /// Items already on the reward screen; at four or more no potion drops
    pub reward_items: usize,
    pub tables: RewardTables,
}

impl RewardContext {
    pub fn new(room: RoomType, act: u8, ascension: u8) -> Self {
        Self {
            room,
            act,
            ascension,
            card_count: DEFAULT_CARD_COUNT,
            forced_potion: false,
            reward_items: 0,
            tables: RewardTables::default(),
        }
    }

    pub fn with_tables(mut self, tables: RewardTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_act(self.act)?;
        check_ascension(self.ascension)
    }
}
