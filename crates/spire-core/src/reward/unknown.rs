//! "?" room resolution
//!
//! Entering an unknown room rolls one float against a 100-slot table:
//! monster slots first, then shop, then treasure, events filling the rest.
//! Each outcome's chance resets when it hits and grows when it misses.

use serde::{Deserialize, Serialize};
use spire_rng::Draw;

use crate::dungeon::RoomType;

const MONSTER_BASE: f32 = 0.1;
const SHOP_BASE: f32 = 0.03;
const TREASURE_BASE: f32 = 0.02;

/// Running odds of a "?" room turning into something other than an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnknownRoomOdds {
    pub monster: f32,
    pub shop: f32,
    pub treasure: f32,
}

impl Default for UnknownRoomOdds {
    fn default() -> Self {
        Self {
            monster: MONSTER_BASE,
            shop: SHOP_BASE,
            treasure: TREASURE_BASE,
        }
    }
}

fn slots(chance: f32) -> usize {
    (chance * 100.0) as usize
}

impl UnknownRoomOdds {
    /// Outcome for a roll in `[0, 1)`, without updating the odds.
    pub fn outcome(&self, roll: f32, after_shop: bool) -> RoomType {
        let idx = (roll * 100.0) as usize;
        let monster = slots(self.monster);
        let shop = if after_shop { 0 } else { slots(self.shop) };
        let treasure = slots(self.treasure);
        if idx < monster {
            RoomType::Monster
        } else if idx < monster + shop {
            RoomType::Shop
        } else if idx < monster + shop + treasure {
            RoomType::Treasure
        } else {
            RoomType::Event
        }
    }

    fn record(&mut self, outcome: RoomType) {
        if outcome == RoomType::Monster {
            self.monster = MONSTER_BASE;
        } else {
            self.monster += MONSTER_BASE;
        }
        if outcome == RoomType::Shop {
            self.shop = SHOP_BASE;
        } else {
            self.shop += SHOP_BASE;
        }
        if outcome == RoomType::Treasure {
            self.treasure = TREASURE_BASE;
        } else {
            self.treasure += TREASURE_BASE;
        }
    }
}

/// Resolve a "?" room with one float draw on the event stream.
///
/// `after_shop` removes the shop outcome when the previous room was a shop.
pub fn resolve_unknown_room<R: Draw>(
    rng: &mut R,
    odds: &mut UnknownRoomOdds,
    after_shop: bool,
) -> RoomType {
    let roll = rng.float01();
    let outcome = odds.outcome(roll, after_shop);
    odds.record(outcome);
    log::debug!("unknown room roll {roll} -> {outcome}");
    outcome
}
