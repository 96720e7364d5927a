//! Pity timers
//!
//! Two counters bias later rolls after a run of bad luck. They live outside
//! every stream and persist for the whole run.

use serde::{Deserialize, Serialize};

use crate::catalog::Rarity;

/// Blizzard value after a rare card and at run start.
pub const BLIZZARD_START: i32 = 5;
/// Blizzard decrease per common card.
pub const BLIZZARD_STEP: i32 = 1;
/// Lowest blizzard value.
pub const BLIZZARD_FLOOR: i32 = -40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PityState {
    /// Added to every card rarity roll
    pub card_blizzard: i32,
    /// Added to the base potion drop chance
    pub potion_chance: i32,
}

impl Default for PityState {
    fn default() -> Self {
        Self {
            card_blizzard: BLIZZARD_START,
            potion_chance: 0,
        }
    }
}

impl PityState {
    /// Update the card blizzard after a reward card of `rarity`.
    pub fn record_card(&mut self, rarity: Rarity) {
        match rarity {
            Rarity::Rare => self.card_blizzard = BLIZZARD_START,
            Rarity::Common => {
                self.card_blizzard = (self.card_blizzard - BLIZZARD_STEP).max(BLIZZARD_FLOOR);
            }
            Rarity::Uncommon | Rarity::Basic => {}
        }
    }

    /// Update the potion pity after a drop roll.
    pub fn record_potion(&mut self, dropped: bool, step: i32) {
        if dropped {
            self.potion_chance = 0;
        } else {
            self.potion_chance += step;
        }
    }
}
