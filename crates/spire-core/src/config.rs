//! Run, map and reward configuration
//!
//! Every struct here is plain serde data with a `Default` that matches the
//! base game. Constructors validate eagerly; generators assume valid input.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::dungeon::RoomType;
use crate::error::ConfigError;

pub const MAX_ASCENSION: u8 = 20;
/// Acts 1-3 plus the final area.
pub const ACT_COUNT: u8 = 4;
pub const FINAL_ACT: u8 = 4;

/// Map grid defaults.
pub const MAP_HEIGHT: usize = 15;
pub const MAP_WIDTH: usize = 7;
pub const MAP_PATH_DENSITY: usize = 6;
/// Interior row forced to treasure (or elite under infestation).
pub const TREASURE_ROW: usize = 8;

bitflags! {
    /// Run modifiers that change map generation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MapModifiers: u8 {
        /// Elite count uses a x2.5 multiplier
        const ELITE_SWARM = 1 << 0;
        /// A single path instead of six
        const UNCERTAIN_FUTURE = 1 << 1;
        /// The treasure row becomes elites
        const INFESTATION = 1 << 2;
        /// The final act is reachable, so one elite carries its key
        const FINAL_ACT_AVAILABLE = 1 << 3;
    }
}

/// Base chance of each room type per connected node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomChances {
    pub shop: f32,
    pub rest: f32,
    pub treasure: f32,
    pub elite: f32,
    pub event: f32,
}

impl Default for RoomChances {
    fn default() -> Self {
        Self {
            shop: 0.05,
            rest: 0.12,
            treasure: 0.0,
            elite: 0.08,
            event: 0.22,
        }
    }
}

impl RoomChances {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("shop", self.shop),
            ("rest", self.rest),
            ("treasure", self.treasure),
            ("elite", self.elite),
            ("event", self.event),
        ];
        for (field, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidChance { field, value });
            }
        }
        Ok(())
    }
}

/// Map generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub height: usize,
    pub width: usize,
    pub path_density: usize,
    pub chances: RoomChances,
    pub ascension: u8,
    /// Ascension at which the elite count is multiplied by 1.6
    pub elite_ascension: u8,
    pub modifiers: MapModifiers,
    pub has_emerald_key: bool,
    /// Reproduce the reference ancestor lookup, which orders the two nodes
    /// by comparing one node's x against the other's y.
    pub ancestor_quirk: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            height: MAP_HEIGHT,
            width: MAP_WIDTH,
            path_density: MAP_PATH_DENSITY,
            chances: RoomChances::default(),
            ascension: 0,
            elite_ascension: 1,
            modifiers: MapModifiers::empty(),
            has_emerald_key: false,
            ancestor_quirk: true,
        }
    }
}

impl MapConfig {
    /// Standard config for one of the three map acts.
    pub fn for_act(act: u8, ascension: u8) -> Result<Self, ConfigError> {
        if !(1..FINAL_ACT).contains(&act) {
            return Err(ConfigError::UnknownAct(act));
        }
        let config = Self {
            ascension,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_modifiers(mut self, modifiers: MapModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ascension(self.ascension)?;
        if self.width < 2 || self.height <= TREASURE_ROW + 1 {
            return Err(ConfigError::InvalidGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.path_density == 0 {
            return Err(ConfigError::InvalidDensity);
        }
        self.chances.validate()
    }

    /// Number of paths actually walked.
    pub fn effective_density(&self) -> usize {
        if self.modifiers.contains(MapModifiers::UNCERTAIN_FUTURE) {
            1
        } else {
            self.path_density
        }
    }
}

/// Card rarity thresholds for one room kind: a roll below `rare` is rare,
/// below `rare + uncommon` uncommon, anything else common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRarityOdds {
    pub rare: i32,
    pub uncommon: i32,
}

/// Relic tier thresholds on a 0-99 roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicChances {
    pub common: i32,
    pub uncommon: i32,
}

impl RelicChances {
    /// Three-tier split of the base campaign (50 / 33 / 17).
    pub const BASE: Self = Self {
        common: 50,
        uncommon: 33,
    };
    /// The final area only hands out rares.
    pub const FINAL_AREA: Self = Self {
        common: 0,
        uncommon: 0,
    };

    pub fn for_act(act: u8) -> Self {
        if act >= FINAL_ACT {
            Self::FINAL_AREA
        } else {
            Self::BASE
        }
    }
}

/// Numeric tables consumed by the reward generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTables {
    pub monster_cards: CardRarityOdds,
    pub elite_cards: CardRarityOdds,
    pub shop_cards: CardRarityOdds,
    /// Upgrade chance for non-rare reward cards, indexed by act - 1
    pub upgrade_chance: [f32; ACT_COUNT as usize],
    /// Ascension at which upgrade chances are halved
    pub upgrade_ascension: u8,
    pub potion_base_chance: i32,
    pub potion_pity_step: i32,
    /// Potion tier split: below `common` is common, below `uncommon` uncommon
    pub potion_common: i32,
    pub potion_uncommon: i32,
    /// Ascension at which boss gold is cut by a quarter
    pub boss_gold_ascension: u8,
    /// Ascension at which shop prices go up by a tenth
    pub shop_price_ascension: u8,
}

impl Default for RewardTables {
    fn default() -> Self {
        Self {
            monster_cards: CardRarityOdds {
                rare: 3,
                uncommon: 37,
            },
            elite_cards: CardRarityOdds {
                rare: 10,
                uncommon: 40,
            },
            shop_cards: CardRarityOdds {
                rare: 9,
                uncommon: 37,
            },
            upgrade_chance: [0.0, 0.25, 0.5, 0.5],
            upgrade_ascension: 12,
            potion_base_chance: 40,
            potion_pity_step: 10,
            potion_common: 65,
            potion_uncommon: 90,
            boss_gold_ascension: 13,
            shop_price_ascension: 16,
        }
    }
}

impl RewardTables {
    /// Rarity odds for a room, `None` when every card is rare.
    pub fn card_odds(&self, room: RoomType) -> Option<CardRarityOdds> {
        match room {
            RoomType::Boss => None,
            RoomType::Elite => Some(self.elite_cards),
            RoomType::Shop => Some(self.shop_cards),
            _ => Some(self.monster_cards),
        }
    }

    pub fn upgrade_chance(&self, act: u8, ascension: u8) -> f32 {
        let idx = act.clamp(1, ACT_COUNT) as usize - 1;
        let chance = self.upgrade_chance[idx];
        if ascension >= self.upgrade_ascension {
            chance / 2.0
        } else {
            chance
        }
    }
}

/// Everything needed to start a run, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed in either player-facing or persisted form
    pub seed: String,
    pub ascension: u8,
    pub modifiers: MapModifiers,
    pub tables: RewardTables,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: "0".to_string(),
            ascension: 0,
            modifiers: MapModifiers::empty(),
            tables: RewardTables::default(),
        }
    }
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ascension(self.ascension)
    }
}

pub fn check_ascension(ascension: u8) -> Result<(), ConfigError> {
    if ascension > MAX_ASCENSION {
        Err(ConfigError::AscensionOutOfRange(ascension))
    } else {
        Ok(())
    }
}

pub fn check_act(act: u8) -> Result<(), ConfigError> {
    if (1..=ACT_COUNT).contains(&act) {
        Ok(())
    } else {
        Err(ConfigError::UnknownAct(act))
    }
}
