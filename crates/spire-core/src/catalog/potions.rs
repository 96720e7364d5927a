//! Potion definitions

use serde::{Deserialize, Serialize};

use super::{Pool, Rarity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotionDef {
    pub id: &'static str,
    pub rarity: Rarity,
}

const fn potion(id: &'static str, rarity: Rarity) -> PotionDef {
    PotionDef { id, rarity }
}

use Rarity::{Common, Rare, Uncommon};

/// Potions a red character can find, class potions first.
pub static POTIONS: &[PotionDef] = &[
    potion("BloodPotion", Common),
    potion("ElixirPotion", Uncommon),
    potion("HeartOfIron", Rare),
    potion("Block Potion", Common),
    potion("Dexterity Potion", Common),
    potion("Energy Potion", Common),
    potion("Explosive Potion", Common),
    potion("Fire Potion", Common),
    potion("Strength Potion", Common),
    potion("Swift Potion", Common),
    potion("Weak Potion", Common),
    potion("FearPotion", Common),
    potion("AttackPotion", Common),
    potion("SkillPotion", Common),
    potion("PowerPotion", Common),
    potion("ColorlessPotion", Common),
    potion("SteroidPotion", Common),
    potion("SpeedPotion", Common),
    potion("BlessingOfTheForge", Common),
    potion("Regen Potion", Uncommon),
    potion("Ancient Potion", Uncommon),
    potion("LiquidBronze", Uncommon),
    potion("GamblersBrew", Uncommon),
    potion("EssenceOfSteel", Uncommon),
    potion("DuplicationPotion", Uncommon),
    potion("DistilledChaos", Uncommon),
    potion("LiquidMemories", Uncommon),
    potion("CultistPotion", Rare),
    potion("Fruit Juice", Rare),
    potion("SneckoOil", Rare),
    potion("FairyPotion", Rare),
    potion("SmokeBomb", Rare),
    potion("EntropicBrew", Rare),
];

pub fn potion_def(id: &str) -> Option<&'static PotionDef> {
    POTIONS.iter().find(|def| def.id == id)
}

/// Potion candidates split by rarity, list order kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PotionPools {
    pub common: Pool,
    pub uncommon: Pool,
    pub rare: Pool,
}

impl PotionPools {
    pub fn build() -> Self {
        let of = |rarity: Rarity| {
            Pool::new(
                POTIONS
                    .iter()
                    .filter(|def| def.rarity == rarity)
                    .map(|def| def.id.to_string())
                    .collect(),
            )
        };
        Self {
            common: of(Rarity::Common),
            uncommon: of(Rarity::Uncommon),
            rare: of(Rarity::Rare),
        }
    }

    pub fn for_rarity(&self, rarity: Rarity) -> &Pool {
        match rarity {
            Rarity::Basic | Rarity::Common => &self.common,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Rare => &self.rare,
        }
    }
}
