//! Card definitions and reward pools

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Pool, Rarity};
use crate::hash_order::iteration_order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum CardType {
    Attack,
    Skill,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum CardColor {
    Red,
    Colorless,
}

/// A card as the library knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDef {
    pub id: &'static str,
    pub rarity: Rarity,
    pub kind: CardType,
    pub color: CardColor,
}

const fn attack(id: &'static str, rarity: Rarity) -> CardDef {
    CardDef {
        id,
        rarity,
        kind: CardType::Attack,
        color: CardColor::Red,
    }
}

const fn skill(id: &'static str, rarity: Rarity) -> CardDef {
    CardDef {
        id,
        rarity,
        kind: CardType::Skill,
        color: CardColor::Red,
    }
}

const fn power(id: &'static str, rarity: Rarity) -> CardDef {
    CardDef {
        id,
        rarity,
        kind: CardType::Power,
        color: CardColor::Red,
    }
}

const fn colorless(id: &'static str, rarity: Rarity, kind: CardType) -> CardDef {
    CardDef {
        id,
        rarity,
        kind,
        color: CardColor::Colorless,
    }
}

use CardType::{Attack as A, Power as P, Skill as S};
use Rarity::{Common, Rare, Uncommon};

/// Red card library in insertion order.
pub static RED_CARDS: &[CardDef] = &[
    attack("Anger", Common),
    skill("Armaments", Common),
    attack("Body Slam", Common),
    attack("Clash", Common),
    attack("Cleave", Common),
    attack("Clothesline", Common),
    skill("Flex", Common),
    skill("Havoc", Common),
    attack("Headbutt", Common),
    attack("Heavy Blade", Common),
    attack("Iron Wave", Common),
    attack("Perfected Strike", Common),
    attack("Pommel Strike", Common),
    skill("Shrug It Off", Common),
    attack("Sword Boomerang", Common),
    attack("Thunderclap", Common),
    skill("True Grit", Common),
    attack("Twin Strike", Common),
    skill("Warcry", Common),
    attack("Wild Strike", Common),
    skill("Battle Trance", Uncommon),
    attack("Blood for Blood", Uncommon),
    skill("Bloodletting", Uncommon),
    skill("Burning Pact", Uncommon),
    attack("Carnage", Uncommon),
    power("Combust", Uncommon),
    power("Dark Embrace", Uncommon),
    skill("Disarm", Uncommon),
    attack("Dropkick", Uncommon),
    skill("Dual Wield", Uncommon),
    skill("Entrench", Uncommon),
    power("Evolve", Uncommon),
    power("Feel No Pain", Uncommon),
    power("Fire Breathing", Uncommon),
    skill("Flame Barrier", Uncommon),
    skill("Ghostly Armor", Uncommon),
    attack("Hemokinesis", Uncommon),
    skill("Infernal Blade", Uncommon),
    power("Inflame", Uncommon),
    skill("Intimidate", Uncommon),
    power("Metallicize", Uncommon),
    skill("Power Through", Uncommon),
    attack("Pummel", Uncommon),
    skill("Rage", Uncommon),
    attack("Rampage", Uncommon),
    attack("Reckless Charge", Uncommon),
    power("Rupture", Uncommon),
    attack("Searing Blow", Uncommon),
    skill("Second Wind", Uncommon),
    skill("Seeing Red", Uncommon),
    skill("Sentinel", Uncommon),
    attack("Sever Soul", Uncommon),
    skill("Shockwave", Uncommon),
    skill("Spot Weakness", Uncommon),
    attack("Uppercut", Uncommon),
    attack("Whirlwind", Uncommon),
    power("Barricade", Rare),
    power("Berserk", Rare),
    attack("Bludgeon", Rare),
    power("Brutality", Rare),
    power("Corruption", Rare),
    power("Demon Form", Rare),
    skill("Double Tap", Rare),
    skill("Exhume", Rare),
    attack("Feed", Rare),
    attack("Fiend Fire", Rare),
    attack("Immolate", Rare),
    skill("Impervious", Rare),
    power("Juggernaut", Rare),
    skill("Limit Break", Rare),
    skill("Offering", Rare),
    attack("Reaper", Rare),
];

/// Colorless cards sold at shops.
pub static COLORLESS_CARDS: &[CardDef] = &[
    colorless("Bandage Up", Uncommon, S),
    colorless("Blind", Uncommon, S),
    colorless("Dark Shackles", Uncommon, S),
    colorless("Deep Breath", Uncommon, S),
    colorless("Discovery", Uncommon, S),
    colorless("Dramatic Entrance", Uncommon, A),
    colorless("Enlightenment", Uncommon, S),
    colorless("Finesse", Uncommon, S),
    colorless("Flash of Steel", Uncommon, A),
    colorless("Forethought", Uncommon, S),
    colorless("Good Instincts", Uncommon, S),
    colorless("Impatience", Uncommon, S),
    colorless("Jack Of All Trades", Uncommon, S),
    colorless("Madness", Uncommon, S),
    colorless("Mind Blast", Uncommon, A),
    colorless("Panacea", Uncommon, S),
    colorless("PanicButton", Uncommon, S),
    colorless("Purity", Uncommon, S),
    colorless("Swift Strike", Uncommon, A),
    colorless("Trip", Uncommon, S),
    colorless("Apotheosis", Rare, S),
    colorless("Chrysalis", Rare, S),
    colorless("HandOfGreed", Rare, A),
    colorless("Magnetism", Rare, P),
    colorless("Master of Strategy", Rare, S),
    colorless("Mayhem", Rare, P),
    colorless("Metamorphosis", Rare, S),
    colorless("Panache", Rare, P),
    colorless("Sadistic Nature", Rare, P),
    colorless("Secret Technique", Rare, S),
    colorless("Secret Weapon", Rare, S),
    colorless("The Bomb", Rare, S),
    colorless("Thinking Ahead", Rare, S),
    colorless("Transmutation", Rare, S),
    colorless("Violence", Rare, S),
];

/// Look up a card by id in either library.
pub fn card_def(id: &str) -> Option<&'static CardDef> {
    RED_CARDS
        .iter()
        .chain(COLORLESS_CARDS.iter())
        .find(|def| def.id == id)
}

/// Reward and shop card pools in library iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardPools {
    pub common: Pool,
    pub uncommon: Pool,
    pub rare: Pool,
    pub colorless_uncommon: Pool,
    pub colorless_rare: Pool,
}

impl CardPools {
    /// Final bucket count of the full card library table.
    pub const LIBRARY_CAPACITY: u32 = 512;

    /// Build every pool from the library in hash iteration order.
    pub fn build() -> Self {
        let keys: Vec<&str> = RED_CARDS
            .iter()
            .chain(COLORLESS_CARDS.iter())
            .map(|def| def.id)
            .collect();
        let order = iteration_order(&keys, Self::LIBRARY_CAPACITY);

        let mut pools = Self::default();
        for id in order {
            let Some(def) = card_def(&id) else { continue };
            let pool = match (def.color, def.rarity) {
                (CardColor::Red, Rarity::Common) => &mut pools.common,
                (CardColor::Red, Rarity::Uncommon) => &mut pools.uncommon,
                (CardColor::Red, Rarity::Rare) => &mut pools.rare,
                (CardColor::Colorless, Rarity::Uncommon) => &mut pools.colorless_uncommon,
                (CardColor::Colorless, Rarity::Rare) => &mut pools.colorless_rare,
                _ => continue,
            };
            pool.items_mut().push(id);
        }
        pools
    }

    /// Colored pool for a rarity. Basic cards are never offered.
    pub fn for_rarity(&self, rarity: Rarity) -> &Pool {
        match rarity {
            Rarity::Basic | Rarity::Common => &self.common,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Rare => &self.rare,
        }
    }

    pub fn colorless(&self, rarity: Rarity) -> &Pool {
        match rarity {
            Rarity::Rare => &self.colorless_rare,
            _ => &self.colorless_uncommon,
        }
    }

    /// Ids of one type within a colored rarity pool, pool order kept.
    pub fn of_type(&self, rarity: Rarity, kind: CardType) -> Vec<&str> {
        self.for_rarity(rarity)
            .items()
            .iter()
            .map(String::as_str)
            .filter(|id| card_def(id).is_some_and(|def| def.kind == kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_library_sizes() {
        let count = |r: Rarity| RED_CARDS.iter().filter(|c| c.rarity == r).count();
        assert_eq!(count(Rarity::Common), 20);
        assert_eq!(count(Rarity::Uncommon), 36);
        assert_eq!(count(Rarity::Rare), 16);
    }

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<&str> = RED_CARDS
            .iter()
            .chain(COLORLESS_CARDS.iter())
            .map(|c| c.id)
            .collect();
        assert_eq!(ids.len(), RED_CARDS.len() + COLORLESS_CARDS.len());
    }

    #[test]
    fn test_pools_partition_library() {
        let pools = CardPools::build();
        assert_eq!(pools.common.len(), 20);
        assert_eq!(pools.uncommon.len(), 36);
        assert_eq!(pools.rare.len(), 16);
        assert_eq!(pools.colorless_uncommon.len(), 20);
        assert_eq!(pools.colorless_rare.len(), 15);
        assert!(pools.rare.contains("Demon Form"));
        assert!(!pools.rare.contains("Anger"));
    }

    #[test]
    fn test_pool_order_is_hash_order_not_library_order() {
        let pools = CardPools::build();
        let library: Vec<&str> = RED_CARDS
            .iter()
            .filter(|c| c.rarity == Rarity::Common)
            .map(|c| c.id)
            .collect();
        let pooled: Vec<&str> = pools.common.items().iter().map(String::as_str).collect();
        assert_ne!(pooled, library);
        assert_eq!(pools, CardPools::build());
    }

    #[test]
    fn test_of_type() {
        let pools = CardPools::build();
        assert!(pools.of_type(Rarity::Common, CardType::Power).is_empty());
        assert_eq!(pools.of_type(Rarity::Uncommon, CardType::Power).len(), 8);
        assert_eq!(pools.of_type(Rarity::Rare, CardType::Power).len(), 6);
    }
}
