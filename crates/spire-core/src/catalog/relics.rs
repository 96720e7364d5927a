//! Relic definitions and per-tier pools

use serde::{Deserialize, Serialize};
use spire_rng::{Draw, JavaRandom};
use strum::{Display, EnumIter};

use super::Pool;
use crate::hash_order::iteration_order;

/// Handed out when the common/uncommon/rare chain runs dry.
pub const PLACEHOLDER_RELIC: &str = "Circlet";
/// Handed out when the boss pool runs dry.
pub const BOSS_PLACEHOLDER: &str = "Red Circlet";

/// Initial bucket count of both relic library tables.
const RELIC_LIBRARY_CAPACITY: u32 = 16;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RelicTier {
    Common,
    Uncommon,
    Rare,
    Shop,
    Boss,
}

impl RelicTier {
    /// Order in which tier pools are shuffled at run start.
    pub const SHUFFLE_ORDER: [RelicTier; 5] = [
        RelicTier::Common,
        RelicTier::Uncommon,
        RelicTier::Rare,
        RelicTier::Shop,
        RelicTier::Boss,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelicDef {
    pub id: &'static str,
    pub tier: RelicTier,
}

const fn relic(id: &'static str, tier: RelicTier) -> RelicDef {
    RelicDef { id, tier }
}

use RelicTier::{Boss, Common, Rare, Shop, Uncommon};

/// Relics available to every character, in library insertion order.
pub static SHARED_RELICS: &[RelicDef] = &[
    relic("Akabeko", Common),
    relic("Anchor", Common),
    relic("Ancient Tea Set", Common),
    relic("Art of War", Common),
    relic("Bag of Marbles", Common),
    relic("Bag of Preparation", Common),
    relic("Blood Vial", Common),
    relic("Bronze Scales", Common),
    relic("Centennial Puzzle", Common),
    relic("CeramicFish", Common),
    relic("Dream Catcher", Common),
    relic("Happy Flower", Common),
    relic("Juzu Bracelet", Common),
    relic("Lantern", Common),
    relic("MawBank", Common),
    relic("MealTicket", Common),
    relic("Nunchaku", Common),
    relic("Oddly Smooth Stone", Common),
    relic("Omamori", Common),
    relic("Orichalcum", Common),
    relic("Pen Nib", Common),
    relic("Potion Belt", Common),
    relic("PreservedInsect", Common),
    relic("Regal Pillow", Common),
    relic("Smiling Mask", Common),
    relic("Strawberry", Common),
    relic("Boot", Common),
    relic("Tiny Chest", Common),
    relic("Toy Ornithopter", Common),
    relic("Vajra", Common),
    relic("War Paint", Common),
    relic("Whetstone", Common),
    relic("Blue Candle", Uncommon),
    relic("Bottled Flame", Uncommon),
    relic("Bottled Lightning", Uncommon),
    relic("Bottled Tornado", Uncommon),
    relic("Darkstone Periapt", Uncommon),
    relic("Eternal Feather", Uncommon),
    relic("Frozen Egg 2", Uncommon),
    relic("Gremlin Horn", Uncommon),
    relic("HornCleat", Uncommon),
    relic("InkBottle", Uncommon),
    relic("Kunai", Uncommon),
    relic("Letter Opener", Uncommon),
    relic("Matryoshka", Uncommon),
    relic("Meat on the Bone", Uncommon),
    relic("Mercury Hourglass", Uncommon),
    relic("Molten Egg 2", Uncommon),
    relic("Mummified Hand", Uncommon),
    relic("Ornamental Fan", Uncommon),
    relic("Pantograph", Uncommon),
    relic("Pear", Uncommon),
    relic("Question Card", Uncommon),
    relic("Shuriken", Uncommon),
    relic("Singing Bowl", Uncommon),
    relic("StrikeDummy", Uncommon),
    relic("Sundial", Uncommon),
    relic("The Courier", Uncommon),
    relic("Toxic Egg 2", Uncommon),
    relic("White Beast Statue", Uncommon),
    relic("Bird Faced Urn", Rare),
    relic("Calipers", Rare),
    relic("CaptainsWheel", Rare),
    relic("Dead Branch", Rare),
    relic("Du-Vu Doll", Rare),
    relic("FossilizedHelix", Rare),
    relic("Gambling Chip", Rare),
    relic("Ginger", Rare),
    relic("Girya", Rare),
    relic("Ice Cream", Rare),
    relic("Incense Burner", Rare),
    relic("Lizard Tail", Rare),
    relic("Mango", Rare),
    relic("Old Coin", Rare),
    relic("Peace Pipe", Rare),
    relic("Pocketwatch", Rare),
    relic("Prayer Wheel", Rare),
    relic("Shovel", Rare),
    relic("StoneCalendar", Rare),
    relic("Thread and Needle", Rare),
    relic("Torii", Rare),
    relic("TungstenRod", Rare),
    relic("Turnip", Rare),
    relic("Unceasing Top", Rare),
    relic("WingedGreaves", Rare),
    relic("Cauldron", Shop),
    relic("Chemical X", Shop),
    relic("ClockworkSouvenir", Shop),
    relic("DollysMirror", Shop),
    relic("Frozen Eye", Shop),
    relic("HandDrill", Shop),
    relic("Lee's Waffle", Shop),
    relic("Medical Kit", Shop),
    relic("Membership Card", Shop),
    relic("OrangePellets", Shop),
    relic("Orrery", Shop),
    relic("Sling", Shop),
    relic("Strange Spoon", Shop),
    relic("TheAbacus", Shop),
    relic("Toolbox", Shop),
    relic("Astrolabe", Boss),
    relic("Black Star", Boss),
    relic("Busted Crown", Boss),
    relic("Calling Bell", Boss),
    relic("Coffee Dripper", Boss),
    relic("Cursed Key", Boss),
    relic("Ectoplasm", Boss),
    relic("Empty Cage", Boss),
    relic("Fusion Hammer", Boss),
    relic("Pandora's Box", Boss),
    relic("Philosopher's Stone", Boss),
    relic("Runic Dome", Boss),
    relic("Runic Pyramid", Boss),
    relic("SacredBark", Boss),
    relic("SlaversCollar", Boss),
    relic("Snecko Eye", Boss),
    relic("Sozu", Boss),
    relic("Tiny House", Boss),
    relic("Velvet Choker", Boss),
];

/// Red character relics, in library insertion order.
pub static RED_RELICS: &[RelicDef] = &[
    relic("Red Skull", Common),
    relic("Paper Frog", Uncommon),
    relic("Self Forming Clay", Uncommon),
    relic("Champion Belt", Rare),
    relic("Charon's Ashes", Rare),
    relic("Magic Flower", Rare),
    relic("Brimstone", Shop),
    relic("Black Blood", Boss),
    relic("Mark of Pain", Boss),
    relic("Runic Cube", Boss),
];

pub fn relic_def(id: &str) -> Option<&'static RelicDef> {
    SHARED_RELICS
        .iter()
        .chain(RED_RELICS.iter())
        .find(|def| def.id == id)
}

/// Shuffled relic pools, one per tier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelicPools {
    pub common: Pool,
    pub uncommon: Pool,
    pub rare: Pool,
    pub shop: Pool,
    pub boss: Pool,
}

impl RelicPools {
    /// Build the pools for a new run.
    ///
    /// Shared relics come first in their table's iteration order, then the
    /// character relics in theirs. Each tier is then shuffled with a fresh
    /// LCG seeded from one raw draw of `relic_rng`, in [`RelicTier::SHUFFLE_ORDER`].
    pub fn build<R: Draw>(relic_rng: &mut R) -> Self {
        let mut pools = Self::default();
        for library in [SHARED_RELICS, RED_RELICS] {
            let keys: Vec<&str> = library.iter().map(|def| def.id).collect();
            for id in iteration_order(&keys, RELIC_LIBRARY_CAPACITY) {
                if let Some(def) = relic_def(&id) {
                    pools.pool_mut(def.tier).items_mut().push(id);
                }
            }
        }

        for tier in RelicTier::SHUFFLE_ORDER {
            let seed = relic_rng.random_long();
            JavaRandom::new(seed).shuffle(pools.pool_mut(tier).items_mut());
        }
        log::debug!(
            "relic pools built: {} common, {} uncommon, {} rare, {} shop, {} boss",
            pools.common.len(),
            pools.uncommon.len(),
            pools.rare.len(),
            pools.shop.len(),
            pools.boss.len()
        );
        pools
    }

    pub fn pool(&self, tier: RelicTier) -> &Pool {
        match tier {
            RelicTier::Common => &self.common,
            RelicTier::Uncommon => &self.uncommon,
            RelicTier::Rare => &self.rare,
            RelicTier::Shop => &self.shop,
            RelicTier::Boss => &self.boss,
        }
    }

    pub fn pool_mut(&mut self, tier: RelicTier) -> &mut Pool {
        match tier {
            RelicTier::Common => &mut self.common,
            RelicTier::Uncommon => &mut self.uncommon,
            RelicTier::Rare => &mut self.rare,
            RelicTier::Shop => &mut self.shop,
            RelicTier::Boss => &mut self.boss,
        }
    }

    /// Drop a relic the player already owns from whichever pool holds it.
    pub fn remove(&mut self, id: &str) -> bool {
        RelicTier::SHUFFLE_ORDER
            .iter()
            .any(|&tier| self.pool_mut(tier).remove(id))
    }
}
