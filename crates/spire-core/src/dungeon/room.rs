//! Room types
//!
//! Room kinds that can be assigned to a map node, plus the synthetic boss
//! room at the top of every act.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Room type of a map node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RoomType {
    /// Normal combat
    #[default]
    Monster,
    /// Elite combat
    Elite,
    /// Unknown "?" room, resolved when entered
    Event,
    /// Campfire
    Rest,
    /// Merchant
    Shop,
    /// Chest
    Treasure,
    /// Act boss, only ever the synthetic top node
    Boss,
}

impl RoomType {
    /// Types that can be placed on a map node.
    pub const PLACEABLE: [RoomType; 6] = [
        RoomType::Monster,
        RoomType::Elite,
        RoomType::Event,
        RoomType::Rest,
        RoomType::Shop,
        RoomType::Treasure,
    ];

    /// Types that may not repeat directly after a parent of the same type.
    pub const PARENT_RESTRICTED: [RoomType; 4] = [
        RoomType::Rest,
        RoomType::Treasure,
        RoomType::Shop,
        RoomType::Elite,
    ];

    /// Types that may not share a parent with a sibling of the same type.
    pub const SIBLING_RESTRICTED: [RoomType; 5] = [
        RoomType::Rest,
        RoomType::Monster,
        RoomType::Event,
        RoomType::Elite,
        RoomType::Shop,
    ];

    /// Map symbol.
    pub const fn symbol(self) -> char {
        match self {
            RoomType::Monster => 'M',
            RoomType::Elite => 'E',
            RoomType::Event => '?',
            RoomType::Rest => 'R',
            RoomType::Shop => '$',
            RoomType::Treasure => 'T',
            RoomType::Boss => 'B',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<RoomType> {
        match symbol {
            'M' => Some(RoomType::Monster),
            'E' => Some(RoomType::Elite),
            '?' => Some(RoomType::Event),
            'R' => Some(RoomType::Rest),
            '$' => Some(RoomType::Shop),
            'T' => Some(RoomType::Treasure),
            'B' => Some(RoomType::Boss),
            _ => None,
        }
    }

    /// Combat rooms that can drop potions and cards.
    pub const fn is_combat(self) -> bool {
        matches!(self, RoomType::Monster | RoomType::Elite | RoomType::Boss)
    }

    pub fn parent_restricted(self) -> bool {
        Self::PARENT_RESTRICTED.contains(&self)
    }

    pub fn sibling_restricted(self) -> bool {
        Self::SIBLING_RESTRICTED.contains(&self)
    }
}
