//! Stream registry
//!
//! A run draws from many independent [`SpireRng`] streams, one per category
//! of randomness. Each stream has a fixed reseed lifecycle; the registry is
//! the only place that reseeds. Cloning a registry is a full snapshot.

mod consumption;

pub use consumption::{consumption, Consumption, GameEvent};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spire_rng::{Draw, SpireRng};
use strum::{Display, EnumIter};

use crate::config::{check_act, ACT_COUNT};
use crate::error::{CoreError, StreamError};

/// Seed offsets of the per-act map stream, indexed by act - 1.
pub const ACT_OFFSETS: [i64; ACT_COUNT as usize] = [1, 200, 600, 1200];

/// Card stream counter checkpoints applied on act transitions.
pub const SNAP_POINTS: [u32; 3] = [250, 500, 750];

/// Named random streams.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum StreamId {
    Monster,
    Event,
    Merchant,
    /// Card rewards; the stream that gets snapped on act changes
    Card,
    Treasure,
    Relic,
    Potion,
    Neow,
    MonsterHp,
    Ai,
    Shuffle,
    CardRandom,
    Misc,
    Map,
}

/// When a stream is reseeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Lifecycle {
    /// Seeded once at run start
    Persistent,
    /// Reseeded with `seed + floor` on every floor change
    PerFloor,
    /// Reseeded with `seed + ACT_OFFSETS[act - 1]` on every act change
    PerAct,
}

impl StreamId {
    pub const ALL: [StreamId; 14] = [
        StreamId::Monster,
        StreamId::Event,
        StreamId::Merchant,
        StreamId::Card,
        StreamId::Treasure,
        StreamId::Relic,
        StreamId::Potion,
        StreamId::Neow,
        StreamId::MonsterHp,
        StreamId::Ai,
        StreamId::Shuffle,
        StreamId::CardRandom,
        StreamId::Misc,
        StreamId::Map,
    ];

    pub const fn lifecycle(self) -> Lifecycle {
        match self {
            StreamId::MonsterHp
            | StreamId::Ai
            | StreamId::Shuffle
            | StreamId::CardRandom
            | StreamId::Misc => Lifecycle::PerFloor,
            StreamId::Map => Lifecycle::PerAct,
            _ => Lifecycle::Persistent,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Snap a card stream counter forward to the next checkpoint.
///
/// Counters strictly between two checkpoints (or between 0 and the first)
/// move up; 0, exact checkpoints and anything past the last are unchanged.
pub fn snap_counter(counter: u32) -> u32 {
    let mut low = 0;
    for point in SNAP_POINTS {
        if counter > low && counter < point {
            return point;
        }
        low = point;
    }
    counter
}

/// Per-stream state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StreamState {
    #[default]
    Uninitialized,
    Seeded(SpireRng),
}

/// Owner of every stream in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRegistry {
    seed: Option<i64>,
    floor: u32,
    act: u8,
    streams: Vec<StreamState>,
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamRegistry {
    /// Registry with every stream uninitialized.
    pub fn new() -> Self {
        Self {
            seed: None,
            floor: 0,
            act: 1,
            streams: vec![StreamState::Uninitialized; StreamId::ALL.len()],
        }
    }

    /// Seed every stream for a new run: floor 0, act 1.
    pub fn init_run(&mut self, seed: i64) {
        self.seed = Some(seed);
        self.floor = 0;
        self.act = 1;
        for id in StreamId::ALL {
            self.streams[id.index()] = StreamState::Seeded(SpireRng::new(self.seed_for(seed, id)));
        }
        log::debug!("init_run seed={seed}");
    }

    /// Rebuild a registry from persisted counters (the resume path).
    ///
    /// Streams missing from `counters` start at 0.
    pub fn restore(
        seed: i64,
        floor: u32,
        act: u8,
        counters: &BTreeMap<StreamId, u32>,
    ) -> Result<Self, CoreError> {
        check_act(act)?;
        let mut registry = Self {
            seed: Some(seed),
            floor,
            act,
            streams: vec![StreamState::Uninitialized; StreamId::ALL.len()],
        };
        for id in StreamId::ALL {
            let counter = counters.get(&id).copied().unwrap_or(0);
            let rng = SpireRng::with_counter(registry.seed_for(seed, id), counter);
            registry.streams[id.index()] = StreamState::Seeded(rng);
        }
        log::debug!("restored registry seed={seed} floor={floor} act={act}");
        Ok(registry)
    }

    /// Reseed the per-floor streams with `seed + floor`.
    pub fn enter_floor(&mut self, floor: u32) -> Result<(), StreamError> {
        let seed = self.seed.ok_or(StreamError::NotStarted)?;
        self.floor = floor;
        for id in StreamId::ALL {
            if id.lifecycle() == Lifecycle::PerFloor {
                self.streams[id.index()] =
                    StreamState::Seeded(SpireRng::new(self.seed_for(seed, id)));
            }
        }
        log::debug!("enter_floor floor={floor}");
        Ok(())
    }

    /// Reseed the per-act streams and snap the card stream counter.
    pub fn enter_act(&mut self, act: u8) -> Result<(), CoreError> {
        check_act(act)?;
        let seed = self.seed.ok_or(StreamError::NotStarted)?;
        self.act = act;
        for id in StreamId::ALL {
            if id.lifecycle() == Lifecycle::PerAct {
                self.streams[id.index()] =
                    StreamState::Seeded(SpireRng::new(self.seed_for(seed, id)));
            }
        }

        let card = self.get(StreamId::Card)?;
        let counter = card.counter();
        let snapped = snap_counter(counter);
        if snapped != counter {
            let rng = SpireRng::with_counter(card.seed(), snapped);
            self.streams[StreamId::Card.index()] = StreamState::Seeded(rng);
            log::debug!("enter_act act={act}: card counter {counter} snapped to {snapped}");
        } else {
            log::debug!("enter_act act={act}: card counter {counter} unchanged");
        }
        Ok(())
    }

    /// Advance a stream by `draws` canonical draws.
    pub fn advance(&mut self, id: StreamId, draws: u32) -> Result<(), StreamError> {
        let rng = self.get_mut(id)?;
        let target = rng.counter().saturating_add(draws);
        rng.skip_to(target);
        Ok(())
    }

    pub fn get(&self, id: StreamId) -> Result<&SpireRng, StreamError> {
        match &self.streams[id.index()] {
            StreamState::Seeded(rng) => Ok(rng),
            StreamState::Uninitialized => Err(StreamError::Uninitialized(id)),
        }
    }

    pub fn get_mut(&mut self, id: StreamId) -> Result<&mut SpireRng, StreamError> {
        match &mut self.streams[id.index()] {
            StreamState::Seeded(rng) => Ok(rng),
            StreamState::Uninitialized => Err(StreamError::Uninitialized(id)),
        }
    }

    pub fn state(&self, id: StreamId) -> StreamState {
        self.streams[id.index()]
    }

    pub fn counter(&self, id: StreamId) -> Option<u32> {
        self.get(id).ok().map(|rng| rng.counter())
    }

    /// Counter of every seeded stream, for persistence.
    pub fn counters(&self) -> BTreeMap<StreamId, u32> {
        StreamId::ALL
            .iter()
            .filter_map(|&id| self.counter(id).map(|c| (id, c)))
            .collect()
    }

    pub fn seed(&self) -> Option<i64> {
        self.seed
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn act(&self) -> u8 {
        self.act
    }

    fn seed_for(&self, seed: i64, id: StreamId) -> i64 {
        match id.lifecycle() {
            Lifecycle::Persistent => seed,
            Lifecycle::PerFloor => seed.wrapping_add(self.floor as i64),
            Lifecycle::PerAct => {
                let idx = self.act.clamp(1, ACT_COUNT) as usize - 1;
                seed.wrapping_add(ACT_OFFSETS[idx])
            }
        }
    }
}
