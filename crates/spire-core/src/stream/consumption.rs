//! Draw consumption of in-game events
//!
//! Rest sites and event selection burn a fixed number of draws, kept as
//! table constants. Shop entry and treasure rooms burn whatever their
//! generators draw (a duplicate shop card re-rolls, a chest with gold takes
//! an extra roll), so they have no fixed count; `RunState::apply_event`
//! runs the generator for them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{StreamId, StreamRegistry};
use crate::error::StreamError;

/// In-game events that consume draws outside an explicit reward call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum GameEvent {
    RestSite,
    /// Stocking the merchant: Card, Merchant and Potion streams
    ShopEntry,
    /// Opening the chest: Treasure stream
    TreasureRoom,
    /// Picking the event behind a resolved "?" room
    EventRoom,
}

/// How many draws an event takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumption {
    Fixed(&'static [(StreamId, u32)]),
    /// Counted by running the event's generator
    Generated,
}

const REST_SITE: &[(StreamId, u32)] = &[];
const EVENT_ROOM: &[(StreamId, u32)] = &[(StreamId::Event, 1)];

pub const fn consumption(event: GameEvent) -> Consumption {
    match event {
        GameEvent::RestSite => Consumption::Fixed(REST_SITE),
        GameEvent::EventRoom => Consumption::Fixed(EVENT_ROOM),
        GameEvent::ShopEntry | GameEvent::TreasureRoom => Consumption::Generated,
    }
}

impl StreamRegistry {
    /// Burn the fixed draws of `event`.
    ///
    /// Events with generated consumption are rejected, since the registry
    /// alone cannot run their generators.
    pub fn apply_event(&mut self, event: GameEvent) -> Result<(), StreamError> {
        let Consumption::Fixed(draws) = consumption(event) else {
            return Err(StreamError::GeneratedEvent(event));
        };
        for &(id, n) in draws {
            self.advance(id, n)?;
        }
        log::debug!("applied {event}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_rest_site_consumes_nothing() {
        let mut registry = StreamRegistry::new();
        registry.init_run(5);
        let before = registry.clone();
        registry.apply_event(GameEvent::RestSite).unwrap();
        assert_eq!(registry, before);
    }

    #[test]
    fn test_event_room_takes_one_event_draw() {
        let mut registry = StreamRegistry::new();
        registry.init_run(5);
        registry.apply_event(GameEvent::EventRoom).unwrap();
        assert_eq!(registry.counter(StreamId::Event), Some(1));
        assert_eq!(registry.counter(StreamId::Card), Some(0));
    }

    #[test]
    fn test_generated_events_rejected() {
        let mut registry = StreamRegistry::new();
        registry.init_run(5);
        let before = registry.clone();
        for event in [GameEvent::ShopEntry, GameEvent::TreasureRoom] {
            assert_eq!(
                registry.apply_event(event),
                Err(StreamError::GeneratedEvent(event))
            );
        }
        assert_eq!(registry, before);
    }

    #[test]
    fn test_every_fixed_event_requires_a_run() {
        for event in GameEvent::iter() {
            let Consumption::Fixed(draws) = consumption(event) else {
                continue;
            };
            let mut registry = StreamRegistry::new();
            let result = registry.apply_event(event);
            if draws.is_empty() {
                assert!(result.is_ok());
            } else {
                assert!(matches!(result, Err(StreamError::Uninitialized(_))));
            }
        }
    }
}
