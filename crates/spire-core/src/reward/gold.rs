//! Combat gold

use spire_rng::Draw;

use super::round_half_up;
use crate::config::RewardTables;
use crate::dungeon::RoomType;
use crate::error::Result;
use crate::stream::{StreamId, StreamRegistry};

/// Base boss gold before the misc-stream jitter.
pub const BOSS_GOLD: i32 = 100;

/// Gold dropped by a cleared room. Non-combat rooms drop nothing and draw
/// nothing.
///
/// Normal and elite fights draw from the treasure stream, bosses from the
/// misc stream.
pub fn gold_reward(
    streams: &mut StreamRegistry,
    room: RoomType,
    ascension: u8,
    tables: &RewardTables,
) -> Result<i32> {
    let gold = match room {
        RoomType::Monster => streams
            .get_mut(StreamId::Treasure)?
            .ranged_int_inclusive(10, 20)?,
        RoomType::Elite => streams
            .get_mut(StreamId::Treasure)?
            .ranged_int_inclusive(25, 35)?,
        RoomType::Boss => {
            let gold = BOSS_GOLD + streams.get_mut(StreamId::Misc)?.ranged_int_inclusive(-5, 5)?;
            if ascension >= tables.boss_gold_ascension {
                round_half_up(gold as f32 * 0.75)
            } else {
                gold
            }
        }
        _ => 0,
    };
    Ok(gold)
}
