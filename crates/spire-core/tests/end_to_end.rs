//! Recorded outputs for seed "ABC123", ascension 0.
//!
//! These pin the whole pipeline: seed decoding, stream seeding, hash-ordered
//! pools, map generation and the first card reward.

use spire_core::catalog::Rarity;
use spire_core::reward::RewardCard;
use spire_core::{RoomType, RunState, StreamId};

const SEED: &str = "ABC123";

/// Act 1 layout, top row first. `.` is an unused cell.
const ACT1_LAYOUT: [&str; 15] = [
    "RRR.RR.",
    "ME.M.M.",
    "M...MM.",
    "R....ME",
    "?$..M$M",
    ".M?MR?M",
    ".T.T.T.",
    "R..MEM.",
    "M..M?M.",
    ".R.ERER",
    ".?.?M.?",
    ".MM?M?.",
    "?.M?.$.",
    ".?.?M.M",
    "M.M..MM",
];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_seed_value() {
    let run = RunState::from_seed(SEED, 0).unwrap();
    assert_eq!(run.seed().value(), 542241423);
}

#[test]
fn test_act1_map_layout() {
    init_logging();
    let mut run = RunState::from_seed(SEED, 0).unwrap();
    let layout = run.generate_map().unwrap().layout();
    assert_eq!(layout, ACT1_LAYOUT.map(str::to_string).to_vec());
    assert_eq!(run.streams().counter(StreamId::Map), Some(145));
}

#[test]
fn test_first_card_reward() {
    init_logging();
    let mut run = RunState::from_seed(SEED, 0).unwrap();
    let cards = run.card_reward(RoomType::Monster).unwrap();
    let expected = ["Dropkick", "Fire Breathing", "Power Through"].map(|id| RewardCard {
        id: id.to_string(),
        rarity: Rarity::Uncommon,
        upgraded: false,
    });
    assert_eq!(cards, expected.to_vec());
    // Three rarity rolls, three picks, three upgrade rolls.
    assert_eq!(run.streams().counter(StreamId::Card), Some(9));
    assert_eq!(run.pity().card_blizzard, 5);
}

#[test]
fn test_relic_pools_and_first_relic() {
    let mut run = RunState::from_seed(SEED, 0).unwrap();
    let pools = run.relic_pools();
    assert_eq!(pools.common.get(0), Some("Nunchaku"));
    assert_eq!(pools.uncommon.get(0), Some("Bottled Tornado"));
    assert_eq!(pools.rare.get(0), Some("Dead Branch"));
    assert_eq!(pools.shop.get(0), Some("Medical Kit"));
    assert_eq!(pools.boss.get(0), Some("Black Blood"));

    // Tier roll of 90 lands in rare.
    let relic = run.relic_reward().unwrap();
    assert_eq!(relic.id(), "Dead Branch");
    assert_eq!(run.streams().counter(StreamId::Relic), Some(6));
}

#[test]
fn test_map_does_not_touch_other_streams() {
    let mut run = RunState::from_seed(SEED, 0).unwrap();
    let before = run.streams().counters();
    run.generate_map().unwrap();
    let after = run.streams().counters();
    for (id, counter) in before {
        if id != StreamId::Map {
            assert_eq!(after[&id], counter, "{id}");
        }
    }
}
