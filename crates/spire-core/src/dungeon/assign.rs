//! Room type assignment
//!
//! Turns a bare path graph into a typed map: count the connected nodes, build
//! the room multiset from the configured chances, pin the fixed rows, shuffle,
//! then hand rooms out in scan order subject to the row, parent and sibling
//! rules.

use spire_rng::{Draw, RngError};

use super::graph::{NodeRef, RoomGraph};
use super::RoomType;
use crate::config::{MapConfig, MapModifiers, TREASURE_ROW};

/// Rows at or below this may not hold rest sites or elites.
pub const EARLY_ROWS: usize = 4;

/// Half-up rounding of an `f32`, as the reference runtime rounds floats.
fn round_f32(value: f32) -> usize {
    (value + 0.5).floor().max(0.0) as usize
}

/// Nodes that count towards the room budget: connected, and not on the row
/// just below the top.
pub fn available_room_count(graph: &RoomGraph) -> usize {
    let skip_row = graph.height() - 2;
    graph.connected().filter(|n| n.y != skip_row).count()
}

/// Room multiset before monster padding, in shop, rest, treasure, elite,
/// event order.
pub fn room_list(available: usize, config: &MapConfig) -> Vec<RoomType> {
    let count = available as f32;
    let chances = &config.chances;
    let elite = if config.modifiers.contains(MapModifiers::ELITE_SWARM) {
        round_f32(count * (chances.elite * 2.5))
    } else if config.ascension >= config.elite_ascension {
        round_f32(count * chances.elite * 1.6)
    } else {
        round_f32(count * chances.elite)
    };

    let counts = [
        (RoomType::Shop, round_f32(count * chances.shop)),
        (RoomType::Rest, round_f32(count * chances.rest)),
        (RoomType::Treasure, round_f32(count * chances.treasure)),
        (RoomType::Elite, elite),
        (RoomType::Event, round_f32(count * chances.event)),
    ];
    log::info!(
        "room budget: {available} nodes, {} shop, {} rest, {} treasure, {} elite, {} event",
        counts[0].1,
        counts[1].1,
        counts[2].1,
        counts[3].1,
        counts[4].1
    );
    counts
        .into_iter()
        .flat_map(|(room, n)| std::iter::repeat(room).take(n))
        .collect()
}

/// In-place Fisher-Yates from the back, one bounded draw per position.
pub fn shuffle<T, R: Draw>(items: &mut [T], rng: &mut R) -> Result<(), RngError> {
    for i in (1..items.len()).rev() {
        let j = rng.bounded_int_inclusive(i as i32)? as usize;
        items.swap(i, j);
    }
    Ok(())
}

/// Assign `room` to every still-empty node of row `y`, connected or not.
pub fn assign_row(graph: &mut RoomGraph, y: usize, room: RoomType) {
    for x in 0..graph.width() {
        let node = graph.node_mut(NodeRef::new(x, y));
        if node.room.is_none() {
            node.room = Some(room);
        }
    }
}

/// Connected nodes still waiting for a room.
pub fn unassigned_count(graph: &RoomGraph) -> usize {
    graph.connected().filter(|n| n.room.is_none()).count()
}

pub fn assignable_to_row(y: usize, room: RoomType, height: usize) -> bool {
    if y <= EARLY_ROWS && matches!(room, RoomType::Rest | RoomType::Elite) {
        return false;
    }
    y < height - 2 || room != RoomType::Rest
}

fn parent_matches(graph: &RoomGraph, at: NodeRef, room: RoomType) -> bool {
    room.parent_restricted()
        && graph
            .node(at)
            .parents
            .iter()
            .any(|&p| graph.node(p).room == Some(room))
}

fn sibling_matches(graph: &RoomGraph, siblings: &[NodeRef], room: RoomType) -> bool {
    room.sibling_restricted() && siblings.iter().any(|&s| graph.node(s).room == Some(room))
}

/// Index of the first entry of `rooms` that may go on `at`.
fn next_room(graph: &RoomGraph, at: NodeRef, rooms: &[RoomType]) -> Option<usize> {
    let siblings = graph.siblings(at);
    for (idx, &room) in rooms.iter().enumerate() {
        if !assignable_to_row(at.y, room, graph.height()) {
            continue;
        }
        if !parent_matches(graph, at, room) && !sibling_matches(graph, &siblings, room) {
            return Some(idx);
        }
        if at.y == 0 {
            return Some(idx);
        }
    }
    None
}

/// Hand out `rooms` to connected empty nodes in row-major order.
pub fn distribute(graph: &mut RoomGraph, rooms: &mut Vec<RoomType>) {
    for y in 0..graph.height() {
        for x in 0..graph.width() {
            let at = NodeRef::new(x, y);
            let node = graph.node(at);
            if !node.has_edges() || node.room.is_some() {
                continue;
            }
            if let Some(idx) = next_room(graph, at, rooms) {
                let room = rooms.remove(idx);
                graph.node_mut(at).room = Some(room);
            }
        }
    }
}

/// Give every connected node still without a room a monster room.
pub fn fill_remaining(graph: &mut RoomGraph) {
    for node in graph.nodes_mut() {
        if node.has_edges() && node.room.is_none() {
            log::debug!("node ({}, {}) left empty, using a monster room", node.x, node.y);
            node.room = Some(RoomType::Monster);
        }
    }
}

/// Flag one elite node as carrying the final-act key.
pub fn mark_burning_elite<R: Draw>(graph: &mut RoomGraph, rng: &mut R) -> Result<(), RngError> {
    let elites: Vec<NodeRef> = graph
        .nodes()
        .filter(|n| n.room == Some(RoomType::Elite))
        .map(|n| n.pos())
        .collect();
    if elites.is_empty() {
        log::warn!("no elite rooms on this map; no burning elite placed");
        return Ok(());
    }
    let pick = rng.ranged_int_inclusive(0, elites.len() as i32 - 1)? as usize;
    graph.node_mut(elites[pick]).burning_elite = true;
    Ok(())
}

/// Full assignment pass over a path graph.
pub fn assign_rooms<R: Draw>(
    graph: &mut RoomGraph,
    rng: &mut R,
    config: &MapConfig,
) -> Result<(), RngError> {
    let mut rooms = room_list(available_room_count(graph), config);

    let top = graph.height() - 1;
    assign_row(graph, top, RoomType::Rest);
    assign_row(graph, 0, RoomType::Monster);
    let treasure_row = if config.modifiers.contains(MapModifiers::INFESTATION) {
        RoomType::Elite
    } else {
        RoomType::Treasure
    };
    assign_row(graph, TREASURE_ROW, treasure_row);

    let open = unassigned_count(graph);
    if rooms.len() < open {
        rooms.resize(open, RoomType::Monster);
    } else if rooms.len() > open {
        log::info!("room list holds {} rooms for {open} open nodes", rooms.len());
    }

    shuffle(&mut rooms, rng)?;
    distribute(graph, &mut rooms);
    fill_remaining(graph);

    if config.modifiers.contains(MapModifiers::FINAL_ACT_AVAILABLE) && !config.has_emerald_key {
        mark_burning_elite(graph, rng)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spire_rng::SpireRng;

    #[test]
    fn test_round_f32_half_up() {
        assert_eq!(round_f32(2.5), 3);
        assert_eq!(round_f32(2.49), 2);
        assert_eq!(round_f32(0.0), 0);
    }

    #[test]
    fn test_room_list_counts() {
        let config = MapConfig::default();
        let rooms = room_list(50, &config);
        let count = |r: RoomType| rooms.iter().filter(|&&x| x == r).count();
        // 50 * .05 = 2.5 -> 3, 50 * .12 = 6, 50 * .08 = 4, 50 * .22 = 11
        assert_eq!(count(RoomType::Shop), 3);
        assert_eq!(count(RoomType::Rest), 6);
        assert_eq!(count(RoomType::Treasure), 0);
        assert_eq!(count(RoomType::Elite), 4);
        assert_eq!(count(RoomType::Event), 11);
        assert_eq!(rooms[0], RoomType::Shop);
        assert_eq!(rooms[rooms.len() - 1], RoomType::Event);
    }

    #[test]
    fn test_elite_multipliers() {
        let mut config = MapConfig::default();
        config.ascension = 1;
        let rooms = room_list(50, &config);
        // 50 * .08 * 1.6 = 6.4
        assert_eq!(rooms.iter().filter(|&&r| r == RoomType::Elite).count(), 6);

        config.modifiers = MapModifiers::ELITE_SWARM;
        let rooms = room_list(50, &config);
        // 50 * .2 = 10
        assert_eq!(rooms.iter().filter(|&&r| r == RoomType::Elite).count(), 10);
    }

    #[test]
    fn test_shuffle_draw_count() {
        let mut rng = SpireRng::new(3);
        let mut items: Vec<u32> = (0..10).collect();
        shuffle(&mut items, &mut rng).unwrap();
        assert_eq!(rng.counter(), 9);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());

        let mut empty: Vec<u32> = Vec::new();
        shuffle(&mut empty, &mut rng).unwrap();
        assert_eq!(rng.counter(), 9);
    }

    #[test]
    fn test_row_rules() {
        assert!(!assignable_to_row(4, RoomType::Elite, 15));
        assert!(!assignable_to_row(0, RoomType::Rest, 15));
        assert!(assignable_to_row(5, RoomType::Elite, 15));
        assert!(assignable_to_row(5, RoomType::Rest, 15));
        assert!(!assignable_to_row(13, RoomType::Rest, 15));
        assert!(assignable_to_row(13, RoomType::Elite, 15));
        assert!(assignable_to_row(2, RoomType::Shop, 15));
    }

    #[test]
    fn test_sibling_rule_skips_entry() {
        let mut graph = RoomGraph::new(7, 15);
        let p = NodeRef::new(3, 5);
        graph.link(p, NodeRef::new(2, 6));
        graph.link(p, NodeRef::new(3, 6));
        graph.node_mut(p).room = Some(RoomType::Monster);
        graph.node_mut(NodeRef::new(2, 6)).room = Some(RoomType::Event);
        // Give (3, 6) an edge so it is connected.
        graph.link(NodeRef::new(3, 6), NodeRef::new(3, 7));

        let mut rooms = vec![RoomType::Event, RoomType::Shop];
        distribute(&mut graph, &mut rooms);
        assert_eq!(graph.node(NodeRef::new(3, 6)).room, Some(RoomType::Shop));
        assert_eq!(rooms, vec![RoomType::Event]);
    }

    #[test]
    fn test_burning_elite_without_elites_draws_nothing() {
        let mut graph = RoomGraph::new(7, 15);
        let mut rng = SpireRng::new(3);
        mark_burning_elite(&mut graph, &mut rng).unwrap();
        assert_eq!(rng.counter(), 0);
        assert_eq!(graph.burning_elite(), None);
    }
}
