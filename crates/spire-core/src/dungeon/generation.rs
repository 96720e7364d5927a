//! Path generation
//!
//! Paths start on row 0 and climb one row per step, drifting at most one
//! column. Two rules shape the drift: a new edge may not close a loop with a
//! common ancestor fewer than [`MIN_ANCESTOR_GAP`] rows back, and it may not
//! cross the edges of the neighbouring nodes.

use spire_rng::{Draw, RngError};

use super::graph::{NodeRef, RoomGraph};

pub const MIN_ANCESTOR_GAP: usize = 3;
pub const MAX_ANCESTOR_GAP: usize = 5;

/// `[min, max]` as one bounded draw offset by `min`.
fn rand_range<R: Draw>(rng: &mut R, min: i32, max: i32) -> Result<i32, RngError> {
    Ok(rng.bounded_int_inclusive(max - min)? + min)
}

/// Walk `density` paths from row 0 to the boss.
///
/// The second path's start column is redrawn until it differs from the first.
pub fn create_paths<R: Draw>(
    graph: &mut RoomGraph,
    density: usize,
    rng: &mut R,
    ancestor_quirk: bool,
) -> Result<(), RngError> {
    let row_end = graph.width() as i32 - 1;
    let mut first_start = None;
    for i in 0..density {
        let mut start = rand_range(rng, 0, row_end)?;
        if i == 0 {
            first_start = Some(start);
        }
        while i == 1 && Some(start) == first_start {
            start = rand_range(rng, 0, row_end)?;
        }
        walk_path(graph, NodeRef::new(start as usize, 0), rng, ancestor_quirk)?;
    }
    Ok(())
}

fn walk_path<R: Draw>(
    graph: &mut RoomGraph,
    start: NodeRef,
    rng: &mut R,
    ancestor_quirk: bool,
) -> Result<(), RngError> {
    let row_end = graph.width() as i32 - 1;
    let mut cur = start;
    loop {
        if cur.y + 1 >= graph.height() {
            let boss = graph.boss();
            graph.link(cur, boss);
            return Ok(());
        }

        let x = cur.x as i32;
        let (min, max) = if x == 0 {
            (0, 1)
        } else if x == row_end {
            (-1, 0)
        } else {
            (-1, 1)
        };
        let mut new_x = x + rand_range(rng, min, max)?;
        let new_y = cur.y + 1;

        // Parents of the first candidate only; redirects do not refresh this.
        let parents = graph.node(NodeRef::new(new_x as usize, new_y)).parents.clone();
        for parent in parents {
            if parent == cur {
                continue;
            }
            let Some(ancestor) =
                common_ancestor(graph, parent, cur, MAX_ANCESTOR_GAP, ancestor_quirk)
            else {
                continue;
            };
            if new_y - ancestor.y >= MIN_ANCESTOR_GAP {
                continue;
            }
            if new_x > x {
                new_x = x + rand_range(rng, -1, 0)?;
                if new_x < 0 {
                    new_x = x;
                }
            } else if new_x == x {
                new_x = x + rand_range(rng, -1, 1)?;
                if new_x > row_end {
                    new_x = x - 1;
                } else if new_x < 0 {
                    new_x = x + 1;
                }
            } else {
                new_x = x + rand_range(rng, 0, 1)?;
                if new_x > row_end {
                    new_x = x;
                }
            }
        }

        if x != 0 {
            let left = graph.node(NodeRef::new(cur.x - 1, cur.y));
            if let Some(edge) = left.max_edge() {
                if edge.dst.x as i32 > new_x {
                    new_x = edge.dst.x as i32;
                }
            }
        }
        if x < row_end {
            let right = graph.node(NodeRef::new(cur.x + 1, cur.y));
            if let Some(edge) = right.min_edge() {
                if (edge.dst.x as i32) < new_x {
                    new_x = edge.dst.x as i32;
                }
            }
        }

        let next = NodeRef::new(new_x as usize, new_y);
        graph.link(cur, next);
        cur = next;
    }
}

/// Nearest shared ancestor of two nodes on the same row, searched at most
/// `max_depth` rows down.
///
/// The walk follows the rightmost parent of the left node and the leftmost
/// parent of the right node. With `quirk` set, left and right are decided
/// by comparing `node1.x` with `node2.y`.
pub fn common_ancestor(
    graph: &RoomGraph,
    node1: NodeRef,
    node2: NodeRef,
    max_depth: usize,
    quirk: bool,
) -> Option<NodeRef> {
    let node1_left = if quirk {
        node1.x < node2.y
    } else {
        node1.x < node2.x
    };
    let (mut left, mut right) = if node1_left {
        (node1, node2)
    } else {
        (node2, node1)
    };

    let lowest = node1.y as i64 - max_depth as i64;
    let mut cur_y = node1.y as i64;
    while cur_y >= 0 && cur_y >= lowest {
        left = rightmost(&graph.node(left).parents)?;
        right = leftmost(&graph.node(right).parents)?;
        if left == right {
            return Some(left);
        }
        cur_y -= 1;
    }
    None
}

fn rightmost(nodes: &[NodeRef]) -> Option<NodeRef> {
    nodes
        .iter()
        .copied()
        .reduce(|best, n| if n.x > best.x { n } else { best })
}

fn leftmost(nodes: &[NodeRef]) -> Option<NodeRef> {
    nodes
        .iter()
        .copied()
        .reduce(|best, n| if n.x < best.x { n } else { best })
}

/// Drop row-0 edges whose destination an earlier row-0 edge already reaches.
///
/// Parent records on the destinations are left alone.
pub fn filter_redundant_edges(graph: &mut RoomGraph) {
    let mut seen: Vec<NodeRef> = Vec::new();
    for x in 0..graph.width() {
        let at = NodeRef::new(x, 0);
        let mut duplicates = Vec::new();
        for edge in &graph.node(at).edges {
            if seen.contains(&edge.dst) {
                duplicates.push(edge.dst);
            }
            seen.push(edge.dst);
        }
        for dst in duplicates {
            log::debug!("dropping duplicate row-0 edge ({x}, 0) -> ({}, {})", dst.x, dst.y);
            graph.node_mut(at).remove_edge(dst);
        }
    }
}
