//! Room graph arena
//!
//! Nodes live in one flat `Vec` indexed by grid position. Edges and parent
//! links are [`NodeRef`] pairs, never references, so shared parents need no
//! ownership tricks.

use std::collections::VecDeque;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::RoomType;

/// Column of the synthetic boss node.
pub const BOSS_X: usize = 3;

/// Grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    pub x: usize,
    pub y: usize,
}

impl NodeRef {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Directed edge from one row to the next (or to the boss node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub src: NodeRef,
    pub dst: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomNode {
    pub x: usize,
    pub y: usize,
    pub room: Option<RoomType>,
    /// Outgoing edges, unique by destination, sorted by `(dst.x, dst.y)`
    pub edges: Vec<Edge>,
    /// Every node that ever added an edge here; may repeat
    pub parents: Vec<NodeRef>,
    /// Elite guarding the final-act key
    pub burning_elite: bool,
}

impl RoomNode {
    fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            room: None,
            edges: Vec::new(),
            parents: Vec::new(),
            burning_elite: false,
        }
    }

    pub fn pos(&self) -> NodeRef {
        NodeRef::new(self.x, self.y)
    }

    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    /// Add an edge unless one to the same destination exists, keeping order.
    pub fn add_edge(&mut self, dst: NodeRef) {
        if self.edges.iter().any(|e| e.dst == dst) {
            return;
        }
        self.edges.push(Edge {
            src: self.pos(),
            dst,
        });
        self.edges.sort_by_key(|e| (e.dst.x, e.dst.y));
    }

    pub fn remove_edge(&mut self, dst: NodeRef) {
        self.edges.retain(|e| e.dst != dst);
    }

    pub fn min_edge(&self) -> Option<&Edge> {
        self.edges.first()
    }

    pub fn max_edge(&self) -> Option<&Edge> {
        self.edges.last()
    }
}

/// A generated act map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomGraph {
    width: usize,
    height: usize,
    nodes: Vec<RoomNode>,
}

impl RoomGraph {
    pub fn new(width: usize, height: usize) -> Self {
        let nodes = (0..height)
            .flat_map(|y| (0..width).map(move |x| RoomNode::new(x, y)))
            .collect();
        Self {
            width,
            height,
            nodes,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Synthetic node every top-row edge points at, two rows above the grid.
    pub fn boss(&self) -> NodeRef {
        NodeRef::new(BOSS_X, self.height + 1)
    }

    pub fn node(&self, at: NodeRef) -> &RoomNode {
        &self.nodes[at.y * self.width + at.x]
    }

    pub fn node_mut(&mut self, at: NodeRef) -> &mut RoomNode {
        &mut self.nodes[at.y * self.width + at.x]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&RoomNode> {
        (x < self.width && y < self.height).then(|| &self.nodes[y * self.width + x])
    }

    pub fn row(&self, y: usize) -> &[RoomNode] {
        &self.nodes[y * self.width..(y + 1) * self.width]
    }

    /// Row-major scan, bottom row first.
    pub fn nodes(&self) -> impl Iterator<Item = &RoomNode> {
        self.nodes.iter()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut RoomNode> {
        self.nodes.iter_mut()
    }

    /// Nodes with at least one outgoing edge.
    pub fn connected(&self) -> impl Iterator<Item = &RoomNode> {
        self.nodes.iter().filter(|n| n.has_edges())
    }

    /// Link `src -> dst` and record the parent on `dst` (boss edges have no
    /// parent record).
    pub fn link(&mut self, src: NodeRef, dst: NodeRef) {
        self.node_mut(src).add_edge(dst);
        if dst.y < self.height {
            self.node_mut(dst).parents.push(src);
        }
    }

    /// Other children of this node's parents, in parent and edge order.
    pub fn siblings(&self, at: NodeRef) -> Vec<NodeRef> {
        let mut siblings = Vec::new();
        for &parent in &self.node(at).parents {
            for edge in &self.node(parent).edges {
                if edge.dst != at {
                    siblings.push(edge.dst);
                }
            }
        }
        siblings
    }

    pub fn room_count(&self, room: RoomType) -> usize {
        self.connected().filter(|n| n.room == Some(room)).count()
    }

    pub fn burning_elite(&self) -> Option<NodeRef> {
        self.nodes.iter().find(|n| n.burning_elite).map(|n| n.pos())
    }

    /// Every node reachable from row 0, the boss included when reached.
    pub fn reachable_from_start(&self) -> Vec<NodeRef> {
        let mut seen = vec![false; self.nodes.len()];
        let mut queue: VecDeque<NodeRef> = self
            .row(0)
            .iter()
            .filter(|n| n.has_edges())
            .map(|n| n.pos())
            .collect();
        let mut reached = Vec::new();
        let mut boss_reached = false;
        while let Some(at) = queue.pop_front() {
            let idx = at.y * self.width + at.x;
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            reached.push(at);
            for edge in &self.node(at).edges {
                if edge.dst.y >= self.height {
                    boss_reached = true;
                } else {
                    queue.push_back(edge.dst);
                }
            }
        }
        if boss_reached {
            reached.push(self.boss());
        }
        reached
    }

    /// Whether some path leads from `at` to the boss node.
    pub fn reaches_boss(&self, at: NodeRef) -> bool {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![at];
        while let Some(cur) = stack.pop() {
            if cur.y >= self.height {
                return true;
            }
            let idx = cur.y * self.width + cur.x;
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            stack.extend(self.node(cur).edges.iter().map(|e| e.dst));
        }
        false
    }

    /// ASCII layout, top row first. Each row is an edge line followed by a
    /// room line; unconnected cells are blank and unassigned rooms are `*`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in (0..self.height).rev() {
            out.push_str("      ");
            for node in self.row(y) {
                let (mut left, mut mid, mut right) = (' ', ' ', ' ');
                for edge in &node.edges {
                    match edge.dst.x.cmp(&node.x) {
                        std::cmp::Ordering::Less => left = '\\',
                        std::cmp::Ordering::Equal => mid = '|',
                        std::cmp::Ordering::Greater => right = '/',
                    }
                }
                out.push(left);
                out.push(mid);
                out.push(right);
            }
            let _ = write!(out, "\n{y:<2}    ");
            for node in self.row(y) {
                let symbol = if node.has_edges() {
                    node.room.map_or('*', RoomType::symbol)
                } else {
                    ' '
                };
                out.push(' ');
                out.push(symbol);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    /// Room symbols only, one line per row, top row first.
    pub fn layout(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|n| {
                        if n.has_edges() {
                            n.room.map_or('*', RoomType::symbol)
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// JSON form for renderers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
