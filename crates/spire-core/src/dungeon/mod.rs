//! Act map generation
//!
//! A map is a 7-wide, 15-tall grid of nodes joined by upward edges, with
//! every top-row node leading to a synthetic boss node. Generation consumes
//! a single stream (the per-act map stream) in a fixed order:
//!
//! 1. path walking ([`generation::create_paths`])
//! 2. the room multiset shuffle ([`assign::shuffle`])
//! 3. the burning elite pick, when the final act is reachable

pub mod assign;
pub mod generation;
mod graph;
mod room;

pub use graph::{Edge, NodeRef, RoomGraph, RoomNode, BOSS_X};
pub use room::RoomType;

use spire_rng::Draw;

use crate::config::MapConfig;
use crate::error::CoreError;

/// Generate a typed act map from `rng`.
pub fn generate<R: Draw>(rng: &mut R, config: &MapConfig) -> Result<RoomGraph, CoreError> {
    config.validate()?;
    let mut graph = RoomGraph::new(config.width, config.height);
    generation::create_paths(
        &mut graph,
        config.effective_density(),
        rng,
        config.ancestor_quirk,
    )?;
    generation::filter_redundant_edges(&mut graph);
    assign::assign_rooms(&mut graph, rng, config)?;
    log::debug!("map generated, stream counter now {}", rng.counter());
    Ok(graph)
}
