pub mod arc;
#[cfg(test)]
pub mod mocks;
pub mod network;
pub mod potential;
pub mod residue;
pub mod utils;

use network::FlowNetwork;
use potential::initial_potentials;
use residue::{augment_along, bottleneck, find_augmenting_path, format_path};
use thiserror::Error;
use utils::draw;

/// cost per unit flow, can be negative
pub type Cost = i64;
/// capacity and flow amount of an arc
pub type Capacity = u32;
/// 1-based tool identifier
pub type ToolId = usize;
/// tools resident in each vertex-index unit
pub type Loadings = Vec<Vec<ToolId>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("vertex {vertex} is out of range (network has {count} vertices)")]
    VertexOutOfRange { vertex: usize, count: usize },
    #[error("source is not set")]
    SourceUnset,
    #[error("sink is not set")]
    SinkUnset,
    #[error("source and sink are the same vertex")]
    SourceIsSink,
    #[error("forward arcs of the network contain a cycle")]
    Cyclic,
    #[error("total cost {0} does not fit into 64 bits")]
    Overflow(i128),
}

/// Result of the min-cost max-flow computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// sum of `weight * flow` over the arcs in the objective
    pub cost: Cost,
    /// total amount of flow from source to sink
    pub flow: u64,
    /// augmenting paths in the order they were applied
    pub augmentations: Vec<Augmentation>,
    /// tools resident in each vertex-index unit, recovered from tool-tagged arcs
    pub loadings: Loadings,
}

/// A single augmenting path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Augmentation {
    /// flow pushed along the path, at least 1
    pub amount: Capacity,
    /// cost per unit flow of the path, including the arcs outside the objective
    pub unit_cost: Cost,
}

//
// public functions
//

///
/// Find minimum cost maximum flow on the FlowNetwork
/// by successive shortest augmenting paths with Johnson potentials.
///
pub fn min_cost_max_flow(network: &mut FlowNetwork) -> Result<Solution, FlowError> {
    let source = network.source().ok_or(FlowError::SourceUnset)?;
    let sink = network.sink().ok_or(FlowError::SinkUnset)?;
    if source == sink {
        return Err(FlowError::SourceIsSink);
    }
    if !network.is_acyclic() {
        return Err(FlowError::Cyclic);
    }
    draw(network);

    let mut potentials = initial_potentials(network, source)?;
    let mut cost: i128 = 0;
    let mut flow: u64 = 0;
    let mut augmentations = Vec::new();

    while let Some(path) = find_augmenting_path(network, source, sink, &mut potentials)? {
        let amount = bottleneck(network, &path);
        if amount == 0 {
            break;
        }
        // pi(source) stays 0
        let unit_cost = potentials[sink.index()];
        log::trace!(
            "augment {} at {} along {}",
            amount,
            unit_cost,
            format_path(network, &path)
        );
        cost += augment_along(network, &path, amount);
        flow += amount as u64;
        augmentations.push(Augmentation { amount, unit_cost });
    }

    let cost = Cost::try_from(cost).map_err(|_| FlowError::Overflow(cost))?;
    log::debug!(
        "min cost flow: V={} E={} flow={} cost={} augmentations={}",
        network.vertex_count(),
        network.arc_count(),
        flow,
        cost,
        augmentations.len()
    );

    Ok(Solution {
        cost,
        flow,
        augmentations,
        loadings: network.loadings(),
    })
}
