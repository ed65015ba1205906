//! Residual network search and augmentation
//! - ShortestPaths
//! - find_augmenting_path
//! - bottleneck, augment_along
//!
//! Records with positive residual capacity (Up or Down) form the residual network.
//! Searching it with reduced costs `c(e) + pi(v) - pi(w)` keeps all weights non-negative,
//! so Dijkstra can be used although raw costs are negative.
//!
use super::arc::ResidueDirection;
use super::network::FlowNetwork;
use super::potential::checked_sum;
use super::{Capacity, Cost, FlowError};
use itertools::Itertools; // for join
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Result of a single-source shortest path search on the residual network
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    /// reduced-cost distance from the source, `None` if unreached
    pub dist: Vec<Option<Cost>>,
    /// the record used to reach each node
    pub pred: Vec<Option<EdgeIndex>>,
}

///
/// Dijkstra from `source` over residual records using reduced costs.
///
pub fn find_shortest_paths(
    network: &FlowNetwork,
    source: NodeIndex,
    potentials: &[Cost],
) -> Result<ShortestPaths, FlowError> {
    let graph = network.graph();
    let n = graph.node_count();
    let mut dist: Vec<Option<Cost>> = vec![None; n];
    let mut pred: Vec<Option<EdgeIndex>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[source.index()] = Some(0);
    heap.push(Reverse((0, source.index())));

    while let Some(Reverse((d, v))) = heap.pop() {
        if dist[v] != Some(d) {
            // stale entry
            continue;
        }
        for e in graph.edges(NodeIndex::new(v)) {
            if network.residual_capacity(e.id()) == 0 {
                continue;
            }
            let w = e.target().index();
            let reduced =
                e.weight().weight as i128 + potentials[v] as i128 - potentials[w] as i128;
            debug_assert!(
                reduced >= 0,
                "negative reduced cost {} on e{}",
                reduced,
                e.id().index()
            );
            let nd = d as i128 + reduced;
            let nd = Cost::try_from(nd).map_err(|_| FlowError::Overflow(nd))?;
            if dist[w].map_or(true, |dw| nd < dw) {
                dist[w] = Some(nd);
                pred[w] = Some(e.id());
                heap.push(Reverse((nd, w)));
            }
        }
    }

    Ok(ShortestPaths { dist, pred })
}

///
/// `pi(v) += d(v)` for every reached node.
///
pub fn update_potentials(
    potentials: &mut [Cost],
    paths: &ShortestPaths,
) -> Result<(), FlowError> {
    for (p, d) in potentials.iter_mut().zip(paths.dist.iter()) {
        if let Some(d) = d {
            *p = checked_sum(*p, *d)?;
        }
    }
    Ok(())
}

///
/// Walk the predecessor records back from `target`.
/// The returned path is ordered from the source to `target`.
///
pub fn path_to(
    network: &FlowNetwork,
    paths: &ShortestPaths,
    target: NodeIndex,
) -> Option<Vec<EdgeIndex>> {
    paths.dist[target.index()]?;

    let graph = network.graph();
    let mut edges = Vec::new();
    let mut v = target;
    while let Some(e) = paths.pred[v.index()] {
        edges.push(e);
        let (tail, _) = graph.edge_endpoints(e)?;
        v = tail;
    }
    edges.reverse();
    Some(edges)
}

///
/// Find the shortest augmenting path from `source` to `sink` and update the potentials.
///
/// Returns `None` if the sink is not reachable in the residual network.
/// Afterwards `potentials[sink]` is the cost per unit flow of the returned path.
///
pub fn find_augmenting_path(
    network: &FlowNetwork,
    source: NodeIndex,
    sink: NodeIndex,
    potentials: &mut [Cost],
) -> Result<Option<Vec<EdgeIndex>>, FlowError> {
    let paths = find_shortest_paths(network, source, potentials)?;
    if paths.dist[sink.index()].is_none() {
        return Ok(None);
    }
    update_potentials(potentials, &paths)?;
    Ok(path_to(network, &paths, sink))
}

///
/// Minimum residual capacity along the path (0 for an empty path)
///
pub fn bottleneck(network: &FlowNetwork, path: &[EdgeIndex]) -> Capacity {
    path.iter()
        .map(|&e| network.residual_capacity(e))
        .min()
        .unwrap_or(0)
}

///
/// Push `amount` along every record of the path.
///
/// Returns the change of the objective: Up records add `weight * amount`,
/// Down records subtract the weight of their mate.
/// Records outside the objective never change it.
///
pub fn augment_along(network: &mut FlowNetwork, path: &[EdgeIndex], amount: Capacity) -> i128 {
    let mut delta: i128 = 0;
    for &e in path {
        network.augment(e, amount);

        let arc = *network.arc(e);
        match arc.direction {
            ResidueDirection::Up => {
                if arc.in_objective {
                    delta += arc.weight as i128 * amount as i128;
                }
            }
            ResidueDirection::Down => {
                let mate = network.arc(arc.mate);
                if mate.in_objective {
                    delta -= mate.weight as i128 * amount as i128;
                }
            }
        }
    }
    delta
}

pub fn format_path(network: &FlowNetwork, path: &[EdgeIndex]) -> String {
    path.iter()
        .map(|&e| {
            let arc = network.arc(e);
            let original = match arc.direction {
                ResidueDirection::Up => e,
                ResidueDirection::Down => arc.mate,
            };
            format!("e{}({})w{}", original.index(), arc.direction, arc.weight)
        })
        .join(",")
}
