//!
//! Initial node potentials for the reduced cost shortest path search.
//!
//! Arcs with the big negative penalty make the plain Dijkstra invalid on the first iteration.
//! Because the Up records form a DAG, the shortest distances from the source can be found by
//! a single relaxation pass in topological order, and used as Johnson potentials
//! `c(v, w) + pi(v) - pi(w) >= 0`.
//!
use super::network::FlowNetwork;
use super::{Cost, FlowError};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::VecDeque;

///
/// Kahn's algorithm on the Up records.
///
/// Returns `None` if the Up records contain a cycle.
///
pub fn topological_order(network: &FlowNetwork) -> Option<Vec<NodeIndex>> {
    let graph = network.graph();
    let mut indegree = vec![0usize; graph.node_count()];
    for e in graph.edge_references().filter(|e| e.weight().is_forward()) {
        indegree[e.target().index()] += 1;
    }

    let mut queue: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|v| indegree[v.index()] == 0)
        .collect();
    let mut order = Vec::with_capacity(graph.node_count());

    while let Some(v) = queue.pop_front() {
        order.push(v);
        for e in graph.edges(v).filter(|e| e.weight().is_forward()) {
            let w = e.target();
            indegree[w.index()] -= 1;
            if indegree[w.index()] == 0 {
                queue.push_back(w);
            }
        }
    }

    if order.len() == graph.node_count() {
        Some(order)
    } else {
        None
    }
}

///
/// Shortest distance from `source` along Up records with residual capacity,
/// or zero for nodes unreachable from the source.
///
/// Fails with `FlowError::Overflow` if a distance does not fit into `Cost`.
///
pub fn initial_potentials(
    network: &FlowNetwork,
    source: NodeIndex,
) -> Result<Vec<Cost>, FlowError> {
    let graph = network.graph();
    let mut pi = vec![0; graph.node_count()];
    let order = match topological_order(network) {
        Some(order) => order,
        None => return Ok(pi),
    };

    let mut dist: Vec<Option<Cost>> = vec![None; graph.node_count()];
    dist[source.index()] = Some(0);

    for v in order {
        let dv = match dist[v.index()] {
            Some(d) => d,
            None => continue,
        };
        for e in graph.edges(v).filter(|e| e.weight().is_forward()) {
            if network.residual_capacity(e.id()) == 0 {
                continue;
            }
            let w = e.target().index();
            let d = checked_sum(dv, e.weight().weight)?;
            if dist[w].map_or(true, |dw| d < dw) {
                dist[w] = Some(d);
            }
        }
    }

    for (p, d) in pi.iter_mut().zip(dist) {
        if let Some(d) = d {
            *p = d;
        }
    }
    Ok(pi)
}

///
/// `a + b`, or `FlowError::Overflow` with the exact sum
///
pub fn checked_sum(a: Cost, b: Cost) -> Result<Cost, FlowError> {
    a.checked_add(b)
        .ok_or(FlowError::Overflow(a as i128 + b as i128))
}
