use super::network::FlowNetwork;
use super::Cost;
use petgraph::graph::{EdgeIndex, NodeIndex};

/// mock network generation functions
///
/// ```text
///      a
///   1 / \ 2
///    s   t
///  -5 \ / 2
///      b
/// ```
/// `s->a` and `a->t` have capacity 2, the others 1.
pub fn mock_diamond_network() -> (FlowNetwork, [NodeIndex; 4]) {
    let mut n = FlowNetwork::new();
    let s = n.add_vertex();
    let a = n.add_vertex();
    let b = n.add_vertex();
    let t = n.add_vertex();
    n.add_edge(s, a, 1, 2, true, None).unwrap();
    n.add_edge(s, b, -5, 1, true, None).unwrap();
    n.add_edge(a, t, 2, 2, true, None).unwrap();
    n.add_edge(b, t, 2, 1, true, None).unwrap();
    n.set_source(s).unwrap();
    n.set_sink(t).unwrap();
    (n, [s, a, b, t])
}

/// Greedy first path `s->a->b->t` has to be partially undone by the second path.
/// Returns the index of the crossing arc `a->b`.
pub fn mock_crossing_network() -> (FlowNetwork, [NodeIndex; 4], EdgeIndex) {
    let mut n = FlowNetwork::new();
    let s = n.add_vertex();
    let a = n.add_vertex();
    let b = n.add_vertex();
    let t = n.add_vertex();
    n.add_edge(s, a, 1, 1, true, None).unwrap();
    n.add_edge(s, b, 2, 1, true, None).unwrap();
    let cross = n.add_edge(a, b, 0, 1, true, None).unwrap();
    n.add_edge(a, t, 3, 1, true, None).unwrap();
    n.add_edge(b, t, 1, 1, true, None).unwrap();
    n.set_source(s).unwrap();
    n.set_sink(t).unwrap();
    (n, [s, a, b, t], cross)
}

/// A unit of flow has to choose between paying 5 and skipping a mandatory arc.
///
/// ```text
///              5        -100*
///           +----> a --------+
/// s ---> x -+                +--> t
///    1      +----> b --------+
///              0         0
/// ```
pub fn mock_penalty_network() -> FlowNetwork {
    let mut n = FlowNetwork::new();
    let s = n.add_vertex();
    let x = n.add_vertex();
    let a = n.add_vertex();
    let b = n.add_vertex();
    let t = n.add_vertex();
    n.add_edge(s, x, 0, 1, true, None).unwrap();
    n.add_edge(x, a, 5, 1, true, None).unwrap();
    n.add_edge(x, b, 0, 1, true, None).unwrap();
    n.add_edge(a, t, -100, 1, false, None).unwrap();
    n.add_edge(b, t, 0, 1, true, None).unwrap();
    n.set_source(s).unwrap();
    n.set_sink(t).unwrap();
    n
}

/// two parallel arcs of different cost between the same pair of nodes
pub fn mock_parallel_network() -> (FlowNetwork, [EdgeIndex; 2]) {
    let mut n = FlowNetwork::new();
    let s = n.add_vertex();
    let a = n.add_vertex();
    let t = n.add_vertex();
    n.add_edge(s, a, 0, 3, true, None).unwrap();
    let e1 = n.add_edge(a, t, 2, 2, true, None).unwrap();
    let e2 = n.add_edge(a, t, 1, 2, true, None).unwrap();
    n.set_source(s).unwrap();
    n.set_sink(t).unwrap();
    (n, [e1, e2])
}

/// `s -> a -> t`, both arcs of the same `weight` and capacity 1
pub fn mock_series_network(weight: Cost) -> (FlowNetwork, [NodeIndex; 3]) {
    let mut n = FlowNetwork::new();
    let s = n.add_vertex();
    let a = n.add_vertex();
    let t = n.add_vertex();
    n.add_edge(s, a, weight, 1, true, None).unwrap();
    n.add_edge(a, t, weight, 1, true, None).unwrap();
    n.set_source(s).unwrap();
    n.set_sink(t).unwrap();
    (n, [s, a, t])
}

/// `a -> b -> c -> a`
pub fn mock_cyclic_network() -> FlowNetwork {
    let mut n = FlowNetwork::new();
    let a = n.add_vertex();
    let b = n.add_vertex();
    let c = n.add_vertex();
    n.add_edge(a, b, -1, 10, true, None).unwrap();
    n.add_edge(b, c, -2, 10, true, None).unwrap();
    n.add_edge(c, a, -2, 10, true, None).unwrap();
    n.set_source(a).unwrap();
    n.set_sink(c).unwrap();
    n
}
