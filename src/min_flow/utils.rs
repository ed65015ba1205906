//!
//! utils
//!
use super::network::FlowNetwork;
use petgraph::dot::Dot;
use petgraph::graph::DiGraph;

///
/// Dump the Up records of the network in dot format on the trace log.
///
pub fn draw(network: &FlowNetwork) {
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("{}", to_dot(network));
    }
}

///
/// Dot representation of the Up records labelled by `flow/capacity weight`.
/// Arcs outside the objective are marked with `*`.
///
pub fn to_dot(network: &FlowNetwork) -> String {
    let forward: DiGraph<usize, String> = network.graph().filter_map(
        |v, _| Some(v.index()),
        |_, arc| {
            if arc.is_forward() {
                Some(arc.to_string())
            } else {
                None
            }
        },
    );
    format!("{}", Dot::with_config(&forward, &[]))
}
