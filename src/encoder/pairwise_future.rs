//!
//! Pairwise-future encoding
//!
//! Each magazine slot is a path from the source that visits the requests it serves in
//! job order. Moving from request `i` to a later request `j` costs the insertion of
//! `j`'s tool, or nothing if both requests need the same tool.
//!
//! ```text
//!                 c(t_i)           -K*
//! s --> slot_k ----------> pre_i ------> post_i --> t
//!         |                               |
//!         +------------> t                +--> pre_j  (job(j) > job(i))
//!            idle                              0 or c(t_j)
//! ```
//!
use super::request_penalty;
use crate::error::Result;
use crate::instance::ProblemInstance;
use crate::min_flow::network::FlowNetwork;
use crate::min_flow::Cost;

pub fn build(instance: &ProblemInstance, penalty: Cost) -> Result<FlowNetwork> {
    instance.check_feasible()?;
    let requests = instance.requests();
    let k = if penalty > 0 {
        penalty
    } else {
        request_penalty(instance, requests.len())
    };

    let mut network = FlowNetwork::new();
    let source = network.add_vertex();
    let slots: Vec<_> = (0..instance.capacity)
        .map(|_| network.add_vertex())
        .collect();
    let pre: Vec<_> = requests.iter().map(|_| network.add_vertex()).collect();
    let post: Vec<_> = requests.iter().map(|_| network.add_vertex()).collect();
    let sink = network.add_vertex();
    network.set_source(source)?;
    network.set_sink(sink)?;

    for &slot in &slots {
        network.add_edge(source, slot, 0, 1, true, None)?;
        // a slot serving no request
        network.add_edge(slot, sink, 0, 1, true, None)?;
        for (i, request) in requests.iter().enumerate() {
            network.add_edge(slot, pre[i], instance.cost(request.tool), 1, true, None)?;
        }
    }

    for i in 0..requests.len() {
        network.add_edge(pre[i], post[i], -k, 1, false, None)?;
        network.add_edge(post[i], sink, 0, 1, true, None)?;
    }

    for (i, a) in requests.iter().enumerate() {
        for (j, b) in requests.iter().enumerate().skip(i + 1) {
            if b.job <= a.job {
                continue;
            }
            let weight = if a.tool == b.tool {
                0
            } else {
                instance.cost(b.tool)
            };
            network.add_edge(post[i], pre[j], weight, 1, true, None)?;
        }
    }

    log::debug!(
        "pairwise-future: R={} K={} V={} E={}",
        requests.len(),
        k,
        network.vertex_count(),
        network.arc_count()
    );
    Ok(network)
}
