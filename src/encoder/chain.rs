//!
//! Chain-with-carry-over encoding
//!
//! `box_r` is the boundary after job `r`. The chain of boxes carries the free slots of
//! the magazine. A request of job `r` takes a slot from `box_{r-1}` paying the insertion,
//! or keeps the slot of the previous occurrence of the same tool for free.
//!
//! ```text
//!          0,C            0,C
//! s ---> box_{r-1} ----------------> box_r ---> .. ---> box_N ---> t
//!          |                          ^
//!          | c(t)      -K*            | 0
//!          +----> rin_i -----> rout_i-+
//!                  ^             |
//!       rout_prev -+ 0           +-> rin_next  0   (same tool)
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
    let c = instance.capacity;

    let mut network = FlowNetwork::new();
    let source = network.add_vertex();
    let boxes: Vec<_> = (0..=instance.job_count)
        .map(|_| network.add_vertex())
        .collect();
    let rin: Vec<_> = requests.iter().map(|_| network.add_vertex()).collect();
    let rout: Vec<_> = requests.iter().map(|_| network.add_vertex()).collect();
    let sink = network.add_vertex();
    network.set_source(source)?;
    network.set_sink(sink)?;

    network.add_edge(source, boxes[0], 0, c, true, None)?;
    for r in 1..boxes.len() {
        network.add_edge(boxes[r - 1], boxes[r], 0, c, true, None)?;
    }

    for (i, request) in requests.iter().enumerate() {
        let job = request.job;
        network.add_edge(boxes[job], rin[i], instance.cost(request.tool), 1, true, None)?;
        network.add_edge(rin[i], rout[i], -k, 1, false, None)?;
        network.add_edge(rout[i], boxes[job + 1], 0, 1, true, None)?;
    }

    // carry-over to the next occurrence of the same tool
    let mut next_of_tool = vec![None; instance.tool_count + 1];
    for (i, request) in requests.iter().enumerate().rev() {
        if let Some(j) = next_of_tool[request.tool] {
            network.add_edge(rout[i], rin[j], 0, 1, true, None)?;
        }
        next_of_tool[request.tool] = Some(i);
    }

    network.add_edge(boxes[instance.job_count], sink, 0, c, true, None)?;

    log::debug!(
        "chain: R={} K={} V={} E={}",
        requests.len(),
        k,
        network.vertex_count(),
        network.arc_count()
    );
    Ok(network)
}
