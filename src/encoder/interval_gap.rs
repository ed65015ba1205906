//!
//! Interval-gap encoding
//!
//! The baseline inserts every tool at the start of each of its blocks (maximal runs of
//! consecutive jobs using it). Keeping a tool through an idle gap between two blocks saves
//! its cost but occupies one slot in every job of the gap. The flow picks the gaps with
//! maximum total saving and the result is `baseline - savings`.
//!
//! ```text
//!              -K*, |T_j|
//!          +-----------------+
//! box_{j-1}                   box_j   ...   box_N ==> final
//!          +-----------------+               Ctot,1 and 0,C-1
//!              0, C - |T_j|
//!
//! box_{p+1} -------------------------> box_q    -c(t), 1   (t used in jobs p and q only)
//! ```
//!
//! `box_j` is vertex `j`, so the loadings of the solution are indexed by job.
//!
use crate::error::Result;
use crate::instance::ProblemInstance;
use crate::min_flow::network::FlowNetwork;
use crate::min_flow::{Capacity, Cost};
use itertools::Itertools; // for tuple_windows

///
/// Number of maximal runs of consecutive jobs that use each tool. Index 0 is unused.
///
pub fn blocks(instance: &ProblemInstance) -> Vec<usize> {
    let mut n = vec![0; instance.tool_count + 1];
    for (j, tools) in instance.jobs.iter().enumerate() {
        for &tool in tools {
            if j == 0 || !instance.jobs[j - 1].contains(&tool) {
                n[tool] += 1;
            }
        }
    }
    n
}

///
/// Cost of inserting every tool at the start of each of its blocks
///
pub fn baseline_cost(instance: &ProblemInstance) -> Cost {
    blocks(instance)
        .iter()
        .enumerate()
        .skip(1)
        .map(|(tool, &n)| instance.cost(tool).saturating_mul(n as Cost))
        .fold(0, Cost::saturating_add)
}

pub fn build(instance: &ProblemInstance, penalty: Cost) -> Result<FlowNetwork> {
    instance.check_feasible()?;
    let c = instance.capacity;
    let baseline = baseline_cost(instance);
    let k = if penalty > 0 {
        penalty
    } else {
        baseline.saturating_add(1)
    };

    let mut network = FlowNetwork::new();
    let boxes: Vec<_> = (0..=instance.job_count)
        .map(|_| network.add_vertex())
        .collect();
    let last = network.add_vertex();
    network.set_source(boxes[0])?;
    network.set_sink(last)?;

    for (j, tools) in instance.jobs.iter().enumerate() {
        let required = tools.len() as Capacity;
        if required > 0 {
            network.add_edge(boxes[j], boxes[j + 1], -k, required, false, None)?;
        }
        let free = c - required;
        if free > 0 {
            network.add_edge(boxes[j], boxes[j + 1], 0, free, true, None)?;
        }
    }

    for (tool, jobs) in instance.occurrences().iter().enumerate() {
        for (&p, &q) in jobs.iter().tuple_windows() {
            if q == p + 1 {
                continue;
            }
            network.add_edge(
                boxes[p + 1],
                boxes[q],
                -instance.cost(tool),
                1,
                true,
                Some(tool),
            )?;
        }
    }

    if c > 0 {
        network.add_edge(boxes[instance.job_count], last, baseline, 1, true, None)?;
    }
    if c > 1 {
        network.add_edge(boxes[instance.job_count], last, 0, c - 1, true, None)?;
    }

    log::debug!(
        "interval-gap: baseline={} K={} V={} E={}",
        baseline,
        k,
        network.vertex_count(),
        network.arc_count()
    );
    Ok(network)
}
