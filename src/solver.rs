//!
//! Build the flow network of an instance and solve it.
//!
use crate::encoder::Encoder;
use crate::error::Result;
use crate::instance::ProblemInstance;
use crate::min_flow::{Cost, ToolId};

/// Tool loading plan of an instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub encoder: Encoder,
    /// minimum total insertion cost
    pub cost: Cost,
    /// tools kept in the magazine through each job without being required by it.
    /// Empty if the encoder does not tag arcs with tools.
    pub kept: Vec<Vec<ToolId>>,
}

impl Plan {
    ///
    /// Tools resident while processing `job`: the requirements plus the kept tools.
    /// `None` if the instance has no such job.
    ///
    pub fn resident(&self, instance: &ProblemInstance, job: usize) -> Option<Vec<ToolId>> {
        let mut tools: Vec<ToolId> = instance.jobs.get(job)?.iter().copied().collect();
        if let Some(kept) = self.kept.get(job) {
            tools.extend(kept.iter().copied());
        }
        tools.sort_unstable();
        tools.dedup();
        Some(tools)
    }
}

///
/// Build the network of `instance` with `encoder` and penalty `K`, then compute its
/// minimum cost maximum flow.
///
/// `penalty <= 0` lets the encoder choose `K`.
///
pub fn solve_instance(
    instance: &ProblemInstance,
    encoder: Encoder,
    penalty: Cost,
) -> Result<Plan> {
    let mut network = encoder.build(instance, penalty)?;
    let solution = network.solve()?;

    let kept = if encoder.tags_tools() {
        solution
            .loadings
            .into_iter()
            .take(instance.job_count)
            .collect()
    } else {
        Vec::new()
    };

    log::debug!(
        "[{}] M={} N={} C={} cost={}",
        encoder,
        instance.tool_count,
        instance.job_count,
        instance.capacity,
        solution.cost
    );
    Ok(Plan {
        encoder,
        cost: solution.cost,
        kept,
    })
}
