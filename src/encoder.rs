//!
//! Encoders from a `ProblemInstance` into a `FlowNetwork`.
//!
//! The minimum cost maximum flow of the produced network, restricted to the arcs in the
//! objective, equals the minimum total insertion cost of the instance.
//!
//! A request "job `j` needs tool `t`" is encoded as a unit arc of weight `-K` outside the
//! objective. Skipping it forfeits `K`, more than any achievable saving, so every minimum
//! cost maximum flow saturates it. The real insertion costs live on separate arcs.
//!
pub mod chain;
pub mod interval_gap;
#[cfg(test)]
pub mod mocks;
pub mod pairwise_future;

use crate::error::Result;
use crate::instance::ProblemInstance;
use crate::min_flow::network::FlowNetwork;
use crate::min_flow::Cost;
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Encoder {
    /// `O(R^2)` arcs, one path per magazine slot
    #[strum(to_string = "pf", serialize = "pairwise-future")]
    PairwiseFuture,
    /// `O(N + R)` arcs, spare capacity carried along a chain of job boundaries
    #[strum(to_string = "lc", serialize = "chain")]
    ChainCarryOver,
    /// `O(N + sum of occurrences)` arcs, savings of keeping a tool through an idle gap
    #[strum(to_string = "lsg", serialize = "interval-gap")]
    IntervalGap,
}

impl Encoder {
    ///
    /// Build the flow network of `instance`.
    ///
    /// `penalty <= 0` chooses a safe penalty automatically.
    ///
    pub fn build(&self, instance: &ProblemInstance, penalty: Cost) -> Result<FlowNetwork> {
        match self {
            Encoder::PairwiseFuture => pairwise_future::build(instance, penalty),
            Encoder::ChainCarryOver => chain::build(instance, penalty),
            Encoder::IntervalGap => interval_gap::build(instance, penalty),
        }
    }

    /// Whether the encoder tags arcs with tools, so that loadings can be recovered.
    pub fn tags_tools(&self) -> bool {
        matches!(self, Encoder::IntervalGap)
    }
}

///
/// `R * max(1, max tool cost) + 1` exceeds the cost of inserting every request fresh.
///
pub fn request_penalty(instance: &ProblemInstance, n_requests: usize) -> Cost {
    (n_requests as Cost)
        .saturating_mul(instance.max_tool_cost().max(1))
        .saturating_add(1)
}
