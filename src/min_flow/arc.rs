//!
//! Arc records of the flow network
//!
//! Every arc `v -> w` added to a [`FlowNetwork`](super::network::FlowNetwork) is stored as
//! two records in the same edge arena:
//!
//! * `Up` record `v -> w` which owns the flow value
//! * `Down` record `w -> v` which only refers to its mate
//!
//! ```text
//!     Up: [0, u], c, f
//! v -------------------> w
//!   <-------------------
//!     Down: [0, f], -c
//! ```
//!
use super::{Capacity, Cost, ToolId};
use petgraph::graph::EdgeIndex;

/// Direction of an arc record in the residual network
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResidueDirection {
    /// the arc as added, pushing along it increases its flow
    Up,
    /// the reversed mate, pushing along it cancels flow of the Up record
    Down,
}

impl std::fmt::Display for ResidueDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ResidueDirection::Up => write!(f, "+"),
            ResidueDirection::Down => write!(f, "-"),
        }
    }
}

/// Edge attributes used in FlowNetwork.
///
/// It has
/// * Capacity u(e)
/// * Cost per unit flow c(e), which can be negative
/// * Current flow f(e)
///
/// and bookkeeping for the objective and the solution reconstruction.
#[derive(Debug, Copy, Clone)]
pub struct FlowArc {
    /// Up (original) or Down (reversed mate)
    pub direction: ResidueDirection,
    /// index of the other record of the pair
    pub mate: EdgeIndex,
    /// capacity (upper limit of flow) of the edge u(e). zero for Down records.
    pub capacity: Capacity,
    /// cost per unit flow. Down records carry the negated cost of the mate.
    pub weight: Cost,
    /// current flow. only meaningful on Up records.
    pub flow: Capacity,
    /// whether the flow on this arc is counted in the reported cost
    pub in_objective: bool,
    /// tool carried by this arc, used for the loading reconstruction only
    pub tool: Option<ToolId>,
}

impl FlowArc {
    pub fn up(
        capacity: Capacity,
        weight: Cost,
        in_objective: bool,
        tool: Option<ToolId>,
        mate: EdgeIndex,
    ) -> FlowArc {
        FlowArc {
            direction: ResidueDirection::Up,
            mate,
            capacity,
            weight,
            flow: 0,
            in_objective,
            tool,
        }
    }
    pub fn down(up: &FlowArc, mate: EdgeIndex) -> FlowArc {
        FlowArc {
            direction: ResidueDirection::Down,
            mate,
            capacity: 0,
            weight: -up.weight,
            flow: 0,
            in_objective: up.in_objective,
            tool: None,
        }
    }
    pub fn is_forward(&self) -> bool {
        self.direction == ResidueDirection::Up
    }
}

impl std::fmt::Display for FlowArc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            ResidueDirection::Up => {
                write!(f, "{}/{} {}", self.flow, self.capacity, self.weight)?;
                if !self.in_objective {
                    write!(f, "*")?;
                }
                if let Some(tool) = self.tool {
                    write!(f, " t{}", tool)?;
                }
                Ok(())
            }
            ResidueDirection::Down => write!(f, "{} e{}", self.direction, self.mate.index()),
        }
    }
}
