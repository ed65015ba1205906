//!
//! toolflow solves the [tool switching problem](https://en.wikipedia.org/wiki/Tool_management)
//! with uniform magazine slots and per-tool insertion costs, by encoding it into a
//! [minimum cost maximum flow problem](https://en.wikipedia.org/wiki/Minimum-cost_flow_problem)
//! of integer weights and capacities.
//!
//! ```
//! use toolflow::{solve_instance, Encoder, ProblemInstance};
//!
//! let instance: ProblemInstance = "2 4 2\nCOST 1 1\nJOBS 4\n1 1\n1 2\n1 1\n1 2\n".parse().unwrap();
//! let plan = solve_instance(&instance, Encoder::IntervalGap, 0).unwrap();
//! assert_eq!(plan.cost, 2);
//! ```
//!
pub mod encoder;
pub mod error;
pub mod instance;
pub mod min_flow;
pub mod solver;

pub use encoder::Encoder;
pub use error::{Error, Result};
pub use instance::ProblemInstance;
pub use solver::{solve_instance, Plan};
