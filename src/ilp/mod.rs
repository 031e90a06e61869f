//! ILP formulation and solving of the weekly block-allocation problem.
//!
//! Bridges the scheduling domain models to the `good_lp` MILP
//! interface: [`BlockModelBuilder`] encodes the decision problem,
//! [`build_objective`] constructs the maximization objective over the
//! same variable universe, [`IlpSolver`] runs the external solver, and
//! [`extract_allocation`] decodes the result into an
//! [`Allocation`](crate::models::Allocation).
//!
//! Control flow: encode → objective → solve → extract. One request
//! builds one fresh variable universe; nothing is shared or reused
//! across solves.

mod encoder;
mod extract;
mod objective;
mod solver;

pub use encoder::{BlockModel, BlockModelBuilder, VarKey};
pub use extract::extract_allocation;
pub use objective::build_objective;
pub use solver::{IlpSolver, SolveStatus, SolvedAssignment};
