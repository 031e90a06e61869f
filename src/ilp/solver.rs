//! Solver adapter over the `good_lp` MILP interface (HiGHS backend).
//!
//! One solve per request: the adapter consumes an encoded
//! [`BlockModel`], hands it to the external solver, and classifies the
//! result into a [`SolveStatus`] plus, when solved, the raw variable
//! assignment. Infeasibility is a first-class outcome here, never an
//! error.
//!
//! Presolve is disabled and the search runs on one thread with a fixed
//! seed: among objective ties the returned solution must be
//! reproducible across runs with identical input. An optional time
//! budget bounds the search; exhausting it yields
//! [`SolveStatus::Unknown`] rather than blocking the caller.

use std::collections::HashMap;
use std::time::Duration;

use good_lp::{default_solver, Expression, ResolutionError, Solution, SolverModel};
use log::{debug, warn};

use super::encoder::{BlockModel, VarKey};

/// Outcome classification of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SolveStatus {
    /// The solver proved the returned assignment optimal.
    Optimal,
    /// A feasible but not necessarily optimal assignment was returned.
    ///
    /// The MILP backend proves optimality on success, so this variant
    /// is reserved for backends that stop at a budget with an
    /// incumbent in hand.
    Feasible,
    /// No assignment satisfies the structural constraints.
    Infeasible,
    /// The solver gave up — time budget exhausted or internal failure.
    /// Treated like infeasibility for display, kept distinct for
    /// diagnostics.
    Unknown,
}

impl SolveStatus {
    /// Whether an assignment is available for extraction.
    #[inline]
    pub fn is_solved(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Raw variable assignment from a successful solve.
#[derive(Debug, Clone)]
pub struct SolvedAssignment {
    /// Allocation variables set true, sorted by key.
    pub allocated: Vec<VarKey>,
    /// Start variables set true, sorted by key.
    pub started: Vec<VarKey>,
    /// Day index each block instance was pinned to.
    pub assigned_day: HashMap<(usize, usize), usize>,
}

/// Adapter invoking the external MILP solver.
#[derive(Debug, Clone, Default)]
pub struct IlpSolver {
    time_budget: Option<Duration>,
}

impl IlpSolver {
    /// Creates an adapter with no time budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the search; on exhaustion the solve reports
    /// [`SolveStatus::Unknown`].
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Solves the encoded model, maximizing `objective`.
    ///
    /// Pure beyond the search itself: the model is consumed, nothing
    /// is retained across calls.
    pub fn solve(
        &self,
        model: BlockModel,
        objective: Expression,
    ) -> (SolveStatus, Option<SolvedAssignment>) {
        let BlockModel {
            vars,
            start,
            alloc,
            day_assigned,
            constraints,
        } = model;

        // A request without projects declares no variables at all.
        // Trivially optimal; the backend rejects variable-free models.
        if start.is_empty() && alloc.is_empty() && day_assigned.is_empty() {
            return (
                SolveStatus::Optimal,
                Some(SolvedAssignment {
                    allocated: Vec::new(),
                    started: Vec::new(),
                    assigned_day: HashMap::new(),
                }),
            );
        }

        let mut problem = vars
            .maximise(objective)
            .using(default_solver)
            .set_option("presolve", "off")
            .set_option("threads", 1)
            .set_option("random_seed", 0)
            .set_option("output_flag", false);
        if let Some(budget) = self.time_budget {
            problem = problem.set_option("time_limit", budget.as_secs_f64());
        }
        for constraint in constraints {
            problem.add_constraint(constraint);
        }

        match problem.solve() {
            Ok(solution) => {
                let mut allocated: Vec<VarKey> = alloc
                    .iter()
                    .filter(|(_, var)| solution.value(**var) > 0.5)
                    .map(|(key, _)| *key)
                    .collect();
                allocated.sort_unstable();

                let mut started: Vec<VarKey> = start
                    .iter()
                    .filter(|(_, var)| solution.value(**var) > 0.5)
                    .map(|(key, _)| *key)
                    .collect();
                started.sort_unstable();

                let assigned_day: HashMap<(usize, usize), usize> = day_assigned
                    .iter()
                    .map(|(key, var)| (*key, solution.value(*var).round() as usize))
                    .collect();

                debug!(
                    "solve finished: {} blocks started, {} slots allocated",
                    started.len(),
                    allocated.len()
                );
                (
                    SolveStatus::Optimal,
                    Some(SolvedAssignment {
                        allocated,
                        started,
                        assigned_day,
                    }),
                )
            }
            Err(ResolutionError::Infeasible) => (SolveStatus::Infeasible, None),
            Err(error) => {
                warn!("solver gave up: {error}");
                (SolveStatus::Unknown, None)
            }
        }
    }
}
