//! Optimization objective.
//!
//! Two additive terms over the encoded variable universe, maximized
//! jointly with equal weight:
//!
//! - **Slot usage**: the sum of all start variables. Exact fulfillment
//!   already fixes how much work is placed, so this term saturates on
//!   any feasible full assignment; its effect is to bias the solver
//!   toward compact, front-loaded placements.
//! - **Separation**: for each project with more than one block
//!   instance, for each consecutive instance pair (ordered by instance
//!   index, not by assigned day), the raw signed day distance
//!   `day(later) − day(earlier)`. The value may be negative; there is
//!   no absolute value and no per-project normalization. The
//!   asymmetric, unnormalized form is part of the contract — solver
//!   behavior changes measurably if it is "fixed".

use good_lp::Expression;

use crate::models::Project;

use super::encoder::BlockModel;

/// Builds the maximization objective for an encoded model.
pub fn build_objective(model: &BlockModel, projects: &[Project]) -> Expression {
    let mut objective: Expression = model.start.values().copied().sum();

    for (p, project) in projects.iter().enumerate() {
        if project.blocks_per_week < 2 {
            continue;
        }
        for b in 0..project.blocks_per_week - 1 {
            let earlier = model.day_assigned[&(p, b)];
            let later = model.day_assigned[&(p, b + 1)];
            objective = objective + (Expression::from(later) - Expression::from(earlier));
        }
    }

    objective
}
