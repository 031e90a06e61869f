//! ILP encoding of the weekly block-allocation problem.
//!
//! Declares the decision-variable universe and all structural
//! constraints over a [`TimeGrid`]:
//!
//! - a boolean *start* variable per (project, instance, day, slot)
//!   wherever the whole block fits inside the day;
//! - a boolean *allocation* variable per slot reachable from some
//!   start;
//! - a bounded-integer *assigned-day* variable per block instance.
//!
//! The universe is sparse: variables are keyed by composite tuples and
//! positions near the day boundary that cannot host a full block are
//! never materialized.
//!
//! The MILP backend has no native implication constraints, so the
//! conditional links (start ⇒ contiguous run, start ⇒ assigned day)
//! use big-M linearizations; their equivalence is asserted by the
//! solver tests.
//!
//! # Reference
//! Wolsey (1998), "Integer Programming", Ch. 1.3 (big-M formulations)

use std::collections::HashMap;

use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};
use log::debug;

use crate::error::PlanError;
use crate::models::{FixedConstraint, Project, TimeGrid};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Composite key of a placement variable:
/// (project index, block instance, day index, slot index).
pub type VarKey = (usize, usize, usize, usize);

/// The encoded decision problem, ready to solve.
///
/// Holds the variable universe, the structural constraints, and the
/// maps the objective builder and extractor read from.
pub struct BlockModel {
    pub(crate) vars: ProblemVariables,
    pub(crate) start: HashMap<VarKey, Variable>,
    pub(crate) alloc: HashMap<VarKey, Variable>,
    pub(crate) day_assigned: HashMap<(usize, usize), Variable>,
    pub(crate) constraints: Vec<Constraint>,
}

impl BlockModel {
    /// Number of start variables.
    pub fn start_count(&self) -> usize {
        self.start.len()
    }

    /// Number of allocation variables.
    pub fn alloc_count(&self) -> usize {
        self.alloc.len()
    }

    /// Number of structural constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

/// Builds a [`BlockModel`] from scheduling domain objects.
///
/// # Example
/// ```no_run
/// use blockplan::ilp::BlockModelBuilder;
/// use blockplan::models::{Project, TimeGrid};
///
/// let days = vec!["Monday".to_string(), "Tuesday".to_string()];
/// let grid = TimeGrid::build(&days, "09:00", "17:00").unwrap();
/// let projects = vec![Project::new("Gym", 1.0, 2)];
/// let model = BlockModelBuilder::new(&grid, &projects).build().unwrap();
/// ```
pub struct BlockModelBuilder<'a> {
    grid: &'a TimeGrid,
    projects: &'a [Project],
    fixed_constraints: &'a [FixedConstraint],
}

impl<'a> BlockModelBuilder<'a> {
    /// Creates a new builder.
    pub fn new(grid: &'a TimeGrid, projects: &'a [Project]) -> Self {
        Self {
            grid,
            projects,
            fixed_constraints: &[],
        }
    }

    /// Adds fixed calendar constraints.
    pub fn with_fixed_constraints(mut self, fixed_constraints: &'a [FixedConstraint]) -> Self {
        self.fixed_constraints = fixed_constraints;
        self
    }

    /// Encodes the full decision problem.
    ///
    /// Fails with [`PlanError::UnknownSlot`] if a fixed constraint's
    /// time is not a slot boundary of the grid — including times at or
    /// past the working end. Nothing is clamped.
    pub fn build(&self) -> Result<BlockModel, PlanError> {
        let num_days = self.grid.num_days();
        let num_slots = self.grid.num_slots();

        let mut vars = ProblemVariables::new();
        let mut start: HashMap<VarKey, Variable> = HashMap::new();
        let mut alloc: HashMap<VarKey, Variable> = HashMap::new();
        let mut day_assigned: HashMap<(usize, usize), Variable> = HashMap::new();
        let mut constraints: Vec<Constraint> = Vec::new();

        // Variable universe. Start variables only where the block fits
        // entirely; allocation variables for every slot some start can
        // reach. A block longer than the day contributes no placement
        // variables at all (validation rejects that case up front).
        for (p, project) in self.projects.iter().enumerate() {
            let duration = project.duration_slots();
            for b in 0..project.blocks_per_week {
                if duration <= num_slots {
                    for day in 0..num_days {
                        for slot in 0..=num_slots - duration {
                            start.insert((p, b, day, slot), vars.add(variable().binary()));
                            for s in slot..slot + duration {
                                alloc
                                    .entry((p, b, day, s))
                                    .or_insert_with(|| vars.add(variable().binary()));
                            }
                        }
                    }
                }
                let max_day = num_days.saturating_sub(1) as f64;
                day_assigned.insert((p, b), vars.add(variable().integer().min(0.0).max(max_day)));
            }
        }

        self.exclude_fixed_slots(&start, &alloc, &mut constraints)?;
        self.link_contiguity(&start, &alloc, &day_assigned, &mut constraints);
        self.link_allocations_to_starts(&start, &alloc, &mut constraints);
        self.limit_slot_occupancy(&alloc, &mut constraints);
        self.limit_daily_starts(&start, &mut constraints);
        self.require_exact_fulfillment(&alloc, &mut constraints);

        debug!(
            "encoded {} start vars, {} allocation vars, {} day vars, {} constraints",
            start.len(),
            alloc.len(),
            day_assigned.len(),
            constraints.len()
        );

        Ok(BlockModel {
            vars,
            start,
            alloc,
            day_assigned,
            constraints,
        })
    }

    /// Constraint family 1: no start and no allocation inside any slot
    /// covered by a fixed constraint on its day.
    fn exclude_fixed_slots(
        &self,
        start: &HashMap<VarKey, Variable>,
        alloc: &HashMap<VarKey, Variable>,
        constraints: &mut Vec<Constraint>,
    ) -> Result<(), PlanError> {
        for fixed in self.fixed_constraints {
            let day = self.grid.day_index(&fixed.day).ok_or_else(|| {
                PlanError::InvalidInput(vec![ValidationError::new(
                    ValidationErrorKind::UnknownDay,
                    format!(
                        "fixed constraint '{}': day '{}' is not an available day",
                        fixed.name, fixed.day
                    ),
                )])
            })?;
            let first = self.grid.slot_index(&fixed.start_time)?;
            let last = self.grid.slot_index(&fixed.end_time)?;

            for slot in first..last {
                for (p, project) in self.projects.iter().enumerate() {
                    for b in 0..project.blocks_per_week {
                        if let Some(&var) = start.get(&(p, b, day, slot)) {
                            constraints.push(constraint!(var == 0));
                        }
                        if let Some(&var) = alloc.get(&(p, b, day, slot)) {
                            constraints.push(constraint!(var == 0));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Constraint family 2: a start implies its whole contiguous run is
    /// allocated and pins the instance's assigned day.
    ///
    /// Big-M forms of the implications:
    /// `sum(run) ≥ duration·start` and
    /// `|day_assigned − day| ≤ num_days·(1 − start)`.
    fn link_contiguity(
        &self,
        start: &HashMap<VarKey, Variable>,
        alloc: &HashMap<VarKey, Variable>,
        day_assigned: &HashMap<(usize, usize), Variable>,
        constraints: &mut Vec<Constraint>,
    ) {
        let num_days = self.grid.num_days();
        let num_slots = self.grid.num_slots();
        let big_m = num_days as f64;

        for (p, project) in self.projects.iter().enumerate() {
            let duration = project.duration_slots();
            if duration > num_slots {
                continue;
            }
            for b in 0..project.blocks_per_week {
                let day_var = day_assigned[&(p, b)];
                for day in 0..num_days {
                    for slot in 0..=num_slots - duration {
                        let start_var = start[&(p, b, day, slot)];

                        let run: Expression =
                            (slot..slot + duration).map(|s| alloc[&(p, b, day, s)]).sum();
                        let required = duration as f64 * Expression::from(start_var);
                        constraints.push(constraint!(run >= required));

                        let released = big_m * Expression::from(start_var);
                        let upper = Expression::from(day_var) + released.clone();
                        let upper_bound = day as f64 + big_m;
                        constraints.push(constraint!(upper <= upper_bound));
                        let lower = Expression::from(day_var) - released;
                        let lower_bound = day as f64 - big_m;
                        constraints.push(constraint!(lower >= lower_bound));
                    }
                }
            }
        }
    }

    /// Constraint family 2b: an allocation cannot be true without a
    /// covering start. Allocation variables are implied, never free.
    fn link_allocations_to_starts(
        &self,
        start: &HashMap<VarKey, Variable>,
        alloc: &HashMap<VarKey, Variable>,
        constraints: &mut Vec<Constraint>,
    ) {
        let num_days = self.grid.num_days();
        let num_slots = self.grid.num_slots();

        for (p, project) in self.projects.iter().enumerate() {
            let duration = project.duration_slots();
            if duration > num_slots {
                continue;
            }
            for b in 0..project.blocks_per_week {
                for day in 0..num_days {
                    for s in 0..num_slots {
                        let Some(&alloc_var) = alloc.get(&(p, b, day, s)) else {
                            continue;
                        };
                        let lowest = s.saturating_sub(duration - 1);
                        let highest = s.min(num_slots - duration);
                        let covering: Expression = (lowest..=highest)
                            .filter_map(|t| start.get(&(p, b, day, t)).copied())
                            .sum();
                        constraints.push(constraint!(alloc_var <= covering));
                    }
                }
            }
        }
    }

    /// Constraint family 3: at most one allocation per (day, slot)
    /// across all projects and instances.
    fn limit_slot_occupancy(
        &self,
        alloc: &HashMap<VarKey, Variable>,
        constraints: &mut Vec<Constraint>,
    ) {
        for day in 0..self.grid.num_days() {
            for s in 0..self.grid.num_slots() {
                let mut holders: Vec<Variable> = Vec::new();
                for (p, project) in self.projects.iter().enumerate() {
                    for b in 0..project.blocks_per_week {
                        if let Some(&var) = alloc.get(&(p, b, day, s)) {
                            holders.push(var);
                        }
                    }
                }
                if holders.is_empty() {
                    continue;
                }
                let occupied: Expression = holders.into_iter().sum();
                constraints.push(constraint!(occupied <= 1));
            }
        }
    }

    /// Constraint family 4: a project starts at most one of its
    /// instances per day.
    fn limit_daily_starts(
        &self,
        start: &HashMap<VarKey, Variable>,
        constraints: &mut Vec<Constraint>,
    ) {
        let num_slots = self.grid.num_slots();

        for (p, project) in self.projects.iter().enumerate() {
            let duration = project.duration_slots();
            if duration > num_slots {
                continue;
            }
            for day in 0..self.grid.num_days() {
                let mut day_starts: Vec<Variable> = Vec::new();
                for b in 0..project.blocks_per_week {
                    for slot in 0..=num_slots - duration {
                        day_starts.push(start[&(p, b, day, slot)]);
                    }
                }
                let total: Expression = day_starts.into_iter().sum();
                constraints.push(constraint!(total <= 1));
            }
        }
    }

    /// Constraint family 5: exact fulfillment. Each project's allocated
    /// slot total equals blocks_per_week × duration — no partial
    /// scheduling; shortfall makes the whole problem infeasible.
    fn require_exact_fulfillment(
        &self,
        alloc: &HashMap<VarKey, Variable>,
        constraints: &mut Vec<Constraint>,
    ) {
        for (p, project) in self.projects.iter().enumerate() {
            let mut owned: Vec<Variable> = Vec::new();
            for b in 0..project.blocks_per_week {
                for day in 0..self.grid.num_days() {
                    for s in 0..self.grid.num_slots() {
                        if let Some(&var) = alloc.get(&(p, b, day, s)) {
                            owned.push(var);
                        }
                    }
                }
            }
            let assigned: Expression = owned.into_iter().sum();
            let target = project.target_slots() as f64;
            constraints.push(constraint!(assigned == target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_day_grid() -> TimeGrid {
        // 09:00–11:00 → 4 slots
        TimeGrid::build(&["Monday".to_string()], "09:00", "11:00").unwrap()
    }

    #[test]
    fn test_variable_universe_counts() {
        let grid = one_day_grid();
        let projects = vec![Project::new("Gym", 1.0, 1)];
        let model = BlockModelBuilder::new(&grid, &projects).build().unwrap();

        // 2-slot block in a 4-slot day: starts at 0, 1, 2
        assert_eq!(model.start_count(), 3);
        // Every slot reachable
        assert_eq!(model.alloc_count(), 4);
        assert!(model.constraint_count() > 0);
    }

    #[test]
    fn test_universe_scales_with_instances() {
        let grid = one_day_grid();
        let projects = vec![Project::new("Gym", 1.0, 2)];
        let model = BlockModelBuilder::new(&grid, &projects).build().unwrap();

        assert_eq!(model.start_count(), 6);
        assert_eq!(model.alloc_count(), 8);
    }

    #[test]
    fn test_block_spanning_whole_day() {
        let grid = one_day_grid();
        let projects = vec![Project::new("Deep work", 2.0, 1)];
        let model = BlockModelBuilder::new(&grid, &projects).build().unwrap();

        // Only one position fits a 4-slot block
        assert_eq!(model.start_count(), 1);
        assert_eq!(model.alloc_count(), 4);
    }

    #[test]
    fn test_oversized_block_materializes_no_placements() {
        let grid = one_day_grid();
        let projects = vec![Project::new("Marathon", 3.0, 1)];
        let model = BlockModelBuilder::new(&grid, &projects).build().unwrap();

        // 6-slot block in a 4-slot day: no start positions exist.
        // Validation rejects this before the encoder normally runs.
        assert_eq!(model.start_count(), 0);
        assert_eq!(model.alloc_count(), 0);
    }

    #[test]
    fn test_fixed_constraint_adds_exclusions() {
        let grid = one_day_grid();
        let projects = vec![Project::new("Gym", 1.0, 1)];
        let bare = BlockModelBuilder::new(&grid, &projects).build().unwrap();

        let fixed = vec![FixedConstraint::new("Standup", "Monday", "09:00", "10:00")];
        let constrained = BlockModelBuilder::new(&grid, &projects)
            .with_fixed_constraints(&fixed)
            .build()
            .unwrap();

        assert!(constrained.constraint_count() > bare.constraint_count());
    }

    #[test]
    fn test_fixed_constraint_off_grid_fails() {
        let grid = one_day_grid();
        let projects = vec![Project::new("Gym", 1.0, 1)];

        // End coincides with the working end — not a slot boundary.
        let at_end = vec![FixedConstraint::new("Late", "Monday", "10:30", "11:00")];
        let result = BlockModelBuilder::new(&grid, &projects)
            .with_fixed_constraints(&at_end)
            .build();
        assert!(matches!(result, Err(PlanError::UnknownSlot(_))));

        // Entirely outside the window.
        let outside = vec![FixedConstraint::new("Early", "Monday", "07:00", "08:00")];
        let result = BlockModelBuilder::new(&grid, &projects)
            .with_fixed_constraints(&outside)
            .build();
        assert!(matches!(result, Err(PlanError::UnknownSlot(_))));
    }

    #[test]
    fn test_fixed_constraint_unknown_day_fails() {
        let grid = one_day_grid();
        let projects = vec![Project::new("Gym", 1.0, 1)];
        let fixed = vec![FixedConstraint::new("Standup", "Sunday", "09:00", "09:30")];
        let result = BlockModelBuilder::new(&grid, &projects)
            .with_fixed_constraints(&fixed)
            .build();
        assert!(matches!(result, Err(PlanError::InvalidInput(_))));
    }
}
