//! Request orchestration and reporting.
//!
//! [`WeekScheduler`] drives one scheduling request through the full
//! pipeline: validate → build grid → encode → solve → extract, then
//! materializes the timetable and computes completion statistics.
//!
//! A request that encodes cleanly always yields a [`WeekPlan`]; an
//! infeasible or abandoned solve is carried in its status, not raised
//! as an error. Structural problems with the input (bad windows,
//! off-grid constraint times) abort with a
//! [`PlanError`](crate::error::PlanError) instead.

mod stats;
mod timetable;

pub use stats::{report, ProjectStats};
pub use timetable::{materialize, Timetable};

use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::ilp::{
    build_objective, extract_allocation, BlockModelBuilder, IlpSolver, SolveStatus,
};
use crate::models::{Allocation, FixedConstraint, Project, TimeGrid};
use crate::validation;

/// Input container for one scheduling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Available days, in display order.
    pub available_days: Vec<String>,
    /// Working window start, "HH:MM", slot-aligned.
    pub start_time: String,
    /// Working window end (exclusive), "HH:MM", slot-aligned.
    pub end_time: String,
    /// Projects requesting weekly blocks, in display order.
    pub projects: Vec<Project>,
    /// Immovable calendar commitments.
    pub fixed_constraints: Vec<FixedConstraint>,
}

impl PlanRequest {
    /// Creates a request with no projects or constraints.
    pub fn new(
        available_days: Vec<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            available_days,
            start_time: start_time.into(),
            end_time: end_time.into(),
            projects: Vec::new(),
            fixed_constraints: Vec::new(),
        }
    }

    /// Adds a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Adds a fixed constraint.
    pub fn with_fixed_constraint(mut self, constraint: FixedConstraint) -> Self {
        self.fixed_constraints.push(constraint);
        self
    }

    /// Every label that can appear in the allocation: project names
    /// first, then fixed-constraint names, input order, deduplicated.
    ///
    /// The rendering collaborator assigns colors from this list; the
    /// core knows nothing about color or layout.
    pub fn label_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self
            .projects
            .iter()
            .map(|p| &p.name)
            .chain(self.fixed_constraints.iter().map(|c| &c.name))
        {
            if !names.iter().any(|n| n == name) {
                names.push(name.clone());
            }
        }
        names
    }
}

/// Everything a solved request produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// The resolved day → slot → label assignment.
    pub allocation: Allocation,
    /// The allocation rendered as a slot × day grid.
    pub timetable: Timetable,
    /// Per-project completion records, in request order.
    pub stats: Vec<ProjectStats>,
}

/// Result of one scheduling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekPlan {
    /// Solve classification. Infeasible/Unknown are valid outcomes.
    pub status: SolveStatus,
    /// Present exactly when the status carries an assignment.
    pub outcome: Option<PlanOutcome>,
}

impl WeekPlan {
    /// Whether an allocation is available.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Drives the encode → solve → extract pipeline for one request.
///
/// # Example
/// ```no_run
/// use blockplan::models::Project;
/// use blockplan::scheduler::{PlanRequest, WeekScheduler};
///
/// let days = ["Monday", "Tuesday"].map(String::from).to_vec();
/// let request = PlanRequest::new(days, "09:00", "17:00")
///     .with_project(Project::new("Gym", 1.0, 2));
/// let plan = WeekScheduler::new().plan(&request).unwrap();
/// assert!(plan.is_solved());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeekScheduler {
    time_budget: Option<Duration>,
}

impl WeekScheduler {
    /// Creates a scheduler with an unbounded solve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the solve; exhausting the budget yields
    /// [`SolveStatus::Unknown`].
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Runs one request through the full pipeline.
    ///
    /// Each call builds a fresh variable universe and solver instance;
    /// nothing is shared across requests.
    pub fn plan(&self, request: &PlanRequest) -> Result<WeekPlan, PlanError> {
        validation::validate_request(request).map_err(PlanError::InvalidInput)?;

        let grid = TimeGrid::build(
            &request.available_days,
            &request.start_time,
            &request.end_time,
        )?;

        let model = BlockModelBuilder::new(&grid, &request.projects)
            .with_fixed_constraints(&request.fixed_constraints)
            .build()?;
        info!(
            "encoded {} projects over {} days × {} slots: {} start vars, {} allocation vars, {} constraints",
            request.projects.len(),
            grid.num_days(),
            grid.num_slots(),
            model.start_count(),
            model.alloc_count(),
            model.constraint_count()
        );

        let objective = build_objective(&model, &request.projects);
        let mut solver = IlpSolver::new();
        if let Some(budget) = self.time_budget {
            solver = solver.with_time_budget(budget);
        }
        let (status, assignment) = solver.solve(model, objective);
        info!("solve status: {status:?}");

        let outcome = match assignment {
            Some(assignment) => {
                let allocation = extract_allocation(
                    &assignment,
                    &grid,
                    &request.projects,
                    &request.fixed_constraints,
                )?;
                let timetable = materialize(&grid, &allocation);
                let stats = report(&request.projects, &allocation);
                Some(PlanOutcome {
                    allocation,
                    timetable,
                    stats,
                })
            }
            None => None,
        };

        Ok(WeekPlan { status, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekdays() -> Vec<String> {
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
            .map(String::from)
            .to_vec()
    }

    /// The reference scenario: five weekdays, 08:00–18:00, six
    /// projects, a daily lunch break, and two writing-group meetings.
    fn reference_request() -> PlanRequest {
        let mut request = PlanRequest::new(weekdays(), "08:00", "18:00")
            .with_project(Project::new("Gym", 1.0, 3))
            .with_project(Project::new("Job Hunt", 2.0, 5))
            .with_project(Project::new("Analyst work", 2.0, 5))
            .with_project(Project::new("Write", 2.0, 3))
            .with_project(Project::new("Read", 1.0, 3))
            .with_project(Project::new("AI training", 2.0, 2));
        for day in weekdays() {
            request = request.with_fixed_constraint(FixedConstraint::new(
                "Lunch break",
                day,
                "13:00",
                "13:30",
            ));
        }
        request
            .with_fixed_constraint(FixedConstraint::new(
                "Writing group",
                "Tuesday",
                "14:00",
                "17:00",
            ))
            .with_fixed_constraint(FixedConstraint::new(
                "Writing group",
                "Thursday",
                "09:00",
                "13:00",
            ))
    }

    #[test]
    fn test_reference_scenario_fully_scheduled() {
        let request = reference_request();
        let plan = WeekScheduler::new().plan(&request).unwrap();

        assert_eq!(plan.status, SolveStatus::Optimal);
        let outcome = plan.outcome.expect("optimal plan carries an outcome");

        // Exact-fulfillment invariant: every project at exactly 100%.
        for stat in &outcome.stats {
            assert!(
                (stat.completion - 1.0).abs() < 1e-9,
                "project '{}' at {:.0}%",
                stat.name,
                stat.completion * 100.0
            );
        }

        // Exclusivity invariant: re-derived occupancy is at most one
        // label per (day, slot) — guaranteed by the map shape, so it
        // suffices that totals add up.
        let project_slots: usize = request.projects.iter().map(|p| p.target_slots()).sum();
        let fixed_slots = 5 + 6 + 8; // lunches + two writing groups
        assert_eq!(
            outcome.allocation.occupied_slot_count(),
            project_slots + fixed_slots
        );

        // Priority invariant: fixed labels everywhere they were declared.
        for day in weekdays() {
            assert_eq!(outcome.allocation.label(&day, 10), Some("Lunch break"));
        }
        for slot in 12..18 {
            assert_eq!(
                outcome.allocation.label("Tuesday", slot),
                Some("Writing group")
            );
        }
        for slot in 2..10 {
            assert_eq!(
                outcome.allocation.label("Thursday", slot),
                Some("Writing group")
            );
        }
    }

    #[test]
    fn test_oversubscribed_scenario_is_infeasible() {
        // Raise the quotas past the week's capacity.
        let request = PlanRequest::new(weekdays(), "08:00", "18:00")
            .with_project(Project::new("Gym", 1.0, 3))
            .with_project(Project::new("Job Hunt", 2.0, 5))
            .with_project(Project::new("Analyst work", 2.0, 5))
            .with_project(Project::new("Write", 2.0, 5))
            .with_project(Project::new("Read", 1.0, 5))
            .with_project(Project::new("AI training", 2.0, 4))
            .with_fixed_constraint(FixedConstraint::new(
                "Writing group",
                "Tuesday",
                "14:00",
                "17:00",
            ))
            .with_fixed_constraint(FixedConstraint::new(
                "Writing group",
                "Thursday",
                "09:00",
                "13:00",
            ));

        let plan = WeekScheduler::new().plan(&request).unwrap();
        assert_eq!(plan.status, SolveStatus::Infeasible);
        assert!(plan.outcome.is_none());
    }

    #[test]
    fn test_shrunken_window_fails_on_off_grid_constraint() {
        // 08:00–15:00 leaves the Tuesday writing group (ends 17:00)
        // outside the grid: hard encoding failure, not a silent skip.
        let mut request = reference_request();
        request.end_time = "15:00".to_string();

        let result = WeekScheduler::new().plan(&request);
        assert!(matches!(result, Err(PlanError::UnknownSlot(_))));
    }

    #[test]
    fn test_invalid_input_aborts_before_solving() {
        let request = PlanRequest::new(weekdays(), "08:00", "18:00")
            .with_project(Project::new("Gym", 1.0, 0));
        let result = WeekScheduler::new().plan(&request);
        assert!(matches!(result, Err(PlanError::InvalidInput(_))));
    }

    #[test]
    fn test_request_without_projects_yields_fixed_only_plan() {
        let request = PlanRequest::new(weekdays(), "08:00", "18:00").with_fixed_constraint(
            FixedConstraint::new("Lunch break", "Monday", "13:00", "13:30"),
        );
        let plan = WeekScheduler::new().plan(&request).unwrap();

        assert!(plan.is_solved());
        let outcome = plan.outcome.unwrap();
        assert_eq!(outcome.allocation.occupied_slot_count(), 1);
        assert!(outcome.stats.is_empty());
    }

    #[test]
    fn test_label_names_deduplicated_in_order() {
        let request = reference_request();
        let names = request.label_names();
        assert_eq!(
            names,
            vec![
                "Gym",
                "Job Hunt",
                "Analyst work",
                "Write",
                "Read",
                "AI training",
                "Lunch break",
                "Writing group",
            ]
        );
    }

    #[test]
    fn test_request_serde_round_trip() {
        let request = reference_request();
        let json = serde_json::to_string(&request).unwrap();
        let back: PlanRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.projects, request.projects);
        assert_eq!(back.fixed_constraints, request.fixed_constraints);
    }
}
