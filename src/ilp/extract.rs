//! Solution extraction.
//!
//! Decodes a raw variable assignment into the day → slot → label
//! [`Allocation`]. Fixed constraints are written first,
//! unconditionally; project labels land only on slots still free.
//! The write order guarantees fixed labels win for ANY assignment,
//! including one that violates the exclusion constraints. Do not
//! reorder the passes.

use crate::error::PlanError;
use crate::models::{Allocation, FixedConstraint, Project, TimeGrid};

use super::solver::SolvedAssignment;

/// Decodes a solved assignment into an [`Allocation`].
///
/// Callers hold a [`SolvedAssignment`] only when the solve status was
/// Optimal or Feasible; Infeasible/Unknown outcomes never reach this
/// stage.
pub fn extract_allocation(
    assignment: &SolvedAssignment,
    grid: &TimeGrid,
    projects: &[Project],
    fixed_constraints: &[FixedConstraint],
) -> Result<Allocation, PlanError> {
    let mut allocation = Allocation::new();

    // Pass 1: every fixed constraint claims its slots unconditionally.
    for fixed in fixed_constraints {
        let first = grid.slot_index(&fixed.start_time)?;
        let last = grid.slot_index(&fixed.end_time)?;
        for slot in first..last {
            allocation.set(fixed.day.clone(), slot, fixed.name.clone());
        }
    }

    // Pass 2: solver allocations, only into free slots.
    // Deterministic write order: day, slot, project, instance.
    let mut allocated = assignment.allocated.clone();
    allocated.sort_unstable_by_key(|&(p, b, day, slot)| (day, slot, p, b));
    for (p, _, day, slot) in allocated {
        let day_name = grid.days()[day].clone();
        allocation.set_if_free(day_name, slot, projects[p].name.clone());
    }

    Ok(allocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn two_day_grid() -> TimeGrid {
        let days = ["Monday", "Tuesday"].map(String::from).to_vec();
        TimeGrid::build(&days, "09:00", "11:00").unwrap()
    }

    fn assignment(allocated: Vec<(usize, usize, usize, usize)>) -> SolvedAssignment {
        SolvedAssignment {
            started: Vec::new(),
            assigned_day: HashMap::new(),
            allocated,
        }
    }

    #[test]
    fn test_projects_land_on_named_days_and_slots() {
        let grid = two_day_grid();
        let projects = vec![Project::new("Gym", 1.0, 1)];
        let solved = assignment(vec![(0, 0, 1, 2), (0, 0, 1, 3)]);

        let allocation = extract_allocation(&solved, &grid, &projects, &[]).unwrap();
        assert_eq!(allocation.label("Tuesday", 2), Some("Gym"));
        assert_eq!(allocation.label("Tuesday", 3), Some("Gym"));
        assert_eq!(allocation.label("Monday", 2), None);
    }

    #[test]
    fn test_fixed_constraints_always_win() {
        let grid = two_day_grid();
        let projects = vec![Project::new("Gym", 1.0, 1)];
        let fixed = vec![FixedConstraint::new("Lunch break", "Monday", "09:30", "10:30")];
        // A (hypothetically buggy) assignment claiming a fixed slot.
        let solved = assignment(vec![(0, 0, 0, 1), (0, 0, 0, 2)]);

        let allocation = extract_allocation(&solved, &grid, &projects, &fixed).unwrap();
        assert_eq!(allocation.label("Monday", 1), Some("Lunch break"));
        assert_eq!(allocation.label("Monday", 2), Some("Lunch break"));
    }

    #[test]
    fn test_fixed_constraints_fill_without_any_assignment() {
        let grid = two_day_grid();
        let fixed = vec![FixedConstraint::new("Standup", "Tuesday", "09:00", "09:30")];
        let solved = assignment(Vec::new());

        let allocation = extract_allocation(&solved, &grid, &[], &fixed).unwrap();
        assert_eq!(allocation.label("Tuesday", 0), Some("Standup"));
        assert_eq!(allocation.occupied_slot_count(), 1);
    }

    #[test]
    fn test_off_grid_fixed_constraint_propagates() {
        let grid = two_day_grid();
        let fixed = vec![FixedConstraint::new("Late", "Monday", "10:30", "11:30")];
        let solved = assignment(Vec::new());

        let result = extract_allocation(&solved, &grid, &[], &fixed);
        assert!(matches!(result, Err(PlanError::UnknownSlot(_))));
    }
}
