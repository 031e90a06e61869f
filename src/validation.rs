//! Input validation for scheduling requests.
//!
//! Checks structural integrity of a [`PlanRequest`] before encoding.
//! Detects:
//! - Empty or duplicate day lists
//! - Empty or duplicate project names
//! - Non-positive or off-half-hour block lengths
//! - Blocks longer than the working day
//! - Fixed constraints on unknown days or with inverted windows
//!
//! All issues are collected and reported together. Alignment of fixed
//! constraint times to the grid is deliberately NOT checked here: an
//! off-grid time must surface as [`PlanError::UnknownSlot`] during
//! encoding, not as a validation failure.
//!
//! [`PlanError::UnknownSlot`]: crate::error::PlanError::UnknownSlot

use std::collections::HashSet;

use chrono::NaiveTime;

use crate::models::TimeGrid;
use crate::scheduler::PlanRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The day list is empty.
    NoDays,
    /// A day appears twice in the day list.
    DuplicateDay,
    /// A project has an empty name.
    EmptyName,
    /// Two projects share a name.
    DuplicateName,
    /// hours_per_block is not a positive multiple of 0.5.
    InvalidHours,
    /// blocks_per_week is zero.
    InvalidBlockCount,
    /// A block is longer than the working day.
    BlockTooLong,
    /// A fixed constraint names a day outside the available days.
    UnknownDay,
    /// A time window is unparseable or its end does not follow its start.
    InvalidWindow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a scheduling request.
///
/// Checks:
/// 1. At least one available day; no duplicates
/// 2. Project names non-empty and unique
/// 3. hours_per_block positive and a multiple of 0.5
/// 4. blocks_per_week at least 1
/// 5. Block duration fits within the working day
/// 6. Fixed constraints name available days and carry well-formed windows
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &PlanRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if request.available_days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoDays,
            "no available days",
        ));
    }
    let mut seen_days = HashSet::new();
    for day in &request.available_days {
        if !seen_days.insert(day.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateDay,
                format!("duplicate day: {day}"),
            ));
        }
    }

    // Slots per day, when the working window itself is well-formed.
    // A broken window is reported by the grid build right after
    // validation, so it is not re-reported here.
    let slots_per_day = TimeGrid::build(
        &request.available_days,
        &request.start_time,
        &request.end_time,
    )
    .map(|grid| grid.num_slots())
    .ok();

    let mut seen_names = HashSet::new();
    for project in &request.projects {
        if project.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "project with empty name",
            ));
        } else if !seen_names.insert(project.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("duplicate project name: {}", project.name),
            ));
        }

        let half_slots = project.hours_per_block * 2.0;
        if project.hours_per_block <= 0.0 || (half_slots - half_slots.round()).abs() > 1e-9 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!(
                    "project '{}': hours per block must be a positive multiple of 0.5, got {}",
                    project.name, project.hours_per_block
                ),
            ));
        } else if let Some(slots) = slots_per_day {
            if project.duration_slots() > slots {
                errors.push(ValidationError::new(
                    ValidationErrorKind::BlockTooLong,
                    format!(
                        "project '{}': a {}h block does not fit a {}-slot day",
                        project.name, project.hours_per_block, slots
                    ),
                ));
            }
        }

        if project.blocks_per_week == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBlockCount,
                format!("project '{}': blocks per week must be at least 1", project.name),
            ));
        }
    }

    for constraint in &request.fixed_constraints {
        if !request.available_days.contains(&constraint.day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDay,
                format!(
                    "fixed constraint '{}': day '{}' is not an available day",
                    constraint.name, constraint.day
                ),
            ));
        }

        match (
            NaiveTime::parse_from_str(&constraint.start_time, "%H:%M"),
            NaiveTime::parse_from_str(&constraint.end_time, "%H:%M"),
        ) {
            (Ok(start), Ok(end)) if start < end => {}
            _ => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWindow,
                format!(
                    "fixed constraint '{}': window {}–{} is malformed",
                    constraint.name, constraint.start_time, constraint.end_time
                ),
            )),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
