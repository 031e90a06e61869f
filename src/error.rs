//! Error taxonomy for the planning pipeline.
//!
//! Encoding-time structural failures (bad working windows, off-grid
//! constraint times, rejected input) abort a request with one of the
//! variants below. Solver-reported infeasibility is NOT an error: it
//! is a [`SolveStatus`](crate::ilp::SolveStatus) the caller branches
//! on.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while building the grid or encoding a request.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The working window is malformed: unparseable boundary times,
    /// end not after start, or a boundary off the 30-minute slot width.
    #[error("invalid working window: {0}")]
    InvalidRange(String),

    /// A clock time does not fall on a slot boundary of the grid.
    ///
    /// Raised while resolving fixed-constraint times. Indicates
    /// malformed upstream input; propagated, never recovered.
    #[error("time {0} is not a slot boundary of the working grid")]
    UnknownSlot(String),

    /// Pre-encode validation rejected the request.
    #[error("invalid request: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_display() {
        let err = PlanError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::EmptyName, "project 0 has no name"),
            ValidationError::new(ValidationErrorKind::UnknownDay, "no such day 'Funday'"),
        ]);
        let text = err.to_string();
        assert!(text.contains("project 0 has no name"));
        assert!(text.contains("no such day 'Funday'"));
    }

    #[test]
    fn test_unknown_slot_display() {
        let err = PlanError::UnknownSlot("17:00".into());
        assert_eq!(
            err.to_string(),
            "time 17:00 is not a slot boundary of the working grid"
        );
    }
}
