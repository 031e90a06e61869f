//! Fixed calendar constraints.
//!
//! A fixed constraint is an immovable weekly commitment (a standing
//! meeting, a lunch break) that consumes a contiguous slot range on
//! exactly one day. Its slots are excluded from project placement and
//! its label always wins over project labels in the final allocation.

use serde::{Deserialize, Serialize};

/// An immovable weekly commitment.
///
/// Times are "HH:MM" clock strings; both must be slot boundaries of
/// the working grid, with `start_time < end_time`. The interval is
/// half-open: the slot starting at `end_time` is not occupied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedConstraint {
    /// Display name. Doubles as the allocation label.
    pub name: String,
    /// Day the commitment falls on. Must be one of the available days.
    pub day: String,
    /// First occupied slot boundary.
    pub start_time: String,
    /// End of the occupied range (exclusive).
    pub end_time: String,
}

impl FixedConstraint {
    /// Creates a new fixed constraint.
    pub fn new(
        name: impl Into<String>,
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            day: day.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}
