//! Project model.
//!
//! A project asks for a weekly quota of work: `blocks_per_week`
//! contiguous blocks of `hours_per_block` hours each. Blocks are
//! placed independently; the solver decides day and start slot.

use serde::{Deserialize, Serialize};

use super::grid::SLOT_MINUTES;

/// A project requesting recurring weekly work blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// Unique, non-empty display name. Doubles as the allocation label.
    pub name: String,
    /// Length of one block in hours. Positive, multiple of 0.5.
    pub hours_per_block: f64,
    /// Number of blocks requested per week. Positive.
    pub blocks_per_week: usize,
}

impl Project {
    /// Creates a new project.
    pub fn new(name: impl Into<String>, hours_per_block: f64, blocks_per_week: usize) -> Self {
        Self {
            name: name.into(),
            hours_per_block,
            blocks_per_week,
        }
    }

    /// Length of one block in slots.
    #[inline]
    pub fn duration_slots(&self) -> usize {
        (self.hours_per_block * 60.0 / SLOT_MINUTES as f64).round() as usize
    }

    /// Total requested slots across the week.
    #[inline]
    pub fn target_slots(&self) -> usize {
        self.blocks_per_week * self.duration_slots()
    }

    /// Total requested hours across the week.
    #[inline]
    pub fn target_hours(&self) -> f64 {
        self.hours_per_block * self.blocks_per_week as f64
    }
}
