//! Completion statistics.
//!
//! Compares each project's target hours to the hours it actually
//! received in an [`Allocation`] and produces one record per project,
//! in request order.
//!
//! With the encoder's exact-fulfillment constraint in force, every
//! project of a solved plan completes at exactly 1.0; any divergence
//! signals an extraction or encoding bug, which makes the ratio worth
//! asserting directly in tests.

use serde::{Deserialize, Serialize};

use crate::models::{Allocation, Project, SLOT_MINUTES};

/// Per-project completion record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStats {
    /// Project name.
    pub name: String,
    /// Requested blocks per week.
    pub target_blocks: usize,
    /// Length of one block, hours.
    pub hours_per_block: f64,
    /// Requested hours across the week.
    pub target_hours: f64,
    /// Slots carrying the project's label.
    pub assigned_slots: usize,
    /// Whole blocks covered by the assigned slots.
    pub assigned_blocks: usize,
    /// Hours assigned (slots ÷ 2).
    pub assigned_hours: f64,
    /// assigned_hours ÷ target_hours. Unclamped.
    pub completion: f64,
}

/// Computes completion records for every project.
///
/// Inputs guarantee target_hours > 0 (validation requires positive
/// hours and block counts), so the ratio never divides by zero; an
/// empty allocation simply reports 0.0 everywhere.
pub fn report(projects: &[Project], allocation: &Allocation) -> Vec<ProjectStats> {
    let slots_per_hour = 60.0 / SLOT_MINUTES as f64;

    projects
        .iter()
        .map(|project| {
            let assigned_slots = allocation.labeled_slot_count(&project.name);
            let assigned_hours = assigned_slots as f64 / slots_per_hour;
            let assigned_blocks = assigned_slots / project.duration_slots();
            ProjectStats {
                name: project.name.clone(),
                target_blocks: project.blocks_per_week,
                hours_per_block: project.hours_per_block,
                target_hours: project.target_hours(),
                assigned_slots,
                assigned_blocks,
                assigned_hours,
                completion: assigned_hours / project.target_hours(),
            }
        })
        .collect()
}
