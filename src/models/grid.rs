//! Time grid: discretization of the working week.
//!
//! Converts a day list and a `[start, end)` clock range into an
//! ordered sequence of fixed-width 30-minute slots per day. Slot
//! indices are contiguous, zero-based, and ordered by time-of-day;
//! every available day carries the same number of slots, derived once
//! from the working window.
//!
//! # Time Model
//! Clock times are "HH:MM" strings on a 24-hour clock. The grid spans
//! a single day's working window; the week is the cartesian product
//! of the day list with that window.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Width of one scheduling slot, in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// The discretized working week.
///
/// Immutable once built; one instance per scheduling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeGrid {
    days: Vec<String>,
    start: NaiveTime,
    end: NaiveTime,
    labels: Vec<String>,
}

impl TimeGrid {
    /// Builds a grid from an ordered day list and a working window.
    ///
    /// Fails with [`PlanError::InvalidRange`] if either boundary is
    /// unparseable, the end is not after the start, or a boundary is
    /// not aligned to the slot width.
    pub fn build(days: &[String], start_time: &str, end_time: &str) -> Result<Self, PlanError> {
        let start = parse_clock(start_time)?;
        let end = parse_clock(end_time)?;

        if end <= start {
            return Err(PlanError::InvalidRange(format!(
                "end {end_time} is not after start {start_time}"
            )));
        }
        for (raw, time) in [(start_time, start), (end_time, end)] {
            if time.minute() % SLOT_MINUTES != 0 {
                return Err(PlanError::InvalidRange(format!(
                    "{raw} is not aligned to the {SLOT_MINUTES}-minute slot width"
                )));
            }
        }

        let span_minutes = (end - start).num_minutes() as u32;
        let num_slots = (span_minutes / SLOT_MINUTES) as usize;
        let labels = (0..num_slots)
            .map(|i| {
                let t = start + chrono::Duration::minutes((i as u32 * SLOT_MINUTES) as i64);
                t.format("%H:%M").to_string()
            })
            .collect();

        Ok(Self {
            days: days.to_vec(),
            start,
            end,
            labels,
        })
    }

    /// Number of slots in each day.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.labels.len()
    }

    /// Number of available days.
    #[inline]
    pub fn num_days(&self) -> usize {
        self.days.len()
    }

    /// The available days, in request order.
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// "HH:MM" labels of every slot start, in slot order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The label of a single slot.
    pub fn label(&self, slot: usize) -> &str {
        &self.labels[slot]
    }

    /// Position of a day name in the grid, if it is an available day.
    pub fn day_index(&self, day: &str) -> Option<usize> {
        self.days.iter().position(|d| d == day)
    }

    /// Resolves a clock time to its slot index.
    ///
    /// Only exact slot boundaries inside `[start, end)` resolve; any
    /// other time — misaligned, before the window, or at/past its end —
    /// fails with [`PlanError::UnknownSlot`]. A fixed constraint whose
    /// times fall outside the configured window therefore hard-fails
    /// during encoding instead of being clamped.
    pub fn slot_index(&self, time: &str) -> Result<usize, PlanError> {
        let t = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| PlanError::UnknownSlot(time.to_string()))?;
        if t < self.start || t >= self.end {
            return Err(PlanError::UnknownSlot(time.to_string()));
        }
        let offset = (t - self.start).num_minutes();
        if offset % SLOT_MINUTES as i64 != 0 {
            return Err(PlanError::UnknownSlot(time.to_string()));
        }
        Ok((offset / SLOT_MINUTES as i64) as usize)
    }
}

fn parse_clock(raw: &str) -> Result<NaiveTime, PlanError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| PlanError::InvalidRange(format!("unparseable time {raw:?}")))
}
