//! Timetable materialization.
//!
//! Renders an [`Allocation`] into a 2-D grid: rows are time slots,
//! columns are days. Free slots become empty strings — never a null
//! marker that would corrupt row-by-row rendering downstream. The
//! rendering collaborator adds color and layout; this stage only
//! shapes the data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Allocation, TimeGrid};

/// A slot × day grid of labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timetable {
    /// "HH:MM" label per row, in slot order.
    pub time_labels: Vec<String>,
    /// Day name per column, in request order.
    pub days: Vec<String>,
    /// rows[slot][day] = label, or "" for a free slot.
    pub rows: Vec<Vec<String>>,
}

impl Timetable {
    /// The label at (slot, day), "" when free.
    pub fn cell(&self, slot: usize, day: usize) -> &str {
        &self.rows[slot][day]
    }

    /// Number of slot rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Materializes an allocation into a timetable.
///
/// Pure and idempotent: the same allocation always yields the same
/// grid.
pub fn materialize(grid: &TimeGrid, allocation: &Allocation) -> Timetable {
    let rows = (0..grid.num_slots())
        .map(|slot| {
            grid.days()
                .iter()
                .map(|day| {
                    allocation
                        .label(day, slot)
                        .unwrap_or_default()
                        .to_string()
                })
                .collect()
        })
        .collect();

    Timetable {
        time_labels: grid.labels().to_vec(),
        days: grid.days().to_vec(),
        rows,
    }
}

impl fmt::Display for Timetable {
    /// Plain-text table with one column per day, sized to content.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.days.iter().map(|d| d.len()).collect();
        for row in &self.rows {
            for (col, cell) in row.iter().enumerate() {
                widths[col] = widths[col].max(cell.len());
            }
        }

        write!(f, "{:>5}", "Time")?;
        for (day, &width) in self.days.iter().zip(&widths) {
            write!(f, "  {day:>width$}")?;
        }
        writeln!(f)?;
        for (label, row) in self.time_labels.iter().zip(&self.rows) {
            write!(f, "{label:>5}")?;
            for (cell, &width) in row.iter().zip(&widths) {
                write!(f, "  {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeGrid;

    fn grid() -> TimeGrid {
        let days = ["Monday", "Tuesday"].map(String::from).to_vec();
        TimeGrid::build(&days, "09:00", "10:30").unwrap()
    }

    fn allocation() -> Allocation {
        let mut a = Allocation::new();
        a.set("Monday", 0, "Gym");
        a.set("Monday", 1, "Gym");
        a.set("Tuesday", 2, "Standup");
        a
    }

    #[test]
    fn test_materialize_shapes_the_grid() {
        let t = materialize(&grid(), &allocation());
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.days, vec!["Monday", "Tuesday"]);
        assert_eq!(t.time_labels, vec!["09:00", "09:30", "10:00"]);
        assert_eq!(t.cell(0, 0), "Gym");
        assert_eq!(t.cell(1, 0), "Gym");
        assert_eq!(t.cell(2, 1), "Standup");
    }

    #[test]
    fn test_free_slots_are_empty_strings() {
        let t = materialize(&grid(), &allocation());
        assert_eq!(t.cell(2, 0), "");
        assert_eq!(t.cell(0, 1), "");
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let g = grid();
        let a = allocation();
        assert_eq!(materialize(&g, &a), materialize(&g, &a));
    }

    #[test]
    fn test_display_renders_every_row() {
        let text = materialize(&grid(), &allocation()).to_string();
        assert!(text.contains("Monday"));
        assert!(text.contains("09:30"));
        assert!(text.contains("Standup"));
        assert_eq!(text.lines().count(), 4);
    }
}
