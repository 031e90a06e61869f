//! Allocation (solution) model.
//!
//! The resolved day → slot-index → label mapping produced by a
//! successful solve. A label is either a fixed-constraint name or a
//! project name; unlabeled slots are free.
//!
//! # Invariants
//! - Every slot maps to at most one label (the map structure enforces
//!   this; the encoder's exclusivity constraint guarantees no two
//!   writers compete for a slot).
//! - Fixed-constraint labels are never overwritten by project labels:
//!   the extractor writes fixed constraints first and projects only
//!   through [`Allocation::set_if_free`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A complete day → slot → label assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Allocation {
    cells: HashMap<String, BTreeMap<usize, String>>,
}

impl Allocation {
    /// Creates an empty allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a label, replacing whatever the slot held.
    pub fn set(&mut self, day: impl Into<String>, slot: usize, label: impl Into<String>) {
        self.cells
            .entry(day.into())
            .or_default()
            .insert(slot, label.into());
    }

    /// Writes a label only if the slot is unoccupied.
    ///
    /// Returns whether the write happened.
    pub fn set_if_free(
        &mut self,
        day: impl Into<String>,
        slot: usize,
        label: impl Into<String>,
    ) -> bool {
        let slots = self.cells.entry(day.into()).or_default();
        if slots.contains_key(&slot) {
            return false;
        }
        slots.insert(slot, label.into());
        true
    }

    /// The label occupying a slot, if any.
    pub fn label(&self, day: &str, slot: usize) -> Option<&str> {
        self.cells
            .get(day)?
            .get(&slot)
            .map(|label| label.as_str())
    }

    /// The occupied slots of a day, ordered by slot index.
    pub fn day_slots(&self, day: &str) -> Option<&BTreeMap<usize, String>> {
        self.cells.get(day)
    }

    /// Number of slots carrying the given label, across all days.
    pub fn labeled_slot_count(&self, label: &str) -> usize {
        self.cells
            .values()
            .flat_map(|slots| slots.values())
            .filter(|l| l.as_str() == label)
            .count()
    }

    /// Total number of occupied slots.
    pub fn occupied_slot_count(&self) -> usize {
        self.cells.values().map(|slots| slots.len()).sum()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.values().all(|slots| slots.is_empty())
    }

    /// Iterates `(day, slot, label)` over every occupied cell.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, &str)> {
        self.cells.iter().flat_map(|(day, slots)| {
            slots
                .iter()
                .map(move |(&slot, label)| (day.as_str(), slot, label.as_str()))
        })
    }
}
