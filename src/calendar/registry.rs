//! Shift type registry.
//!
//! The registry holds the global marker definitions. Calendar events refer
//! to entries by id; removing an entry never touches those events.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{default_shift_types, extra_duty_shift_type, ShiftType, EXTRA_DUTY_SHIFT_ID};

/// Whether an upsert created a new entry or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// No entry with the id existed.
    Created,
    /// An entry with the id was replaced.
    Updated,
}

/// The ordered set of shift type definitions, unique by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftTypeRegistry {
    shift_types: Vec<ShiftType>,
}

impl Default for ShiftTypeRegistry {
    fn default() -> Self {
        Self {
            shift_types: default_shift_types(),
        }
    }
}

impl ShiftTypeRegistry {
    /// Builds a registry from a stored list.
    ///
    /// Later duplicates of an id replace earlier ones. The reserved
    /// extra-duty marker is injected when missing.
    pub fn from_stored(shift_types: Vec<ShiftType>) -> Self {
        let mut registry = Self {
            shift_types: Vec::with_capacity(shift_types.len() + 1),
        };
        for shift in shift_types {
            registry.insert_or_replace(shift);
        }
        registry.ensure_extra_duty();
        registry
    }

    /// Inserts or replaces a shift type by id, normalizing its label.
    ///
    /// # Example
    ///
    /// ```
    /// use ac4_engine::calendar::{ShiftTypeRegistry, UpsertOutcome};
    /// use ac4_engine::models::ShiftType;
    ///
    /// let mut registry = ShiftTypeRegistry::default();
    /// let outcome = registry.upsert(ShiftType::new("folga", "folga", "#10B981", "#FFFFFF"));
    /// assert_eq!(outcome, UpsertOutcome::Created);
    /// assert_eq!(registry.get("folga").unwrap().label, "FOLGA");
    /// ```
    pub fn upsert(&mut self, shift: ShiftType) -> UpsertOutcome {
        let outcome = self.insert_or_replace(shift.normalized());
        debug!(?outcome, "Upserted shift type");
        outcome
    }

    fn insert_or_replace(&mut self, shift: ShiftType) -> UpsertOutcome {
        match self.shift_types.iter_mut().find(|s| s.id == shift.id) {
            Some(existing) => {
                *existing = shift;
                UpsertOutcome::Updated
            }
            None => {
                self.shift_types.push(shift);
                UpsertOutcome::Created
            }
        }
    }

    /// Removes a shift type. Returns false if the id is unknown or reserved.
    ///
    /// Calendar events referencing the id keep the dangling reference.
    pub fn remove(&mut self, id: &str) -> bool {
        if id == EXTRA_DUTY_SHIFT_ID {
            warn!(shift_type_id = %id, "Refusing to remove reserved shift type");
            return false;
        }
        let before = self.shift_types.len();
        self.shift_types.retain(|s| s.id != id);
        self.shift_types.len() != before
    }

    /// Looks up a shift type by id.
    pub fn get(&self, id: &str) -> Option<&ShiftType> {
        self.shift_types.iter().find(|s| s.id == id)
    }

    /// Returns true if the id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All definitions, including the reserved marker.
    pub fn list(&self) -> &[ShiftType] {
        &self.shift_types
    }

    /// Definitions shown in management views (the reserved marker excluded).
    pub fn user_managed(&self) -> impl Iterator<Item = &ShiftType> {
        self.shift_types.iter().filter(|s| !s.is_reserved())
    }

    /// Adds the reserved extra-duty marker if it is missing.
    ///
    /// Returns true if it was added.
    pub fn ensure_extra_duty(&mut self) -> bool {
        if self.contains(EXTRA_DUTY_SHIFT_ID) {
            return false;
        }
        self.shift_types.push(extra_duty_shift_type());
        true
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.shift_types.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.shift_types.is_empty()
    }
}
