//! Snapshot serialization — one line's full staffing state as a value.
//!
//! The core is pure: every automation pass maps a snapshot to a new
//! snapshot. The caller owns persistence and applies results
//! atomically; this type is just the bundle it stores and restores.

use crate::break_schedule::BreakSchedule;
use crate::error::{LineError, LineResult};
use crate::roster::{Person, Roster};
use crate::slots::{self, LeadAssignments, SlotsByArea};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub roster: Roster,
    pub slots: SlotsByArea,
    pub leads: LeadAssignments,
    pub break_schedule: BreakSchedule,
}

impl LineSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a person from the roster and cascade: their slot, any
    /// lead role they hold, and any break-schedule entry all clear.
    pub fn remove_person(&mut self, person_id: &str) -> LineResult<Person> {
        let person = self.roster.remove(person_id).ok_or_else(|| LineError::UnknownPerson {
            person: person_id.to_string(),
        })?;

        slots::clear_person(&mut self.slots, &mut self.leads, person_id);
        for entries in self.break_schedule.values_mut() {
            entries.remove(person_id);
        }

        log::debug!("removed {} ({}) and cleared their assignments", person.name, person_id);
        Ok(person)
    }

    pub fn to_json(&self) -> LineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> LineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
