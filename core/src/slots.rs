//! Slot state: who sits where.
//!
//! SlotsByArea is a plain value type. Engines clone it, rework the
//! clone, and hand the new map back; the caller swaps it into shared
//! state atomically. Nothing in the core ever mutates a caller-held
//! snapshot in place.

use crate::config::Capacity;
use crate::types::{AreaId, LeadRoleId, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One staffable position within an area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub person_id: Option<PersonId>,
    /// Disabled slots are invisible to capacity accounting and to
    /// every automation pass.
    #[serde(default)]
    pub disabled: bool,
    /// Locked slots keep their occupant across automation passes.
    #[serde(default)]
    pub locked: bool,
}

impl Slot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn occupied_by(person_id: impl Into<PersonId>) -> Self {
        Self {
            person_id: Some(person_id.into()),
            disabled: false,
            locked: false,
        }
    }

    pub fn locked_with(person_id: impl Into<PersonId>) -> Self {
        Self {
            person_id: Some(person_id.into()),
            disabled: false,
            locked: true,
        }
    }
}

pub type SlotsByArea = HashMap<AreaId, Vec<Slot>>;

/// Lead role key → current holder (or vacant).
pub type LeadAssignments = HashMap<LeadRoleId, Option<PersonId>>;

/// Clamp an area's enabled slot count into the resolved capacity after
/// a capacity change. Shortfall appends empty slots; excess truncates
/// enabled slots from the tail, skipping disabled ones. Disabled slots
/// never count toward capacity.
pub fn apply_capacity(slots: &mut SlotsByArea, area_id: &str, capacity: Capacity) {
    let area_slots = slots.entry(area_id.to_string()).or_default();

    let enabled = |v: &[Slot]| v.iter().filter(|s| !s.disabled).count();

    while enabled(area_slots) < capacity.min {
        area_slots.push(Slot::empty());
    }
    while enabled(area_slots) > capacity.max {
        let last_enabled = area_slots
            .iter()
            .rposition(|s| !s.disabled)
            .expect("enabled count > 0");
        area_slots.remove(last_enabled);
    }
}

/// Clear one person out of every slot and every lead role. Run on
/// roster removal so a deleted person never lingers in assignments.
pub fn clear_person(slots: &mut SlotsByArea, leads: &mut LeadAssignments, person_id: &str) {
    for area_slots in slots.values_mut() {
        for slot in area_slots.iter_mut() {
            if slot.person_id.as_deref() == Some(person_id) {
                slot.person_id = None;
            }
        }
    }
    for holder in leads.values_mut() {
        if holder.as_deref() == Some(person_id) {
            *holder = None;
        }
    }
}

/// Person ids currently seated in enabled slots, across all areas.
pub fn occupants(slots: &SlotsByArea) -> Vec<PersonId> {
    slots
        .values()
        .flatten()
        .filter(|s| !s.disabled)
        .filter_map(|s| s.person_id.clone())
        .collect()
}
