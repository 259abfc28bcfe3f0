//! Line-health aggregation.
//!
//! The knowledge score is the plain mean of skill ordinals (0..=3)
//! over everyone currently seated: slot occupants in their slot's
//! area, lead holders in their lead role's area. An unstaffed line
//! scores None — zero would read as "everyone is brand new", which is
//! the wrong signal for "nobody is assigned".

use crate::config::LineConfig;
use crate::roster::Roster;
use crate::slots::{LeadAssignments, SlotsByArea};

/// Knowledge score for the whole line, or None when nobody is seated.
pub fn line_health_score(
    roster: &Roster,
    slots: &SlotsByArea,
    leads: &LeadAssignments,
    config: &LineConfig,
) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;

    for area in &config.areas {
        tally_area(roster, slots, leads, config, &area.id, &mut sum, &mut count);
    }

    mean(sum, count)
}

/// The same formula restricted to one area (its slots plus any lead
/// role attached to it).
pub fn area_health_score(
    roster: &Roster,
    slots: &SlotsByArea,
    leads: &LeadAssignments,
    config: &LineConfig,
    area_id: &str,
) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    tally_area(roster, slots, leads, config, area_id, &mut sum, &mut count);
    mean(sum, count)
}

fn tally_area(
    roster: &Roster,
    slots: &SlotsByArea,
    leads: &LeadAssignments,
    config: &LineConfig,
    area_id: &str,
    sum: &mut f64,
    count: &mut usize,
) {
    if let Some(area_slots) = slots.get(area_id) {
        for slot in area_slots.iter().filter(|s| !s.disabled) {
            if let Some(pid) = &slot.person_id {
                *sum += roster.skill_of(pid, area_id).score();
                *count += 1;
            }
        }
    }
    for role in config.lead_roles.iter().filter(|r| r.area_id == area_id) {
        if let Some(Some(pid)) = leads.get(&role.key) {
            *sum += roster.skill_of(pid, &role.area_id).score();
            *count += 1;
        }
    }
}

fn mean(sum: f64, count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
