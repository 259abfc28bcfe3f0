//! Degraded-state reporting.
//!
//! The engines never fail when staffing falls short — they leave slots
//! open. These checks turn the resulting state into warnings the UI
//! layer can surface, by straight comparison against resolved capacity
//! and schedule coverage.

use crate::break_schedule::BreakSchedule;
use crate::config::{effective_capacity, CapacityOverrides, LineConfig};
use crate::roster::Roster;
use crate::slots::SlotsByArea;
use crate::types::AreaId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaffingWarning {
    /// Fewer people seated than the area's effective minimum.
    BelowMinimum { area: AreaId, staffed: usize, min: usize },
    /// An experience-gated area with no trained-or-expert occupant.
    NeedsTrainedOrExpert { area: AreaId },
    /// A rotation number nobody holds, in a scope unit with enough
    /// people to have covered it.
    UncoveredRotation { scope_key: String, rotation: u8 },
}

/// Warnings derived from slot state alone.
pub fn staffing_warnings(
    roster: &Roster,
    slots: &SlotsByArea,
    config: &LineConfig,
    capacity_overrides: &CapacityOverrides,
) -> Vec<StaffingWarning> {
    let mut warnings = Vec::new();

    for area in &config.areas {
        let cap = effective_capacity(area, capacity_overrides);
        let occupants: Vec<&String> = slots
            .get(&area.id)
            .map(|v| {
                v.iter()
                    .filter(|s| !s.disabled)
                    .filter_map(|s| s.person_id.as_ref())
                    .collect()
            })
            .unwrap_or_default();

        if occupants.len() < cap.min {
            warnings.push(StaffingWarning::BelowMinimum {
                area: area.id.clone(),
                staffed: occupants.len(),
                min: cap.min,
            });
        }

        if area.requires_trained {
            let covered = occupants
                .iter()
                .any(|pid| roster.skill_of(pid, &area.id).is_trained_or_expert());
            if !covered {
                warnings.push(StaffingWarning::NeedsTrainedOrExpert { area: area.id.clone() });
            }
        }
    }

    warnings
}

/// Rotations left empty in scope units that had the headcount to
/// cover every rotation. With fewer people than rotations, gaps are
/// inevitable and not worth flagging.
pub fn rotation_coverage_warnings(
    schedule: &BreakSchedule,
    rotation_count: u8,
) -> Vec<StaffingWarning> {
    let mut warnings = Vec::new();

    for (scope_key, entries) in schedule {
        if entries.len() < rotation_count as usize {
            continue;
        }
        for rotation in 1..=rotation_count {
            let covered = entries.values().any(|a| a.break_rotation == rotation);
            if !covered {
                warnings.push(StaffingWarning::UncoveredRotation {
                    scope_key: scope_key.clone(),
                    rotation,
                });
            }
        }
    }

    warnings
}
