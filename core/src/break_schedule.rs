//! Break/lunch rotation generation.
//!
//! Every staffed person gets one rotation number covering both their
//! break and their lunch. Two regimes:
//!   - headcount <= rotations: everyone gets a distinct rotation,
//!     preferences honored greedily, most specific first
//!   - headcount >  rotations: buckets balanced on headcount first,
//!     preference second, accumulated skill third
//!
//! Coverage always wins: a preference is only ever a tiebreaker.
//! Schedules are regenerated wholesale after an assignment pass, never
//! patched entry by entry.

use crate::config::{LineConfig, RotationScope, MAX_ROTATIONS, MIN_ROTATIONS};
use crate::roster::Roster;
use crate::skill::BreakPreference;
use crate::slots::{LeadAssignments, SlotsByArea};
use crate::types::PersonId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Schedule key for the shared line-wide rotation pool.
pub const LINE_WIDE_KEY: &str = "line";

/// A person's assigned rotation numbers. Break and lunch always share
/// the same rotation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationAssignment {
    pub break_rotation: u8,
    pub lunch_rotation: u8,
}

impl RotationAssignment {
    fn in_rotation(number: u8) -> Self {
        Self {
            break_rotation: number,
            lunch_rotation: number,
        }
    }
}

/// Area id (or LINE_WIDE_KEY) → person → rotation numbers.
pub type BreakSchedule = HashMap<String, HashMap<PersonId, RotationAssignment>>;

struct Staffed {
    person_id: PersonId,
    skill: f64,
    preference: BreakPreference,
}

/// Build the full break schedule for the line's current staffing.
/// Empty scope units produce no entry; a person with no recorded
/// preference or skill is treated as no-preference / no-experience.
pub fn generate_break_schedule(
    roster: &Roster,
    slots: &SlotsByArea,
    leads: &LeadAssignments,
    config: &LineConfig,
    rotation_count: u8,
    scope: RotationScope,
) -> BreakSchedule {
    let n = rotation_count.clamp(MIN_ROTATIONS, MAX_ROTATIONS);
    let mut schedule = BreakSchedule::new();

    match scope {
        RotationScope::PerArea => {
            for area in &config.areas {
                let members = area_members(roster, slots, &area.id);
                if members.is_empty() {
                    continue;
                }
                schedule.insert(area.id.clone(), assign_rotations(members, n));
            }
        }
        RotationScope::LineWide => {
            let members = line_members(roster, slots, leads, config);
            if !members.is_empty() {
                schedule.insert(LINE_WIDE_KEY.to_string(), assign_rotations(members, n));
            }
        }
    }

    log::debug!(
        "break schedule regenerated: {} scope unit(s), {} rotations",
        schedule.len(),
        n
    );
    schedule
}

fn area_members(roster: &Roster, slots: &SlotsByArea, area_id: &str) -> Vec<Staffed> {
    let Some(area_slots) = slots.get(area_id) else {
        return Vec::new();
    };
    area_slots
        .iter()
        .filter(|s| !s.disabled)
        .filter_map(|s| s.person_id.as_ref())
        .map(|pid| Staffed {
            person_id: pid.clone(),
            skill: roster.skill_of(pid, area_id).score(),
            preference: preference_of(roster, pid),
        })
        .collect()
}

/// Line-wide pool: every slot occupant plus every lead, scored by
/// their mean skill across all of the line's areas.
fn line_members(
    roster: &Roster,
    slots: &SlotsByArea,
    leads: &LeadAssignments,
    config: &LineConfig,
) -> Vec<Staffed> {
    let mut members = Vec::new();
    let mut seen: HashSet<PersonId> = HashSet::new();

    let mut push = |pid: &PersonId| {
        if seen.insert(pid.clone()) {
            members.push(Staffed {
                person_id: pid.clone(),
                skill: mean_skill(roster, pid, config),
                preference: preference_of(roster, pid),
            });
        }
    };

    for area in &config.areas {
        if let Some(area_slots) = slots.get(&area.id) {
            for slot in area_slots.iter().filter(|s| !s.disabled) {
                if let Some(pid) = &slot.person_id {
                    push(pid);
                }
            }
        }
    }
    for role in &config.lead_roles {
        if let Some(Some(pid)) = leads.get(&role.key) {
            push(pid);
        }
    }

    members
}

fn mean_skill(roster: &Roster, person_id: &str, config: &LineConfig) -> f64 {
    if config.areas.is_empty() {
        return 0.0;
    }
    let total: f64 = config
        .areas
        .iter()
        .map(|a| roster.skill_of(person_id, &a.id).score())
        .sum();
    total / config.areas.len() as f64
}

fn preference_of(roster: &Roster, person_id: &str) -> BreakPreference {
    roster
        .get(person_id)
        .map(|p| p.break_preference)
        .unwrap_or_default()
}

fn assign_rotations(members: Vec<Staffed>, n: u8) -> HashMap<PersonId, RotationAssignment> {
    if members.len() <= n as usize {
        distinct_rotations(members, n)
    } else {
        balanced_buckets(members, n)
    }
}

/// Few enough people that everyone can have their own rotation. The
/// most specific preferences claim theirs first; whoever is left takes
/// the first open rotation.
fn distinct_rotations(mut members: Vec<Staffed>, n: u8) -> HashMap<PersonId, RotationAssignment> {
    members.sort_by_key(|m| m.preference.specificity());

    let mut taken = vec![false; n as usize + 1];
    let mut out = HashMap::new();

    for member in members {
        let rotation = member
            .preference
            .preferred_rotations(n)
            .into_iter()
            .find(|&r| !taken[r as usize])
            .or_else(|| (1..=n).find(|&r| !taken[r as usize]))
            .unwrap_or(1);
        taken[rotation as usize] = true;
        out.insert(member.person_id, RotationAssignment::in_rotation(rotation));
    }

    out
}

struct Bucket {
    number: u8,
    skill_sum: f64,
    member_count: usize,
}

/// More people than rotations: balance bucket headcount above all,
/// then preference, then accumulated skill. Weak performers land in
/// the currently strongest bucket, strong performers in the weakest,
/// so average skill stays level across rotations.
fn balanced_buckets(mut members: Vec<Staffed>, n: u8) -> HashMap<PersonId, RotationAssignment> {
    members.sort_by(|a, b| {
        b.skill
            .partial_cmp(&a.skill)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.preference.specificity().cmp(&b.preference.specificity()))
    });

    let mut buckets: Vec<Bucket> = (1..=n)
        .map(|number| Bucket { number, skill_sum: 0.0, member_count: 0 })
        .collect();
    let mut out = HashMap::new();

    for member in members {
        let preferred = member.preference.preferred_rotations(n);
        let low_performer = member.skill <= 1.0;

        let chosen = buckets
            .iter_mut()
            .min_by(|a, b| {
                a.member_count
                    .cmp(&b.member_count)
                    .then_with(|| {
                        preferred.contains(&b.number).cmp(&preferred.contains(&a.number))
                    })
                    .then_with(|| {
                        // Low performers dilute into strength; strong
                        // performers shore up the weakest bucket.
                        let (ka, kb) = if low_performer {
                            (-a.skill_sum, -b.skill_sum)
                        } else {
                            (a.skill_sum, b.skill_sum)
                        };
                        ka.partial_cmp(&kb).unwrap_or(Ordering::Equal)
                    })
            })
            .expect("at least one rotation bucket");

        chosen.skill_sum += member.skill;
        chosen.member_count += 1;
        out.insert(member.person_id, RotationAssignment::in_rotation(chosen.number));
    }

    out
}
