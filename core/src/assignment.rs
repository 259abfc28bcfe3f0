//! The slot-assignment engine — the four automation algorithms.
//!
//! All four share one pipeline:
//!   1. Filter the roster down to assignable candidates
//!   2. Preserve locked slots (their occupants are spoken for)
//!   3. Anchor every trained-or-expert area with its best qualified person
//!   4. Order fillable positions: minimum staffing before overflow,
//!      juiced areas before neutral before de-juiced
//!   5. Fill, one slot at a time, with an algorithm-specific pick
//!
//! Every pass is copy-on-write: the caller's slot map is cloned and the
//! new map returned. Randomness comes only from the injected LineRng;
//! max-speed takes no RNG at all and is fully reproducible.

use crate::config::{effective_capacity, AreaConfig, LineConfig, CapacityOverrides};
use crate::rng::LineRng;
use crate::roster::{Person, Roster};
use crate::skill::SkillLevel;
use crate::slots::{LeadAssignments, SlotsByArea};
use crate::types::{AreaId, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Chance that a light-stretch fill gives the slot to a learner
/// instead of the strongest candidate. Tuned by hand on real lines;
/// keep literal.
pub const STRETCH_PROBABILITY: f64 = 0.35;

/// Stretch-score bonus for a person who asked to learn the area.
/// Dwarfs the skill term so willingness always outranks skill gap.
pub const WANT_TO_LEARN_BONUS: u32 = 100;

/// Per-area fill priority. Juiced areas staff first when people run
/// short; de-juiced areas absorb the understaffing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaPriority {
    Juiced,
    #[default]
    Neutral,
    DeJuiced,
}

impl AreaPriority {
    fn fill_rank(self) -> u8 {
        match self {
            Self::Juiced => 0,
            Self::Neutral => 1,
            Self::DeJuiced => 2,
        }
    }
}

pub type AreaPriorities = HashMap<AreaId, AreaPriority>;

/// Everything an assignment pass reads. All borrowed snapshots; the
/// engine writes nothing back through this.
pub struct AssignmentContext<'a> {
    pub roster: &'a Roster,
    pub config: &'a LineConfig,
    pub capacity_overrides: &'a CapacityOverrides,
    pub priorities: &'a AreaPriorities,
    pub leads: &'a LeadAssignments,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Randomize,
    SpreadTalent,
    MaxSpeed,
    LightStretch,
}

// ── Entry points ─────────────────────────────────────────────────────────────

/// Random fill: candidates are shuffled once, then slots take the first
/// eligible unused person in shuffled order. No skill comparison.
pub fn randomize_assignments(
    ctx: &AssignmentContext,
    current: &SlotsByArea,
    rng: &mut LineRng,
) -> SlotsByArea {
    run_pass(ctx, current, Strategy::Randomize, Some(rng))
}

/// Talent spread: each slot takes the highest-skill eligible unused
/// person; the one-time shuffle only randomizes who wins skill ties.
pub fn spread_talent_assignments(
    ctx: &AssignmentContext,
    current: &SlotsByArea,
    rng: &mut LineRng,
) -> SlotsByArea {
    run_pass(ctx, current, Strategy::SpreadTalent, Some(rng))
}

/// Max speed: deterministic strongest-first fill. Same roster and slot
/// snapshot in, same assignments out, every time.
pub fn max_speed_assignments(ctx: &AssignmentContext, current: &SlotsByArea) -> SlotsByArea {
    run_pass(ctx, current, Strategy::MaxSpeed, None)
}

/// Light stretch: mostly talent-spread, but each slot independently
/// rolls STRETCH_PROBABILITY to instead seat a sub-expert ranked by
/// stretch score (want-to-learn bonus plus skill gap).
pub fn light_stretch_assignments(
    ctx: &AssignmentContext,
    current: &SlotsByArea,
    rng: &mut LineRng,
) -> SlotsByArea {
    run_pass(ctx, current, Strategy::LightStretch, Some(rng))
}

// ── Shared pipeline ──────────────────────────────────────────────────────────

struct FillPos {
    priority: u8,
    area_index: usize,
    slot_index: usize,
}

fn run_pass(
    ctx: &AssignmentContext,
    current: &SlotsByArea,
    strategy: Strategy,
    mut rng: Option<&mut LineRng>,
) -> SlotsByArea {
    let lead_holders: HashSet<&str> = ctx
        .leads
        .values()
        .filter_map(|holder| holder.as_deref())
        .collect();

    let mut pool: Vec<&Person> = ctx
        .roster
        .iter()
        .filter(|p| p.available_for_assignment())
        .filter(|p| !lead_holders.contains(p.id.as_str()))
        .collect();

    // One shuffle per pass. Max-speed skips it so its pick order is
    // exactly roster order.
    if strategy != Strategy::MaxSpeed {
        if let Some(r) = rng.as_deref_mut() {
            r.shuffle(&mut pool);
        }
    }

    let mut next = current.clone();
    let mut used: HashSet<PersonId> = HashSet::new();

    // Locked slots keep their occupant; disabled slots and areas the
    // config doesn't manage are untouched outright. All such occupants
    // count as used so no other slot can double-book them. Everything
    // else is vacated for refill.
    for (area_id, area_slots) in next.iter_mut() {
        let managed = ctx.config.area(area_id).is_some();
        for slot in area_slots.iter_mut() {
            if slot.locked || slot.disabled || !managed {
                if let Some(id) = &slot.person_id {
                    used.insert(id.clone());
                }
            } else {
                slot.person_id = None;
            }
        }
    }

    anchor_pass(ctx, &pool, &mut next, &mut used);

    let (minimum, overflow) = fill_order(ctx, &next);

    let mut left_open = 0usize;
    for pos in minimum.into_iter().chain(overflow) {
        let area = &ctx.config.areas[pos.area_index];
        match select_candidate(strategy, &pool, &used, area, rng.as_deref_mut()) {
            Some(person_id) => {
                used.insert(person_id.clone());
                if let Some(area_slots) = next.get_mut(&area.id) {
                    area_slots[pos.slot_index].person_id = Some(person_id);
                }
            }
            None => {
                left_open += 1;
                log::debug!(
                    "area {}: slot {} left open, no eligible candidate",
                    area.id,
                    pos.slot_index + 1
                );
            }
        }
    }

    log::debug!(
        "assignment pass complete: {} seated, {} slots left open",
        used.len(),
        left_open
    );

    next
}

/// Guarantee every experience-gated area at least one qualified person
/// before the greedy fill runs, so a juiced neighbor can't drain all
/// the trained people first.
fn anchor_pass(
    ctx: &AssignmentContext,
    pool: &[&Person],
    next: &mut SlotsByArea,
    used: &mut HashSet<PersonId>,
) {
    for area in &ctx.config.areas {
        if !area.requires_trained {
            continue;
        }
        let Some(area_slots) = next.get_mut(&area.id) else {
            continue;
        };
        let Some(anchor_idx) = area_slots.iter().position(|s| !s.disabled && !s.locked) else {
            continue;
        };

        let candidate = pool
            .iter()
            .filter(|p| !used.contains(&p.id))
            .filter(|p| p.skill_in(&area.id).is_trained_or_expert())
            .max_by_key(|p| p.skill_in(&area.id));

        match candidate {
            Some(p) => {
                used.insert(p.id.clone());
                area_slots[anchor_idx].person_id = Some(p.id.clone());
            }
            // Left open: reported downstream as a staffing risk,
            // never an error.
            None => log::info!("area {}: no trained or expert candidate for anchor slot", area.id),
        }
    }
}

/// Split fillable positions into minimum and overflow lists, each
/// ordered by (priority, area position, slot index). Minimum staffing
/// everywhere always comes before any overflow slot anywhere.
fn fill_order(ctx: &AssignmentContext, next: &SlotsByArea) -> (Vec<FillPos>, Vec<FillPos>) {
    let mut minimum = Vec::new();
    let mut overflow = Vec::new();

    for (area_index, area) in ctx.config.areas.iter().enumerate() {
        let cap = effective_capacity(area, ctx.capacity_overrides);
        let priority = ctx
            .priorities
            .get(&area.id)
            .copied()
            .unwrap_or_default()
            .fill_rank();
        let Some(area_slots) = next.get(&area.id) else {
            continue;
        };

        let mut enabled_seen = 0usize;
        let mut fillable = Vec::new();
        for (slot_index, slot) in area_slots.iter().enumerate() {
            if slot.disabled {
                continue;
            }
            enabled_seen += 1;
            if enabled_seen > cap.max {
                break;
            }
            if slot.locked || slot.person_id.is_some() {
                continue;
            }
            fillable.push(slot_index);
        }

        for (nth, slot_index) in fillable.into_iter().enumerate() {
            let pos = FillPos { priority, area_index, slot_index };
            if nth < cap.min {
                minimum.push(pos);
            } else {
                overflow.push(pos);
            }
        }
    }

    minimum.sort_by_key(|p| (p.priority, p.area_index, p.slot_index));
    overflow.sort_by_key(|p| (p.priority, p.area_index, p.slot_index));
    (minimum, overflow)
}

/// A person may work an area iff the area takes anyone, or they have
/// at least some experience there.
fn qualifies(person: &Person, area: &AreaConfig) -> bool {
    !area.requires_trained || person.skill_in(&area.id) != SkillLevel::NoExperience
}

fn select_candidate(
    strategy: Strategy,
    pool: &[&Person],
    used: &HashSet<PersonId>,
    area: &AreaConfig,
    rng: Option<&mut LineRng>,
) -> Option<PersonId> {
    let eligible: Vec<&Person> = pool
        .iter()
        .copied()
        .filter(|p| !used.contains(&p.id) && qualifies(p, area))
        .collect();

    match strategy {
        Strategy::Randomize => eligible.first().map(|p| p.id.clone()),
        Strategy::SpreadTalent | Strategy::MaxSpeed => best_by_skill(&eligible, area),
        Strategy::LightStretch => {
            let stretch = rng.map(|r| r.chance(STRETCH_PROBABILITY)).unwrap_or(false);
            if stretch {
                let learners: Vec<&Person> = eligible
                    .iter()
                    .copied()
                    .filter(|p| p.skill_in(&area.id).ordinal() <= 2)
                    .collect();
                if !learners.is_empty() {
                    return learners
                        .iter()
                        .max_by_key(|p| stretch_score(p, area))
                        .map(|p| p.id.clone());
                }
            }
            best_by_skill(&eligible, area)
        }
    }
}

fn best_by_skill(eligible: &[&Person], area: &AreaConfig) -> Option<PersonId> {
    eligible
        .iter()
        .max_by_key(|p| p.skill_in(&area.id))
        .map(|p| p.id.clone())
}

/// Rank sub-experts for a stretch pick: wanting to learn the area
/// dominates, then the bigger the skill gap the better.
fn stretch_score(person: &Person, area: &AreaConfig) -> u32 {
    let learn_bonus = if person.areas_want_to_learn.contains(&area.id) {
        WANT_TO_LEARN_BONUS
    } else {
        0
    };
    learn_bonus + u32::from(3 - person.skill_in(&area.id).ordinal())
}
