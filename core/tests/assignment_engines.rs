//! Integration tests for the four slot-assignment algorithms: the
//! shared pipeline invariants (no double-booking, lock preservation,
//! anchor guarantee, eligibility, fill ordering) and the per-algorithm
//! selection behavior.

use linecrew_core::assignment::{
    light_stretch_assignments, max_speed_assignments, randomize_assignments,
    spread_talent_assignments, AreaPriorities, AreaPriority, AssignmentContext,
};
use linecrew_core::config::{AreaConfig, CapacityOverrides, LineConfig, RotationConfig};
use linecrew_core::rng::LineRng;
use linecrew_core::roster::{Person, Roster};
use linecrew_core::skill::SkillLevel;
use linecrew_core::slots::{LeadAssignments, Slot, SlotsByArea};

struct Fixture {
    roster: Roster,
    config: LineConfig,
    overrides: CapacityOverrides,
    priorities: AreaPriorities,
    leads: LeadAssignments,
}

impl Fixture {
    fn new(areas: Vec<AreaConfig>, roster: Roster) -> Self {
        Self {
            roster,
            config: LineConfig::new(areas, vec![], RotationConfig::default()).unwrap(),
            overrides: CapacityOverrides::new(),
            priorities: AreaPriorities::new(),
            leads: LeadAssignments::new(),
        }
    }

    fn ctx(&self) -> AssignmentContext<'_> {
        AssignmentContext {
            roster: &self.roster,
            config: &self.config,
            capacity_overrides: &self.overrides,
            priorities: &self.priorities,
            leads: &self.leads,
        }
    }
}

fn person(name: &str, skills: &[(&str, SkillLevel)]) -> Person {
    let mut p = Person::new(name);
    for (area, level) in skills {
        p.skills.insert((*area).to_string(), *level);
    }
    p
}

fn empty_slots(counts: &[(&str, usize)]) -> SlotsByArea {
    counts
        .iter()
        .map(|(area, n)| ((*area).to_string(), vec![Slot::empty(); *n]))
        .collect()
}

fn seated(slots: &SlotsByArea) -> Vec<String> {
    let mut ids: Vec<String> = slots
        .values()
        .flatten()
        .filter_map(|s| s.person_id.clone())
        .collect();
    ids.sort();
    ids
}

fn id_of(roster: &Roster, name: &str) -> String {
    roster
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id.clone())
        .unwrap()
}

/// The worked example: [expert, trained, training, no-exp, no-exp] into
/// a trained-gated area with min 2 / max 3. Max-speed must anchor the
/// expert, then seat trained and training; no-experience people are
/// never auto-assigned into a gated area.
#[test]
fn max_speed_worked_example() {
    let roster = Roster::from_people(vec![
        person("Expert", &[("a", SkillLevel::Expert)]),
        person("Trained", &[("a", SkillLevel::Trained)]),
        person("Training", &[("a", SkillLevel::Training)]),
        person("Green1", &[]),
        person("Green2", &[]),
    ]);
    let fx = Fixture::new(
        vec![AreaConfig::new("a", "A", 2, 3).requiring_trained()],
        roster,
    );
    let slots = empty_slots(&[("a", 3)]);

    let next = max_speed_assignments(&fx.ctx(), &slots);

    let a = &next["a"];
    assert_eq!(a[0].person_id, Some(id_of(&fx.roster, "Expert")), "anchor slot gets the expert");
    assert_eq!(a[1].person_id, Some(id_of(&fx.roster, "Trained")));
    assert_eq!(a[2].person_id, Some(id_of(&fx.roster, "Training")));

    let green1 = id_of(&fx.roster, "Green1");
    let green2 = id_of(&fx.roster, "Green2");
    assert!(!seated(&next).contains(&green1));
    assert!(!seated(&next).contains(&green2));
}

#[test]
fn no_double_booking_across_all_algorithms() {
    let roster = Roster::from_people(vec![
        person("A", &[("x", SkillLevel::Expert), ("y", SkillLevel::Trained)]),
        person("B", &[("x", SkillLevel::Trained), ("y", SkillLevel::Expert)]),
        person("C", &[("x", SkillLevel::Training), ("y", SkillLevel::Training)]),
    ]);
    let fx = Fixture::new(
        vec![
            AreaConfig::new("x", "X", 2, 3).requiring_trained(),
            AreaConfig::new("y", "Y", 2, 3).requiring_trained(),
        ],
        roster,
    );
    let slots = empty_slots(&[("x", 3), ("y", 3)]);

    for seed in 0..20u64 {
        let passes = [
            randomize_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
            spread_talent_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
            max_speed_assignments(&fx.ctx(), &slots),
            light_stretch_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
        ];
        for next in &passes {
            let ids = seated(next);
            let mut unique = ids.clone();
            unique.dedup();
            assert_eq!(ids, unique, "person seated twice (seed {seed})");
        }
    }
}

#[test]
fn locked_slots_keep_their_occupant() {
    let roster = Roster::from_people(vec![
        person("Locked", &[("a", SkillLevel::Expert)]),
        person("Other", &[("a", SkillLevel::Trained)]),
    ]);
    let fx = Fixture::new(vec![AreaConfig::new("a", "A", 2, 2)], roster);
    let locked_id = id_of(&fx.roster, "Locked");

    let mut slots = empty_slots(&[("a", 2)]);
    slots.get_mut("a").unwrap()[1] = Slot::locked_with(locked_id.clone());

    for seed in 0..10u64 {
        let passes = [
            randomize_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
            spread_talent_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
            max_speed_assignments(&fx.ctx(), &slots),
            light_stretch_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
        ];
        for next in &passes {
            assert_eq!(
                next["a"][1].person_id,
                Some(locked_id.clone()),
                "locked occupant must survive the pass"
            );
            let count = seated(next).iter().filter(|id| **id == locked_id).count();
            assert_eq!(count, 1, "locked occupant must not be seated elsewhere too");
        }
    }
}

/// Two gated areas, exactly two qualified people: every algorithm must
/// give each area one of them, whatever else it does.
#[test]
fn anchor_guarantee_for_gated_areas() {
    let roster = Roster::from_people(vec![
        person("T1", &[("x", SkillLevel::Trained), ("y", SkillLevel::Trained)]),
        person("T2", &[("x", SkillLevel::Expert), ("y", SkillLevel::Expert)]),
        person("G1", &[]),
        person("G2", &[]),
    ]);
    let fx = Fixture::new(
        vec![
            AreaConfig::new("x", "X", 1, 2).requiring_trained(),
            AreaConfig::new("y", "Y", 1, 2).requiring_trained(),
        ],
        roster,
    );
    let slots = empty_slots(&[("x", 2), ("y", 2)]);

    for seed in 0..20u64 {
        let passes = [
            randomize_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
            spread_talent_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
            max_speed_assignments(&fx.ctx(), &slots),
            light_stretch_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
        ];
        for next in &passes {
            for area in ["x", "y"] {
                let qualified = next[area].iter().any(|s| {
                    s.person_id
                        .as_ref()
                        .map(|pid| fx.roster.skill_of(pid, area).is_trained_or_expert())
                        .unwrap_or(false)
                });
                assert!(qualified, "area {area} lost its trained anchor (seed {seed})");
            }
        }
    }
}

#[test]
fn ineligible_people_are_never_seated() {
    let mut absent = person("Absent", &[("a", SkillLevel::Expert)]);
    absent.absent = true;
    let mut ot = person("OtElsewhere", &[("a", SkillLevel::Expert)]);
    ot.overtime = true; // not marked here today
    let lead = person("Lead", &[("a", SkillLevel::Expert)]);

    let roster = Roster::from_people(vec![absent, ot, lead]);
    let mut fx = Fixture::new(vec![AreaConfig::new("a", "A", 1, 3)], roster);
    let lead_id = id_of(&fx.roster, "Lead");
    fx.leads.insert("line_lead".to_string(), Some(lead_id));

    let slots = empty_slots(&[("a", 3)]);
    for seed in 0..10u64 {
        let passes = [
            randomize_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
            spread_talent_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
            max_speed_assignments(&fx.ctx(), &slots),
            light_stretch_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed)),
        ];
        for next in &passes {
            assert!(
                seated(next).is_empty(),
                "nobody eligible, every slot must stay open (seed {seed})"
            );
        }
    }
}

/// With one person and three competing areas, the juiced area wins the
/// fill; de-juiced minimums starve last only after neutral ones.
#[test]
fn juiced_area_fills_before_neutral_and_dejuiced() {
    let roster = Roster::from_people(vec![person("Solo", &[])]);
    let mut fx = Fixture::new(
        vec![
            AreaConfig::new("a", "A", 1, 1),
            AreaConfig::new("b", "B", 1, 1),
            AreaConfig::new("c", "C", 1, 1),
        ],
        roster,
    );
    fx.priorities.insert("a".to_string(), AreaPriority::DeJuiced);
    fx.priorities.insert("c".to_string(), AreaPriority::Juiced);

    let slots = empty_slots(&[("a", 1), ("b", 1), ("c", 1)]);
    let next = max_speed_assignments(&fx.ctx(), &slots);

    assert!(next["c"][0].person_id.is_some(), "juiced area staffs first");
    assert!(next["a"][0].person_id.is_none());
    assert!(next["b"][0].person_id.is_none());
}

/// Minimum staffing in every area beats overflow anywhere: with two
/// people, area A's second (overflow) slot loses to area B's minimum.
#[test]
fn minimum_everywhere_beats_overflow() {
    let roster = Roster::from_people(vec![person("P1", &[]), person("P2", &[])]);
    let fx = Fixture::new(
        vec![AreaConfig::new("a", "A", 1, 2), AreaConfig::new("b", "B", 1, 1)],
        roster,
    );
    let slots = empty_slots(&[("a", 2), ("b", 1)]);

    let next = max_speed_assignments(&fx.ctx(), &slots);

    assert!(next["a"][0].person_id.is_some());
    assert!(next["b"][0].person_id.is_some(), "B's minimum fills before A's overflow");
    assert!(next["a"][1].person_id.is_none());
}

#[test]
fn disabled_slots_are_untouched() {
    let roster = Roster::from_people(vec![
        person("Parked", &[("a", SkillLevel::Trained)]),
        person("Other", &[("a", SkillLevel::Trained)]),
    ]);
    let fx = Fixture::new(vec![AreaConfig::new("a", "A", 1, 2)], roster);
    let parked_id = id_of(&fx.roster, "Parked");

    let mut slots = empty_slots(&[("a", 2)]);
    {
        let a = slots.get_mut("a").unwrap();
        a[0].disabled = true;
        a[0].person_id = Some(parked_id.clone());
    }

    let next = max_speed_assignments(&fx.ctx(), &slots);

    assert_eq!(next["a"][0].person_id, Some(parked_id.clone()), "disabled slot untouched");
    assert!(next["a"][0].disabled);
    let count = seated(&next).iter().filter(|id| **id == parked_id).count();
    assert_eq!(count, 1, "parked occupant never duplicated");
}

/// Light stretch rolls its 35% coin per slot: over many seeds, the
/// learner (who wants the area) wins roughly that share of passes
/// against a resident expert.
#[test]
fn light_stretch_favors_learners_at_the_tuned_rate() {
    let expert = person("Expert", &[("a", SkillLevel::Expert)]);
    let learner = person("Learner", &[]).wanting_to_learn("a");
    let roster = Roster::from_people(vec![expert, learner]);
    let fx = Fixture::new(vec![AreaConfig::new("a", "A", 1, 1)], roster);
    let learner_id = id_of(&fx.roster, "Learner");
    let slots = empty_slots(&[("a", 1)]);

    let mut learner_wins = 0usize;
    const RUNS: usize = 300;
    for seed in 0..RUNS as u64 {
        let next = light_stretch_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed));
        if next["a"][0].person_id.as_ref() == Some(&learner_id) {
            learner_wins += 1;
        }
    }

    // Binomial(300, 0.35) — mean 105, sd ~8. Anything inside 60..150
    // is consistent; outside it the coin is broken.
    assert!(
        (60..=150).contains(&learner_wins),
        "learner won {learner_wins}/{RUNS} passes, expected ~35%"
    );
}

/// When every candidate is an expert the stretch branch has nobody to
/// pick and must fall back to strongest-first.
#[test]
fn light_stretch_falls_back_when_no_sub_experts() {
    let roster = Roster::from_people(vec![
        person("E1", &[("a", SkillLevel::Expert)]),
        person("E2", &[("a", SkillLevel::Expert)]),
    ]);
    let fx = Fixture::new(vec![AreaConfig::new("a", "A", 1, 2)], roster);
    let slots = empty_slots(&[("a", 2)]);

    for seed in 0..20u64 {
        let next = light_stretch_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed));
        assert_eq!(seated(&next).len(), 2, "both experts seated (seed {seed})");
    }
}

/// Randomize must actually vary: with two interchangeable people and
/// one slot, both should win sometimes across seeds.
#[test]
fn randomize_varies_across_seeds() {
    let roster = Roster::from_people(vec![
        person("P1", &[("a", SkillLevel::Trained)]),
        person("P2", &[("a", SkillLevel::Trained)]),
    ]);
    let fx = Fixture::new(vec![AreaConfig::new("a", "A", 1, 1)], roster);
    let slots = empty_slots(&[("a", 1)]);

    let mut winners: Vec<String> = Vec::new();
    for seed in 0..40u64 {
        let next = randomize_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed));
        winners.extend(next["a"][0].person_id.clone());
    }
    winners.sort();
    winners.dedup();
    assert_eq!(winners.len(), 2, "both candidates should win at least once");
}

/// Spread-talent still picks by skill; the shuffle only breaks ties.
#[test]
fn spread_talent_prefers_skill_over_shuffle() {
    let roster = Roster::from_people(vec![
        person("Strong", &[("a", SkillLevel::Expert)]),
        person("Weak", &[("a", SkillLevel::Training)]),
    ]);
    let fx = Fixture::new(vec![AreaConfig::new("a", "A", 1, 1)], roster);
    let strong_id = id_of(&fx.roster, "Strong");
    let slots = empty_slots(&[("a", 1)]);

    for seed in 0..20u64 {
        let next = spread_talent_assignments(&fx.ctx(), &slots, &mut LineRng::seeded(seed));
        assert_eq!(
            next["a"][0].person_id,
            Some(strong_id.clone()),
            "expert must win regardless of shuffle (seed {seed})"
        );
    }
}

/// An effective-capacity override below the current slot count bounds
/// how many positions the fill may use.
#[test]
fn capacity_override_bounds_fill() {
    let roster = Roster::from_people(vec![
        person("P1", &[]),
        person("P2", &[]),
        person("P3", &[]),
    ]);
    let mut fx = Fixture::new(vec![AreaConfig::new("a", "A", 1, 3)], roster);
    fx.overrides.insert(
        "a".to_string(),
        linecrew_core::config::CapacityOverride { min: Some(1), max: Some(2) },
    );
    let slots = empty_slots(&[("a", 3)]);

    let next = max_speed_assignments(&fx.ctx(), &slots);
    assert_eq!(seated(&next).len(), 2, "fill never exceeds effective max");
    assert!(next["a"][2].person_id.is_none());
}

#[test]
fn missing_priority_reads_neutral() {
    let roster = Roster::from_people(vec![person("Solo", &[])]);
    let mut fx = Fixture::new(
        vec![AreaConfig::new("a", "A", 1, 1), AreaConfig::new("b", "B", 1, 1)],
        roster,
    );
    // Only b carries a priority entry; a defaults to neutral and, being
    // first in area order, wins the single person.
    fx.priorities.insert("b".to_string(), AreaPriority::Neutral);
    let slots = empty_slots(&[("a", 1), ("b", 1)]);

    let next = max_speed_assignments(&fx.ctx(), &slots);
    assert!(next["a"][0].person_id.is_some());
    assert!(next["b"][0].person_id.is_none());
}
