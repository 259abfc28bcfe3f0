//! line-runner: headless staffing runner.
//!
//! Usage:
//!   line-runner --seed 12345 --algorithm spread_talent
//!   line-runner --algorithm max_speed --rotations 4 --line-wide
//!
//! Builds a demo roster and line configuration, runs one automated
//! assignment pass, regenerates the break schedule, and prints the
//! resulting staffing, warnings, and line-health score.

use anyhow::{bail, Result};
use linecrew_core::{
    assignment::{
        light_stretch_assignments, max_speed_assignments, randomize_assignments,
        spread_talent_assignments, AreaPriorities, AreaPriority, AssignmentContext,
    },
    break_schedule::generate_break_schedule,
    config::{
        effective_capacity, slot_label, AreaConfig, CapacityOverrides, LeadRoleConfig, LineConfig,
        RotationConfig, RotationScope, SlotLabelOverrides,
    },
    health::line_health_score,
    report::{rotation_coverage_warnings, staffing_warnings},
    rng::LineRng,
    roster::{Person, Roster},
    skill::{BreakPreference, SkillLevel},
    slots::{apply_capacity, LeadAssignments, SlotsByArea},
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed: Option<u64> = args
        .windows(2)
        .find(|w| w[0] == "--seed")
        .and_then(|w| w[1].parse().ok());
    let algorithm = args
        .windows(2)
        .find(|w| w[0] == "--algorithm")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "spread_talent".to_string());
    let rotations: u8 = args
        .windows(2)
        .find(|w| w[0] == "--rotations")
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(3);
    let line_wide = args.iter().any(|a| a == "--line-wide");

    let config = demo_config(rotations, line_wide)?;
    let roster = demo_roster();
    let mut slots = SlotsByArea::new();
    for area in &config.areas {
        apply_capacity(&mut slots, &area.id, effective_capacity(area, &CapacityOverrides::new()));
    }

    let mut leads = LeadAssignments::new();
    let lead_id = roster
        .iter()
        .find(|p| p.lead)
        .map(|p| p.id.clone());
    leads.insert("line_lead".to_string(), lead_id);

    let overrides = CapacityOverrides::new();
    let priorities = AreaPriorities::from([("packout".to_string(), AreaPriority::DeJuiced)]);
    let ctx = AssignmentContext {
        roster: &roster,
        config: &config,
        capacity_overrides: &overrides,
        priorities: &priorities,
        leads: &leads,
    };

    let mut rng = match seed {
        Some(s) => LineRng::seeded(s),
        None => LineRng::from_entropy(),
    };

    let assigned = match algorithm.as_str() {
        "randomize" => randomize_assignments(&ctx, &slots, &mut rng),
        "spread_talent" => spread_talent_assignments(&ctx, &slots, &mut rng),
        "max_speed" => max_speed_assignments(&ctx, &slots),
        "light_stretch" => light_stretch_assignments(&ctx, &slots, &mut rng),
        other => bail!("unknown algorithm '{other}'"),
    };
    slots = assigned;
    log::info!("assignment pass complete ({algorithm})");

    let scope = config.rotation.scope;
    let schedule =
        generate_break_schedule(&roster, &slots, &leads, &config, config.rotation.rotation_count, scope);

    println!("line-runner — {algorithm}");
    println!();
    let label_overrides = SlotLabelOverrides::new();
    for area in &config.areas {
        println!("[{}]", area.name);
        if let Some(area_slots) = slots.get(&area.id) {
            for (i, slot) in area_slots.iter().enumerate() {
                let name = slot
                    .person_id
                    .as_ref()
                    .and_then(|pid| roster.get(pid))
                    .map(|p| p.name.as_str())
                    .unwrap_or("—");
                println!("  {:<12} {}", slot_label(area, i, &label_overrides), name);
            }
        }
    }

    println!();
    println!("break schedule ({rotations} rotations):");
    let mut scope_keys: Vec<&String> = schedule.keys().collect();
    scope_keys.sort();
    for key in scope_keys {
        println!("  [{key}]");
        let mut entries: Vec<_> = schedule[key].iter().collect();
        entries.sort_by_key(|(_, a)| a.break_rotation);
        for (pid, a) in entries {
            let name = roster.get(pid).map(|p| p.name.as_str()).unwrap_or(pid.as_str());
            println!("    rotation {}: {}", a.break_rotation, name);
        }
    }

    println!();
    for w in staffing_warnings(&roster, &slots, &config, &overrides) {
        println!("warning: {}", serde_json::to_string(&w)?);
    }
    for w in rotation_coverage_warnings(&schedule, config.rotation.rotation_count) {
        println!("warning: {}", serde_json::to_string(&w)?);
    }

    match line_health_score(&roster, &slots, &leads, &config) {
        Some(score) => println!("line health: {score:.2} / 3.00"),
        None => println!("line health: n/a (nobody assigned)"),
    }

    Ok(())
}

fn demo_config(rotations: u8, line_wide: bool) -> Result<LineConfig> {
    let rotation = RotationConfig {
        enabled: true,
        rotation_count: rotations,
        scope: if line_wide { RotationScope::LineWide } else { RotationScope::PerArea },
    };
    let config = LineConfig::new(
        vec![
            AreaConfig::new("bonding", "Bonding", 2, 3)
                .requiring_trained()
                .with_slot_labels(vec!["Left Bond".into(), "Right Bond".into()]),
            AreaConfig::new("inspection", "Inspection", 1, 2).requiring_trained(),
            AreaConfig::new("packout", "Packout", 1, 2),
        ],
        vec![LeadRoleConfig {
            key: "line_lead".into(),
            label: "Line Lead".into(),
            area_id: "bonding".into(),
        }],
        rotation,
    )?;
    Ok(config)
}

fn demo_roster() -> Roster {
    let mut maria = Person::new("Maria")
        .with_skill("bonding", SkillLevel::Expert)
        .with_skill("inspection", SkillLevel::Trained);
    maria.lead = true;

    let sam = Person::new("Sam")
        .with_skill("bonding", SkillLevel::Trained)
        .with_skill("packout", SkillLevel::Expert);
    let mut lee = Person::new("Lee")
        .with_skill("inspection", SkillLevel::Expert)
        .with_skill("bonding", SkillLevel::Training);
    lee.break_preference = BreakPreference::PreferEarly;
    let mut kim = Person::new("Kim")
        .with_skill("bonding", SkillLevel::Trained)
        .wanting_to_learn("inspection");
    kim.break_preference = BreakPreference::PreferLate;
    let jo = Person::new("Jo")
        .with_skill("packout", SkillLevel::Training)
        .wanting_to_learn("bonding");
    let mut pat = Person::new("Pat").with_skill("packout", SkillLevel::Trained);
    pat.overtime = true;
    pat.overtime_here_today = true;

    Roster::from_people(vec![maria, sam, lee, kim, jo, pat])
}
