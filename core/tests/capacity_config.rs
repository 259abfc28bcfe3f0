//! Capacity/override resolution and the capacity-change clamp.

use linecrew_core::config::{
    default_capacity, effective_capacity, effective_label, slot_label, AreaConfig, Capacity,
    CapacityOverride, CapacityOverrides, NameOverrides, SlotLabelOverrides,
};
use linecrew_core::slots::{apply_capacity, Slot, SlotsByArea};

fn bonding() -> AreaConfig {
    AreaConfig::new("bonding", "Bonding", 2, 4)
        .with_slot_labels(vec!["Left Bond".into(), "Right Bond".into()])
}

#[test]
fn override_wins_per_field() {
    let mut overrides = CapacityOverrides::new();
    overrides.insert("bonding".into(), CapacityOverride { min: None, max: Some(6) });

    let cap = effective_capacity(&bonding(), &overrides);
    assert_eq!(cap, Capacity { min: 2, max: 6 }, "base min kept, max overridden");
}

#[test]
fn no_override_resolves_to_base() {
    let cap = effective_capacity(&bonding(), &CapacityOverrides::new());
    assert_eq!(cap, Capacity { min: 2, max: 4 });
}

#[test]
fn min_override_above_max_raises_max() {
    let mut overrides = CapacityOverrides::new();
    overrides.insert("bonding".into(), CapacityOverride { min: Some(5), max: Some(3) });

    let cap = effective_capacity(&bonding(), &overrides);
    assert_eq!(cap, Capacity { min: 5, max: 5 }, "min is never silently violated");
}

#[test]
fn missing_capacity_defaults_to_one_slot() {
    assert_eq!(default_capacity(), Capacity { min: 1, max: 1 });
}

#[test]
fn name_override_wins_unless_blank() {
    let mut overrides = NameOverrides::new();
    overrides.insert("bonding".into(), "  Bond Cell ".into());
    assert_eq!(effective_label(&bonding(), &overrides), "Bond Cell");

    overrides.insert("bonding".into(), "  ".into());
    assert_eq!(effective_label(&bonding(), &overrides), "Bonding");
}

#[test]
fn slot_label_resolution_chain() {
    let area = bonding();
    let mut overrides = SlotLabelOverrides::new();
    overrides.insert(("bonding".into(), 1), "Center Bond".into());

    assert_eq!(slot_label(&area, 0, &overrides), "Left Bond", "default table");
    assert_eq!(slot_label(&area, 1, &overrides), "Center Bond", "per-index override");
    assert_eq!(slot_label(&area, 2, &overrides), "Slot 3", "synthesized past the table");
}

/// After any capacity change, enabled slot count sits inside [min, max].
#[test]
fn capacity_clamp_holds_through_changes() {
    let mut slots = SlotsByArea::new();
    let enabled =
        |s: &SlotsByArea| s["bonding"].iter().filter(|slot: &&Slot| !slot.disabled).count();

    apply_capacity(&mut slots, "bonding", Capacity { min: 2, max: 4 });
    assert_eq!(enabled(&slots), 2, "starts at minimum");

    apply_capacity(&mut slots, "bonding", Capacity { min: 4, max: 6 });
    assert_eq!(enabled(&slots), 4, "grows to the new minimum");

    apply_capacity(&mut slots, "bonding", Capacity { min: 1, max: 2 });
    assert_eq!(enabled(&slots), 2, "shrinks to the new maximum");
}

/// Shrinking drops empty tail slots, not disabled markers.
#[test]
fn capacity_shrink_preserves_disabled_slots() {
    let mut slots = SlotsByArea::new();
    slots.insert(
        "bonding".into(),
        vec![
            Slot::empty(),
            Slot { disabled: true, ..Slot::empty() },
            Slot::empty(),
            Slot::empty(),
        ],
    );

    apply_capacity(&mut slots, "bonding", Capacity { min: 1, max: 2 });

    let remaining = &slots["bonding"];
    assert_eq!(remaining.iter().filter(|s| !s.disabled).count(), 2);
    assert_eq!(remaining.iter().filter(|s| s.disabled).count(), 1);
}
