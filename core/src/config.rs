//! Line configuration and the capacity/config resolver.
//!
//! Base configuration (areas, lead roles, rotation settings) comes from
//! the line-setup layer and is treated as read-only here. Supervisors
//! tweak a line through sparse override maps — capacity, display name,
//! per-slot labels — which are resolved at read time and never written
//! back into the base config.

use crate::error::{LineError, LineResult};
use crate::types::{AreaId, LeadRoleId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MIN_ROTATIONS: u8 = 1;
pub const MAX_ROTATIONS: u8 = 6;

// ── Base configuration ───────────────────────────────────────────────────────

/// One work area on the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaConfig {
    pub id: AreaId,
    pub name: String,
    pub min_slots: usize,
    pub max_slots: usize,
    /// When set, the area must be staffed by at least one trained-or-expert
    /// person and no-experience people are never auto-assigned into it.
    #[serde(default)]
    pub requires_trained: bool,
    /// Positional names for the area's slots (e.g. "Left Bond", "Right Bond").
    /// Slots past the end of this table fall back to "Slot N".
    #[serde(default)]
    pub default_slot_labels: Vec<String>,
}

impl AreaConfig {
    pub fn new(id: impl Into<AreaId>, name: impl Into<String>, min_slots: usize, max_slots: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            min_slots,
            max_slots,
            requires_trained: false,
            default_slot_labels: Vec::new(),
        }
    }

    pub fn requiring_trained(mut self) -> Self {
        self.requires_trained = true;
        self
    }

    pub fn with_slot_labels(mut self, labels: Vec<String>) -> Self {
        self.default_slot_labels = labels;
        self
    }
}

/// A lead role is staffed outside area slots but still belongs to an
/// area for knowledge-score purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRoleConfig {
    pub key: LeadRoleId,
    pub label: String,
    pub area_id: AreaId,
}

/// Whether break rotations pool the whole line or run per area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationScope {
    #[default]
    PerArea,
    LineWide,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    pub enabled: bool,
    pub rotation_count: u8,
    pub scope: RotationScope,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rotation_count: 3,
            scope: RotationScope::PerArea,
        }
    }
}

/// The full static configuration for one line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    /// Ordered: area position here is the tiebreak order everywhere
    /// the engines walk areas.
    pub areas: Vec<AreaConfig>,
    #[serde(default)]
    pub lead_roles: Vec<LeadRoleConfig>,
    #[serde(default)]
    pub rotation: RotationConfig,
}

impl LineConfig {
    pub fn new(areas: Vec<AreaConfig>, lead_roles: Vec<LeadRoleConfig>, rotation: RotationConfig) -> LineResult<Self> {
        let config = Self { areas, lead_roles, rotation };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LineResult<()> {
        let mut seen: Vec<&str> = Vec::new();
        for area in &self.areas {
            if area.min_slots == 0 || area.min_slots > area.max_slots {
                return Err(LineError::InvalidCapacity {
                    area: area.id.clone(),
                    min: area.min_slots,
                    max: area.max_slots,
                });
            }
            if seen.contains(&area.id.as_str()) {
                return Err(LineError::DuplicateArea { area: area.id.clone() });
            }
            seen.push(&area.id);
        }
        for role in &self.lead_roles {
            if self.area(&role.area_id).is_none() {
                return Err(LineError::UnknownArea { area: role.area_id.clone() });
            }
        }
        let n = self.rotation.rotation_count;
        if !(MIN_ROTATIONS..=MAX_ROTATIONS).contains(&n) {
            return Err(LineError::InvalidRotationCount { count: n });
        }
        Ok(())
    }

    pub fn area(&self, area_id: &str) -> Option<&AreaConfig> {
        self.areas.iter().find(|a| a.id == area_id)
    }

    pub fn area_ids(&self) -> impl Iterator<Item = &AreaId> {
        self.areas.iter().map(|a| &a.id)
    }
}

// ── Overrides ────────────────────────────────────────────────────────────────

/// Sparse per-area capacity override. A None field keeps the base value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CapacityOverride {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

pub type CapacityOverrides = HashMap<AreaId, CapacityOverride>;
pub type NameOverrides = HashMap<AreaId, String>;
/// Keyed by (area id, zero-based slot index).
pub type SlotLabelOverrides = HashMap<(AreaId, usize), String>;

/// A resolved min/max pair. Invariant: min <= max, min >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub min: usize,
    pub max: usize,
}

// ── Resolver ─────────────────────────────────────────────────────────────────

/// Resolve an area's effective capacity. Override wins per field; if the
/// resolved min exceeds the resolved max, max is raised to min rather
/// than silently violating the minimum.
pub fn effective_capacity(area: &AreaConfig, overrides: &CapacityOverrides) -> Capacity {
    let ov = overrides.get(&area.id).copied().unwrap_or_default();
    let min = ov.min.unwrap_or(area.min_slots).max(1);
    let max = ov.max.unwrap_or(area.max_slots);
    Capacity { min, max: max.max(min) }
}

/// Capacity for an area id the config doesn't know: one slot.
pub fn default_capacity() -> Capacity {
    Capacity { min: 1, max: 1 }
}

/// Resolve an area's display name. A blank override (after trim) is
/// treated as absent.
pub fn effective_label(area: &AreaConfig, overrides: &NameOverrides) -> String {
    match overrides.get(&area.id) {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => area.name.clone(),
    }
}

/// Resolve the label for one slot position within an area.
/// Per-index override wins, then the area's default label table,
/// then a synthesized 1-based "Slot N".
pub fn slot_label(area: &AreaConfig, index: usize, overrides: &SlotLabelOverrides) -> String {
    if let Some(label) = overrides.get(&(area.id.clone(), index)) {
        if !label.trim().is_empty() {
            return label.trim().to_string();
        }
    }
    if let Some(label) = area.default_slot_labels.get(index) {
        return label.clone();
    }
    format!("Slot {}", index + 1)
}
