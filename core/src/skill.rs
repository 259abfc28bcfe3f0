//! Skill levels and break preferences.
//!
//! Skill levels form a pure total order used everywhere a candidate
//! must be ranked: no-experience < training < trained < expert.
//! Break preferences only ever act as tiebreakers — coverage decisions
//! never bend to them.

use serde::{Deserialize, Serialize};

/// How well a person knows an area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[default]
    NoExperience,
    Training,
    Trained,
    Expert,
}

impl SkillLevel {
    /// Numeric rank, 0..=3. Used for sorting and for averaging
    /// into the line-health score.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::NoExperience => 0,
            Self::Training => 1,
            Self::Trained => 2,
            Self::Expert => 3,
        }
    }

    /// Ordinal as a float, for skill-sum bookkeeping.
    pub fn score(self) -> f64 {
        self.ordinal() as f64
    }

    /// Whether this level satisfies a trained-or-expert area requirement.
    pub fn is_trained_or_expert(self) -> bool {
        matches!(self, Self::Trained | Self::Expert)
    }
}

/// A person's stated preference for when their break rotation falls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakPreference {
    PreferEarly,
    PreferMiddle,
    PreferLate,
    #[default]
    NoPreference,
}

impl BreakPreference {
    /// Processing order for the distinct-rotation regime: the most
    /// specific preferences claim their rotation first, no-preference
    /// people fill whatever is left.
    pub fn specificity(self) -> u8 {
        match self {
            Self::PreferEarly => 0,
            Self::PreferMiddle => 1,
            Self::PreferLate => 2,
            Self::NoPreference => 3,
        }
    }

    /// The rotation numbers (1-based) this preference points at, for a
    /// schedule with `rotation_count` rotations.
    ///
    /// - early  → rotation 1 only
    /// - late   → rotation N only
    /// - middle → the one (odd N) or two (even N) central rotations
    /// - none   → every rotation equally
    pub fn preferred_rotations(self, rotation_count: u8) -> Vec<u8> {
        let n = rotation_count.max(1);
        match self {
            Self::PreferEarly => vec![1],
            Self::PreferLate => vec![n],
            Self::PreferMiddle => {
                if n % 2 == 1 {
                    vec![n / 2 + 1]
                } else {
                    vec![n / 2, n / 2 + 1]
                }
            }
            Self::NoPreference => (1..=n).collect(),
        }
    }
}
