//! The roster: everyone who can be staffed onto the line.
//!
//! Fields the UI leaves unset arrive as their documented defaults
//! (no-preference, not overtime, no skills) rather than as optionals
//! threaded through every read site.

use crate::error::{LineError, LineResult};
use crate::skill::{BreakPreference, SkillLevel};
use crate::types::{AreaId, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub absent: bool,
    #[serde(default)]
    pub lead: bool,
    #[serde(default)]
    pub overtime: bool,
    #[serde(default)]
    pub overtime_here_today: bool,
    #[serde(default)]
    pub late: bool,
    #[serde(default)]
    pub leaving_early: bool,
    #[serde(default)]
    pub break_preference: BreakPreference,
    #[serde(default)]
    pub skills: HashMap<AreaId, SkillLevel>,
    #[serde(default)]
    pub areas_want_to_learn: HashSet<AreaId>,
}

impl Person {
    /// A fresh person with a minted id and every flag at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            absent: false,
            lead: false,
            overtime: false,
            overtime_here_today: false,
            late: false,
            leaving_early: false,
            break_preference: BreakPreference::NoPreference,
            skills: HashMap::new(),
            areas_want_to_learn: HashSet::new(),
        }
    }

    pub fn with_skill(mut self, area: impl Into<AreaId>, level: SkillLevel) -> Self {
        self.skills.insert(area.into(), level);
        self
    }

    pub fn wanting_to_learn(mut self, area: impl Into<AreaId>) -> Self {
        self.areas_want_to_learn.insert(area.into());
        self
    }

    /// Skill in an area; an unrecorded area reads as no-experience.
    pub fn skill_in(&self, area: &str) -> SkillLevel {
        self.skills.get(area).copied().unwrap_or_default()
    }

    /// Whether automation may seat this person at all today.
    /// Overtime people only count when marked here-today; absent
    /// people never do.
    pub fn available_for_assignment(&self) -> bool {
        !self.absent && (!self.overtime || self.overtime_here_today)
    }
}

/// The ordered list of people on one line's roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_people(people: Vec<Person>) -> Self {
        Self { people }
    }

    pub fn add(&mut self, person: Person) -> PersonId {
        let id = person.id.clone();
        self.people.push(person);
        id
    }

    pub fn get(&self, person_id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == person_id)
    }

    /// Replace the record whose id matches `person.id`, keeping roster
    /// order. Edits arrive from the caller as whole records.
    pub fn update(&mut self, person: Person) -> LineResult<()> {
        match self.people.iter_mut().find(|p| p.id == person.id) {
            Some(existing) => {
                *existing = person;
                Ok(())
            }
            None => Err(LineError::UnknownPerson { person: person.id }),
        }
    }

    /// Remove a person from the roster. The caller must also clear any
    /// slot or lead assignment; `LineSnapshot::remove_person` does both.
    pub fn remove(&mut self, person_id: &str) -> Option<Person> {
        let idx = self.people.iter().position(|p| p.id == person_id)?;
        Some(self.people.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Skill in `area` for a person id, defaulting to no-experience
    /// when the id is unknown or the skill unrecorded.
    pub fn skill_of(&self, person_id: &str, area: &str) -> SkillLevel {
        self.get(person_id)
            .map(|p| p.skill_in(area))
            .unwrap_or_default()
    }
}
