//! World state representation for the planner.
//!
//! A [`WorldState`] is a value snapshot of every fact the planner tracks about
//! its agents: health, location, whether the agent is in cover, and how many
//! grenades it carries. Two states are equal exactly when all four mappings
//! are equal, which is what lets the search collapse states reached through
//! different action sequences into a single node.
//!
//! # Example
//!
//! ```
//! use strips_rs::{Health, WorldState};
//!
//! let start = WorldState::new()
//!     .with_agent("npc", Health::Full, "loc1", true, 2)
//!     .with_agent("player", Health::Full, "loc2", false, 0);
//!
//! let mut moved = start.clone();
//! moved.set_location("npc", "loc2");
//!
//! assert_ne!(start, moved);
//! assert_eq!(start.location("npc"), Some("loc1"));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-valued health ladder. Health only ever moves towards [`Health::Dead`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Full,
    Low,
    Dead,
}

impl Health {
    /// One step down the ladder: full → low → dead. Dead stays dead.
    pub fn degraded(self) -> Self {
        match self {
            Health::Full => Health::Low,
            Health::Low | Health::Dead => Health::Dead,
        }
    }

    /// Returns the worse of the two levels, so applying it never heals.
    pub fn at_most(self, cap: Health) -> Self {
        self.max(cap)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Health::Full => "full",
            Health::Low => "low",
            Health::Dead => "dead",
        };
        write!(f, "{}", s)
    }
}

/// Snapshot of all tracked facts about the agents at one point of the search.
///
/// Maps are ordered so iteration, hashing and display are deterministic.
/// Identity (discovery id, predecessor, producing action) is not part of the
/// value; the [`StateGraph`](crate::StateGraph) keeps it alongside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldState {
    health: BTreeMap<String, Health>,
    #[serde(rename = "at")]
    location: BTreeMap<String, String>,
    in_cover: BTreeMap<String, bool>,
    #[serde(rename = "grenades")]
    grenade_count: BTreeMap<String, u32>,
}

impl WorldState {
    /// Creates a state that tracks no agents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state from the four mappings.
    pub fn from_maps(
        health: BTreeMap<String, Health>,
        location: BTreeMap<String, String>,
        in_cover: BTreeMap<String, bool>,
        grenade_count: BTreeMap<String, u32>,
    ) -> Self {
        Self {
            health,
            location,
            in_cover,
            grenade_count,
        }
    }

    /// Adds (or replaces) every fact about one agent.
    ///
    /// # Examples
    ///
    /// ```
    /// use strips_rs::{Health, WorldState};
    ///
    /// let state = WorldState::new().with_agent("npc", Health::Low, "loc1", false, 1);
    /// assert_eq!(state.health("npc"), Some(Health::Low));
    /// assert_eq!(state.grenades("npc"), Some(1));
    /// ```
    pub fn with_agent(
        mut self,
        agent: impl Into<String>,
        health: Health,
        location: impl Into<String>,
        in_cover: bool,
        grenades: u32,
    ) -> Self {
        let agent = agent.into();
        self.health.insert(agent.clone(), health);
        self.location.insert(agent.clone(), location.into());
        self.in_cover.insert(agent.clone(), in_cover);
        self.grenade_count.insert(agent, grenades);
        self
    }

    pub fn health(&self, agent: &str) -> Option<Health> {
        self.health.get(agent).copied()
    }

    pub fn location(&self, agent: &str) -> Option<&str> {
        self.location.get(agent).map(|s| s.as_str())
    }

    pub fn in_cover(&self, agent: &str) -> Option<bool> {
        self.in_cover.get(agent).copied()
    }

    pub fn grenades(&self, agent: &str) -> Option<u32> {
        self.grenade_count.get(agent).copied()
    }

    pub fn health_map(&self) -> &BTreeMap<String, Health> {
        &self.health
    }

    pub fn location_map(&self) -> &BTreeMap<String, String> {
        &self.location
    }

    pub fn in_cover_map(&self) -> &BTreeMap<String, bool> {
        &self.in_cover
    }

    pub fn grenade_map(&self) -> &BTreeMap<String, u32> {
        &self.grenade_count
    }

    /// Sets an agent's health. Callers that model damage should go through
    /// [`Health::degraded`] or [`Health::at_most`] so health never improves.
    pub fn set_health(&mut self, agent: &str, health: Health) {
        self.health.insert(agent.to_string(), health);
    }

    pub fn set_location(&mut self, agent: &str, location: impl Into<String>) {
        self.location.insert(agent.to_string(), location.into());
    }

    pub fn set_in_cover(&mut self, agent: &str, in_cover: bool) {
        self.in_cover.insert(agent.to_string(), in_cover);
    }

    /// Removes one grenade from the agent, never going below zero.
    pub fn spend_grenade(&mut self, agent: &str) {
        if let Some(count) = self.grenade_count.get_mut(agent) {
            *count = count.saturating_sub(1);
        }
    }

    /// Agents present in the health mapping.
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.health.keys().map(|s| s.as_str())
    }

    /// Checks that all four mappings cover the same agent set.
    pub(crate) fn agent_mismatch(&self) -> Option<String> {
        let expected: BTreeSet<&String> = self.health.keys().collect();
        let categories: [(&str, BTreeSet<&String>); 3] = [
            ("at", self.location.keys().collect()),
            ("in_cover", self.in_cover.keys().collect()),
            ("grenades", self.grenade_count.keys().collect()),
        ];
        categories
            .into_iter()
            .find(|(_, agents)| *agents != expected)
            .map(|(name, agents)| {
                format!(
                    "'{}' covers {:?} but 'health' covers {:?}",
                    name, agents, expected
                )
            })
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for agent in self.agents() {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}:", agent)?;
            if let Some(health) = self.health(agent) {
                write!(f, " {}", health)?;
            }
            if let Some(location) = self.location(agent) {
                write!(f, " @{}", location)?;
            }
            if self.in_cover(agent) == Some(true) {
                write!(f, " cover")?;
            }
            if let Some(grenades) = self.grenades(agent) {
                write!(f, " g={}", grenades)?;
            }
        }
        Ok(())
    }
}
