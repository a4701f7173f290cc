//! Partial-state goals.
//!
//! A [`Goal`] assigns values to any subset of the four fact categories of a
//! [`WorldState`]. A state satisfies the goal when every specified fact
//! matches; anything left unspecified is a wildcard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Health, WorldState};

/// A partial assignment over health, location, cover and grenade facts.
///
/// # Examples
///
/// ```
/// use strips_rs::{Goal, Health, WorldState};
///
/// let goal = Goal::new().health("player", Health::Dead);
///
/// let alive = WorldState::new().with_agent("player", Health::Low, "loc2", false, 0);
/// let dead = WorldState::new().with_agent("player", Health::Dead, "loc2", false, 0);
///
/// assert!(!goal.is_satisfied_by(&alive));
/// assert!(goal.is_satisfied_by(&dead));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    health: BTreeMap<String, Health>,
    #[serde(default, rename = "at", skip_serializing_if = "BTreeMap::is_empty")]
    location: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    in_cover: BTreeMap<String, bool>,
    #[serde(default, rename = "grenades", skip_serializing_if = "BTreeMap::is_empty")]
    grenade_count: BTreeMap<String, u32>,
}

impl Goal {
    /// Creates a goal with no requirements; every state satisfies it.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health(mut self, agent: impl Into<String>, health: Health) -> Self {
        self.health.insert(agent.into(), health);
        self
    }

    pub fn location(mut self, agent: impl Into<String>, location: impl Into<String>) -> Self {
        self.location.insert(agent.into(), location.into());
        self
    }

    pub fn in_cover(mut self, agent: impl Into<String>, in_cover: bool) -> Self {
        self.in_cover.insert(agent.into(), in_cover);
        self
    }

    pub fn grenades(mut self, agent: impl Into<String>, count: u32) -> Self {
        self.grenade_count.insert(agent.into(), count);
        self
    }

    /// True when every fact the goal specifies matches `state`.
    pub fn is_satisfied_by(&self, state: &WorldState) -> bool {
        self.health
            .iter()
            .all(|(agent, h)| state.health(agent) == Some(*h))
            && self
                .location
                .iter()
                .all(|(agent, loc)| state.location(agent) == Some(loc.as_str()))
            && self
                .in_cover
                .iter()
                .all(|(agent, c)| state.in_cover(agent) == Some(*c))
            && self
                .grenade_count
                .iter()
                .all(|(agent, n)| state.grenades(agent) == Some(*n))
    }

    /// Number of specified facts.
    pub fn len(&self) -> usize {
        self.health.len() + self.location.len() + self.in_cover.len() + self.grenade_count.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every agent the goal mentions, possibly with repeats.
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.health
            .keys()
            .chain(self.location.keys())
            .chain(self.in_cover.keys())
            .chain(self.grenade_count.keys())
            .map(|s| s.as_str())
    }

    /// Locations the goal requires agents to be at.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.location.values().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WorldState {
        WorldState::new()
            .with_agent("npc", Health::Full, "loc1", true, 2)
            .with_agent("player", Health::Low, "loc2", false, 0)
    }

    #[test]
    fn test_empty_goal_is_always_satisfied() {
        let goal = Goal::new();
        assert!(goal.is_empty());
        assert!(goal.is_satisfied_by(&state()));
        assert!(goal.is_satisfied_by(&WorldState::new()));
    }

    #[test]
    fn test_every_category_is_checked() {
        let base = Goal::new().health("player", Health::Low);
        assert!(base.is_satisfied_by(&state()));
        assert!(base.clone().location("npc", "loc1").is_satisfied_by(&state()));
        assert!(!base.clone().location("npc", "loc2").is_satisfied_by(&state()));
        assert!(!base.clone().in_cover("npc", false).is_satisfied_by(&state()));
        assert!(base.clone().grenades("npc", 2).is_satisfied_by(&state()));
        assert!(!base.grenades("npc", 1).is_satisfied_by(&state()));
    }

    #[test]
    fn test_missing_agent_never_matches() {
        let goal = Goal::new().in_cover("sniper", false);
        assert!(!goal.is_satisfied_by(&state()));
    }

    #[test]
    fn test_agents_and_len() {
        let goal = Goal::new()
            .health("player", Health::Dead)
            .location("npc", "loc2");
        assert_eq!(goal.len(), 2);
        let agents: Vec<_> = goal.agents().collect();
        assert_eq!(agents, ["player", "npc"]);
        assert_eq!(goal.locations().collect::<Vec<_>>(), ["loc2"]);
    }

    #[test]
    fn test_json_omits_unspecified_categories() {
        let goal = Goal::new().health("player", Health::Dead);
        let json = serde_json::to_string(&goal).unwrap();
        assert_eq!(json, r#"{"health":{"player":"dead"}}"#);
        let parsed: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, goal);
    }
}
