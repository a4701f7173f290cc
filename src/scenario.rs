//! Scenario definitions.
//!
//! A [`Scenario`] bundles what a search is invoked with: the start state, the
//! goal, the admissible locations and the two agent roles. Scenarios are plain
//! data and round-trip through JSON, so they can live outside the code that
//! runs them. The action catalog is code and is supplied separately.
//!
//! ```
//! use strips_rs::{ActionCatalog, Scenario};
//!
//! let json = r#"{
//!     "start": {
//!         "health": {"npc": "full", "player": "low"},
//!         "at": {"npc": "loc2", "player": "loc2"},
//!         "in_cover": {"npc": false, "player": false},
//!         "grenades": {"npc": 0, "player": 0}
//!     },
//!     "goal": {"health": {"player": "dead"}},
//!     "locations": ["loc1", "loc2"]
//! }"#;
//!
//! let scenario = Scenario::from_json(json).unwrap();
//! let outcome = scenario.solve(ActionCatalog::combat()).unwrap();
//! assert_eq!(outcome.plan().to_string(), "Shoot");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::planner::{DEFAULT_ACTOR, DEFAULT_TARGET};
use crate::{
    ActionCatalog, Goal, Health, Planner, PlannerConfig, Result, SearchOutcome, WorldState,
};

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

/// Inputs of one planning problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub start: WorldState,
    pub goal: Goal,
    pub locations: Vec<String>,
    #[serde(default = "default_actor")]
    pub actor: String,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_states: Option<usize>,
}

impl Scenario {
    /// The sample ambush: an NPC in cover at `loc1` with two grenades, an
    /// exposed player at `loc2`, and the goal of killing the player.
    pub fn ambush() -> Self {
        Self {
            start: WorldState::new()
                .with_agent("npc", Health::Full, "loc1", true, 2)
                .with_agent("player", Health::Full, "loc2", false, 0),
            goal: Goal::new().health("player", Health::Dead),
            locations: vec!["loc1".to_string(), "loc2".to_string()],
            actor: default_actor(),
            target: default_target(),
            max_states: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Builds a planner for this scenario's locations and roles. The state cap
    /// overrides the default configuration when present.
    pub fn planner(&self, catalog: ActionCatalog) -> Planner {
        let config = match self.max_states {
            Some(limit) => PlannerConfig::with_max_states(limit),
            None => PlannerConfig::default(),
        };
        Planner::new(catalog, self.locations.iter().cloned())
            .with_roles(self.actor.clone(), self.target.clone())
            .with_config(config)
    }

    /// Plans this scenario with the given catalog.
    pub fn solve(&self, catalog: ActionCatalog) -> Result<SearchOutcome> {
        self.planner(catalog).plan(&self.start, &self.goal)
    }
}
