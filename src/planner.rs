//! # Planner
//!
//! The planner ties a catalog of actions, a finite set of admissible
//! locations and a pair of agent roles together, and finds the shortest
//! action sequence (by count) that turns a start state into one satisfying a
//! goal.
//!
//! ## Basic Usage
//!
//! ```
//! use strips_rs::{ActionCatalog, Goal, Health, Planner, WorldState};
//!
//! let start = WorldState::new()
//!     .with_agent("npc", Health::Full, "loc1", true, 2)
//!     .with_agent("player", Health::Full, "loc2", false, 0);
//! let goal = Goal::new().health("player", Health::Dead);
//!
//! let planner = Planner::new(ActionCatalog::combat(), ["loc1", "loc2"]);
//! let outcome = planner.plan(&start, &goal).unwrap();
//!
//! assert!(outcome.is_success());
//! assert_eq!(outcome.plan().len(), 4);
//!
//! // Replaying the plan from the start reaches the goal
//! let end = planner.replay(&start, outcome.plan()).unwrap();
//! assert!(goal.is_satisfied_by(&end));
//! ```

use std::collections::HashSet;

use crate::action::Binding;
use crate::search::{self, SearchProblem};
use crate::{ActionCatalog, Goal, Plan, PlanError, Result, SearchOutcome, WorldState};

/// Default acting agent role.
pub const DEFAULT_ACTOR: &str = "npc";
/// Default target agent role.
pub const DEFAULT_TARGET: &str = "player";

/// Tuning knobs for a [`Planner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum number of distinct states, the start state included, a search
    /// may hold before it is aborted with [`PlanError::StateLimitExceeded`].
    /// `None` means unbounded.
    pub max_states: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_states: Some(1_000_000),
        }
    }
}

impl PlannerConfig {
    pub fn unbounded() -> Self {
        Self { max_states: None }
    }

    pub fn with_max_states(max_states: usize) -> Self {
        Self {
            max_states: Some(max_states),
        }
    }
}

/// Breadth-first planner over a fixed action catalog.
///
/// A planner holds no per-search state; each call to [`Planner::plan`] owns
/// its own frontier and state graph.
#[derive(Debug)]
pub struct Planner {
    catalog: ActionCatalog,
    locations: Vec<String>,
    actor: String,
    target: String,
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner with the default roles (`npc` acting on `player`)
    /// and the default configuration.
    pub fn new<I, S>(catalog: ActionCatalog, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            catalog,
            locations: locations.into_iter().map(Into::into).collect(),
            actor: DEFAULT_ACTOR.to_string(),
            target: DEFAULT_TARGET.to_string(),
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets which agent acts and which agent is acted upon.
    pub fn with_roles(mut self, actor: impl Into<String>, target: impl Into<String>) -> Self {
        self.actor = actor.into();
        self.target = target.into();
        self
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Searches for a shortest plan from `start` to a state satisfying `goal`.
    ///
    /// An unreachable goal is not an error: the outcome reports
    /// `is_success() == false`, an empty plan and the full explored graph.
    ///
    /// # Errors
    ///
    /// * Scenario errors ([`PlanError::UnknownAgent`], [`PlanError::InvalidRoles`],
    ///   [`PlanError::InconsistentAgents`], [`PlanError::UnknownLocation`],
    ///   [`PlanError::NoLocations`], [`PlanError::DuplicateLocation`]) before
    ///   any search happens.
    /// * [`PlanError::StateLimitExceeded`] if the configured cap is hit.
    pub fn plan(&self, start: &WorldState, goal: &Goal) -> Result<SearchOutcome> {
        self.validate(start, goal)?;
        log::debug!(
            "Planning from [{}] with {} actions over {} locations",
            start,
            self.catalog.len(),
            self.locations.len()
        );

        search::breadth_first(&SearchProblem {
            start,
            goal,
            locations: &self.locations,
            catalog: &self.catalog,
            actor: &self.actor,
            target: &self.target,
            max_states: self.config.max_states,
        })
    }

    /// Re-applies every step of `plan` from `start`, checking preconditions,
    /// and returns the final state.
    ///
    /// # Errors
    ///
    /// [`PlanError::UnknownAction`] if a step names an action missing from the
    /// catalog, [`PlanError::PreconditionNotMet`] if a step is not applicable
    /// when its turn comes.
    pub fn replay(&self, start: &WorldState, plan: &Plan) -> Result<WorldState> {
        let mut state = start.clone();
        for step in plan {
            let action = self
                .catalog
                .get(&step.action)
                .ok_or_else(|| PlanError::UnknownAction(step.action.clone()))?;
            let binding = Binding::new(&self.actor, &self.target, &step.location);
            if !action.is_applicable(&state, &binding) {
                return Err(PlanError::PreconditionNotMet(step.label.clone()));
            }
            state = action.apply(&state, &binding);
        }
        Ok(state)
    }

    fn validate(&self, start: &WorldState, goal: &Goal) -> Result<()> {
        if self.locations.is_empty() {
            return Err(PlanError::NoLocations);
        }
        let mut seen = HashSet::new();
        for location in &self.locations {
            if !seen.insert(location.as_str()) {
                return Err(PlanError::DuplicateLocation(location.clone()));
            }
        }

        if let Some(mismatch) = start.agent_mismatch() {
            return Err(PlanError::InconsistentAgents(mismatch));
        }

        if self.actor == self.target {
            return Err(PlanError::InvalidRoles(format!("{} acts on itself", self.actor)));
        }

        let known = |agent: &str| start.health(agent).is_some();
        for agent in [self.actor.as_str(), self.target.as_str()]
            .into_iter()
            .chain(goal.agents())
        {
            if !known(agent) {
                return Err(PlanError::UnknownAgent(agent.to_string()));
            }
        }

        let occupied = start.location_map().values().map(|s| s.as_str());
        for location in occupied.chain(goal.locations()) {
            if !seen.contains(location) {
                return Err(PlanError::UnknownLocation(location.to_string()));
            }
        }

        Ok(())
    }
}
