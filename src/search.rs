//! Breadth-first state-space search.
//!
//! The frontier is a FIFO queue of discovered but unexpanded states, so states
//! are expanded in non-decreasing distance from the start and the first goal
//! match is a shortest plan by action count. When several shortest plans
//! exist, the one returned is decided by expansion order: locations in the
//! order given, then catalog order, with the first predecessor to reach a
//! state kept.

use std::collections::VecDeque;

use crate::action::Binding;
use crate::graph::{StateGraph, StateId};
use crate::{ActionCatalog, Goal, PlanError, Plan, PlanStep, Result, WorldState};

/// Everything one search run needs, already validated.
pub(crate) struct SearchProblem<'a> {
    pub start: &'a WorldState,
    pub goal: &'a Goal,
    pub locations: &'a [String],
    pub catalog: &'a ActionCatalog,
    pub actor: &'a str,
    pub target: &'a str,
    pub max_states: Option<usize>,
}

/// Result of a completed search.
///
/// Always carries the explored [`StateGraph`]. A failed search (goal
/// unreachable) has an empty plan and no goal state; the graph then holds the
/// full reachable closure of the start state.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    plan: Plan,
    graph: StateGraph,
    goal: Option<StateId>,
    iterations: usize,
}

impl SearchOutcome {
    /// True when a goal-satisfying state was reached. A zero-length plan is a
    /// success when the start state already satisfies the goal.
    pub fn is_success(&self) -> bool {
        self.goal.is_some()
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// Id of the goal-satisfying state that ended the search.
    pub fn goal_id(&self) -> Option<StateId> {
        self.goal
    }

    pub fn goal_state(&self) -> Option<&WorldState> {
        self.goal.map(|id| self.graph.state(id))
    }

    /// Number of loop iterations, counting the one that matched the goal.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of distinct states discovered, the start state included.
    pub fn states_discovered(&self) -> usize {
        self.graph.len()
    }

    pub fn into_parts(self) -> (Plan, StateGraph) {
        (self.plan, self.graph)
    }
}

struct SearchContext {
    graph: StateGraph,
    frontier: VecDeque<StateId>,
    iterations: usize,
}

impl SearchContext {
    fn new(start: &WorldState) -> Self {
        let graph = StateGraph::new(start.clone());
        let mut frontier = VecDeque::new();
        frontier.push_back(graph.root());
        Self {
            graph,
            frontier,
            iterations: 0,
        }
    }

    fn check_limit(&self, problem: &SearchProblem<'_>) -> Result<()> {
        match problem.max_states {
            Some(limit) if self.graph.len() > limit => {
                log::warn!(
                    "Aborting search: {} states exceed the limit of {}",
                    self.graph.len(),
                    limit
                );
                Err(PlanError::StateLimitExceeded {
                    limit,
                    discovered: self.graph.len(),
                    iterations: self.iterations,
                })
            }
            _ => Ok(()),
        }
    }

    fn successors(
        &self,
        current: StateId,
        problem: &SearchProblem<'_>,
    ) -> Vec<(WorldState, PlanStep)> {
        let state = self.graph.state(current);
        let mut successors = Vec::new();

        for location in problem.locations {
            let binding = Binding::new(problem.actor, problem.target, location);
            for action in problem.catalog.iter() {
                if !action.is_applicable(state, &binding) {
                    continue;
                }
                let step = PlanStep {
                    action: action.name().to_string(),
                    location: location.clone(),
                    label: action.label(&binding),
                };
                successors.push((action.apply(state, &binding), step));
            }
        }

        successors
    }

    fn expand(&mut self, current: StateId, problem: &SearchProblem<'_>) -> Result<()> {
        for (candidate, step) in self.successors(current, problem) {
            let (is_new, id) = self.graph.register(candidate, current, step);
            if !is_new {
                continue;
            }
            log::debug!(
                "Discovered state {}",
                self.graph.get(id).map(|n| n.label()).unwrap_or_default()
            );

            self.check_limit(problem)?;
            self.frontier.push_back(id);
        }
        Ok(())
    }

    fn finish(self, goal: Option<StateId>) -> SearchOutcome {
        let plan = goal.map(|id| self.graph.backtrack(id)).unwrap_or_default();
        SearchOutcome {
            plan,
            graph: self.graph,
            goal,
            iterations: self.iterations,
        }
    }
}

/// Runs the search to completion.
///
/// # Errors
///
/// Returns [`PlanError::StateLimitExceeded`] when `max_states` is set and the
/// search discovers more states than it allows. The start state counts.
pub(crate) fn breadth_first(problem: &SearchProblem<'_>) -> Result<SearchOutcome> {
    let mut context = SearchContext::new(problem.start);
    context.check_limit(problem)?;

    while let Some(&current) = context.frontier.front() {
        context.iterations += 1;

        if problem.goal.is_satisfied_by(context.graph.state(current)) {
            let outcome = context.finish(Some(current));
            log::info!(
                "Found goal: {} states discovered in {} iterations, plan of {} steps",
                outcome.states_discovered(),
                outcome.iterations(),
                outcome.plan().len()
            );
            return Ok(outcome);
        }

        log::debug!(
            "Expanding state {}",
            context.graph.get(current).map(|n| n.label()).unwrap_or_default()
        );
        context.expand(current, problem)?;
        context.frontier.pop_front();
    }

    let outcome = context.finish(None);
    log::info!(
        "Frontier exhausted without reaching the goal: {} states discovered in {} iterations",
        outcome.states_discovered(),
        outcome.iterations()
    );
    Ok(outcome)
}
