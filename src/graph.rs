//! The explored state graph.
//!
//! Every distinct [`WorldState`] the search discovers lives in one arena,
//! addressed by a [`StateId`] handle. Each node remembers the node it was
//! first reached from and the step that produced it, which is all plan
//! extraction needs.

use std::collections::HashMap;
use std::fmt;

use crate::{Plan, PlanStep, WorldState};

/// Handle to a node of a [`StateGraph`]. Ids are assigned in discovery order
/// starting at 0 for the start state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A discovered state together with its identity.
#[derive(Debug, Clone)]
pub struct StateNode {
    id: StateId,
    state: WorldState,
    predecessor: Option<StateId>,
    step: Option<PlanStep>,
}

impl StateNode {
    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn predecessor(&self) -> Option<StateId> {
        self.predecessor
    }

    /// The step that first produced this state; `None` for the start state.
    pub fn step(&self) -> Option<&PlanStep> {
        self.step.as_ref()
    }

    /// Trace label: producing action label and id, e.g. `"Shoot, 7"`.
    pub fn label(&self) -> String {
        let action = self.step.as_ref().map_or("None", |s| s.label.as_str());
        format!("{}, {}", action, self.id)
    }
}

/// Append-only set of distinct states with predecessor links.
///
/// De-duplication is by value: a state equal to one already present is never
/// added again, and the first predecessor to reach it is the one recorded.
#[derive(Debug, Clone)]
pub struct StateGraph {
    nodes: Vec<StateNode>,
    index: HashMap<WorldState, StateId>,
}

impl StateGraph {
    /// Creates a graph whose only node is `start`.
    pub fn new(start: WorldState) -> Self {
        let root = StateId(0);
        let mut index = HashMap::new();
        index.insert(start.clone(), root);
        Self {
            nodes: vec![StateNode {
                id: root,
                state: start,
                predecessor: None,
                step: None,
            }],
            index,
        }
    }

    /// Registers a candidate reached from `predecessor` via `step`.
    ///
    /// Returns `(true, id)` for a newly added state, or `(false, id)` of the
    /// already known equal state, in which case the candidate and its links
    /// are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use strips_rs::{Health, PlanStep, StateGraph, WorldState};
    ///
    /// let start = WorldState::new().with_agent("npc", Health::Full, "loc1", true, 0);
    /// let mut graph = StateGraph::new(start.clone());
    ///
    /// let mut exposed = start.clone();
    /// exposed.set_in_cover("npc", false);
    /// let step = PlanStep {
    ///     action: "Exit_Cover".to_string(),
    ///     location: "loc1".to_string(),
    ///     label: "Exit_Cover".to_string(),
    /// };
    ///
    /// let (is_new, id) = graph.register(exposed.clone(), graph.root(), step.clone());
    /// assert!(is_new);
    /// let (again, same) = graph.register(exposed, graph.root(), step);
    /// assert!(!again);
    /// assert_eq!(id, same);
    /// assert_eq!(graph.len(), 2);
    /// ```
    pub fn register(
        &mut self,
        state: WorldState,
        predecessor: StateId,
        step: PlanStep,
    ) -> (bool, StateId) {
        if let Some(&existing) = self.index.get(&state) {
            return (false, existing);
        }
        let id = StateId(self.nodes.len());
        self.index.insert(state.clone(), id);
        self.nodes.push(StateNode {
            id,
            state,
            predecessor: Some(predecessor),
            step: Some(step),
        });
        (true, id)
    }

    /// The start state's id.
    pub fn root(&self) -> StateId {
        StateId(0)
    }

    pub fn get(&self, id: StateId) -> Option<&StateNode> {
        self.nodes.get(id.0)
    }

    /// State stored under `id`. Ids handed out by this graph are always valid.
    pub(crate) fn state(&self, id: StateId) -> &WorldState {
        &self.nodes[id.0].state
    }

    /// Looks up a state by value.
    pub fn find(&self, state: &WorldState) -> Option<StateId> {
        self.index.get(state).copied()
    }

    pub fn predecessor_of(&self, id: StateId) -> Option<StateId> {
        self.get(id).and_then(|node| node.predecessor)
    }

    /// Walks predecessor links from `goal` back to the start and returns the
    /// producing steps in chronological order.
    pub fn backtrack(&self, goal: StateId) -> Plan {
        let mut steps = Vec::new();
        let mut current = self.get(goal);

        while let Some(node) = current {
            if let Some(step) = &node.step {
                steps.push(step.clone());
            }
            current = node.predecessor.and_then(|id| self.get(id));
        }

        steps.reverse();
        Plan::from(steps)
    }

    /// Ids on the path from the start to `goal`, start first.
    pub fn path_to(&self, goal: StateId) -> Vec<StateId> {
        let mut path = Vec::new();
        let mut current = self.get(goal).map(|n| n.id);
        while let Some(id) = current {
            path.push(id);
            current = self.predecessor_of(id);
        }
        path.reverse();
        path
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the start state is present from construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &StateNode> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Health;

    fn start() -> WorldState {
        WorldState::new()
            .with_agent("npc", Health::Full, "loc1", true, 1)
            .with_agent("player", Health::Full, "loc2", false, 0)
    }

    fn step(action: &str, location: &str) -> PlanStep {
        PlanStep {
            action: action.to_string(),
            location: location.to_string(),
            label: action.to_string(),
        }
    }

    #[test]
    fn test_root_has_no_predecessor() {
        let graph = StateGraph::new(start());
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.predecessor_of(graph.root()), None);
        assert_eq!(graph.get(graph.root()).unwrap().label(), "None, 0");
        assert!(graph.backtrack(graph.root()).is_empty());
    }

    #[test]
    fn test_registering_start_again_is_a_duplicate() {
        let mut graph = StateGraph::new(start());
        let (is_new, id) = graph.register(start(), graph.root(), step("Noop", "loc1"));
        assert!(!is_new);
        assert_eq!(id, graph.root());
        assert!(graph.get(id).unwrap().step().is_none());
    }

    #[test]
    fn test_first_predecessor_wins() {
        let mut graph = StateGraph::new(start());
        let mut a = start();
        a.set_in_cover("npc", false);
        let (_, a_id) = graph.register(a.clone(), graph.root(), step("Exit_Cover", "loc1"));

        let mut b = a.clone();
        b.set_location("npc", "loc2");
        let (_, b_id) = graph.register(b.clone(), a_id, step("Move_To", "loc2"));

        // reach `b` again from the root
        let (is_new, again) = graph.register(b, graph.root(), step("Teleport", "loc2"));
        assert!(!is_new);
        assert_eq!(again, b_id);
        assert_eq!(graph.predecessor_of(b_id), Some(a_id));
        assert_eq!(graph.get(b_id).unwrap().label(), "Move_To, 2");
    }

    #[test]
    fn test_backtrack_is_chronological() {
        let mut graph = StateGraph::new(start());
        let mut s1 = start();
        s1.set_in_cover("npc", false);
        let (_, id1) = graph.register(s1.clone(), graph.root(), step("Exit_Cover", "loc1"));
        let mut s2 = s1.clone();
        s2.set_location("npc", "loc2");
        let (_, id2) = graph.register(s2.clone(), id1, step("Move_To", "loc2"));
        let mut s3 = s2;
        s3.set_health("player", Health::Low);
        let (_, id3) = graph.register(s3.clone(), id2, step("Shoot", "loc1"));

        let plan = graph.backtrack(id3);
        let labels: Vec<_> = plan.labels().collect();
        assert_eq!(labels, ["Exit_Cover", "Move_To", "Shoot"]);
        assert_eq!(graph.path_to(id3), vec![graph.root(), id1, id2, id3]);
        assert_eq!(graph.find(&s3), Some(id3));
        assert_eq!(graph.find(&s1), Some(id1));
    }
}
