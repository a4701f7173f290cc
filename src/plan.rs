//! Plans: the chronological action sequence from start to goal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One applied action: which catalog entry, with which location argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanStep {
    /// Catalog name of the action
    pub action: String,
    /// Location argument it was bound to
    pub location: String,
    /// Human-readable label, e.g. `"Move_To: loc2"`
    pub label: String,
}

/// An ordered list of steps from the start state to a goal state.
///
/// An empty plan is ambiguous on its own: it is either "the start already
/// satisfies the goal" or "no plan exists". Check
/// [`SearchOutcome::is_success`](crate::SearchOutcome::is_success) to tell
/// the two apart.
///
/// # Examples
///
/// ```
/// use strips_rs::{Plan, PlanStep};
///
/// let plan = Plan::from(vec![
///     PlanStep {
///         action: "Exit_Cover".to_string(),
///         location: "loc1".to_string(),
///         label: "Exit_Cover".to_string(),
///     },
///     PlanStep {
///         action: "Move_To".to_string(),
///         location: "loc2".to_string(),
///         label: "Move_To: loc2".to_string(),
///     },
/// ]);
///
/// assert_eq!(plan.labels().collect::<Vec<_>>(), ["Exit_Cover", "Move_To: loc2"]);
/// assert_eq!(plan.to_string(), "Exit_Cover -> Move_To: loc2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    steps: Vec<PlanStep>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanStep> {
        self.steps.iter()
    }
}

impl From<Vec<PlanStep>> for Plan {
    fn from(steps: Vec<PlanStep>) -> Self {
        Self { steps }
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a PlanStep;
    type IntoIter = std::slice::Iter<'a, PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = self.labels().collect();
        write!(f, "{}", labels.join(" -> "))
    }
}
