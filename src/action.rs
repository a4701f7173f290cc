//! # Action Module
//!
//! Actions are the edges of the planner's state space. Each action is a
//! precondition over a [`WorldState`] plus an effect that produces the
//! successor state. Both are parameterized by a [`Binding`]: the acting agent,
//! the agent it acts upon, and a location drawn from the scenario's
//! admissible locations.
//!
//! ## Custom Actions
//!
//! Implement [`Action`] directly, or wrap two closures in a [`FnAction`]:
//!
//! ```
//! use strips_rs::{Action, Binding, FnAction, Health, WorldState};
//!
//! let peek = FnAction::new(
//!     "Peek_Out",
//!     |state: &WorldState, b: &Binding<'_>| state.in_cover(b.actor) == Some(true),
//!     |state: &mut WorldState, b: &Binding<'_>| {
//!         state.set_in_cover(b.actor, false);
//!     },
//! );
//!
//! let state = WorldState::new()
//!     .with_agent("npc", Health::Full, "loc1", true, 0)
//!     .with_agent("player", Health::Full, "loc2", false, 0);
//! let binding = Binding::new("npc", "player", "loc1");
//!
//! assert!(peek.is_applicable(&state, &binding));
//! let next = peek.apply(&state, &binding);
//! assert_eq!(next.in_cover("npc"), Some(false));
//! assert_eq!(state.in_cover("npc"), Some(true));
//! ```

use std::fmt;

use crate::WorldState;

/// The parameters an action is applied with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a> {
    /// The agent performing the action
    pub actor: &'a str,
    /// The agent the action is directed at
    pub target: &'a str,
    /// The location argument (a destination for movement, ignored by most actions)
    pub location: &'a str,
}

impl<'a> Binding<'a> {
    pub fn new(actor: &'a str, target: &'a str, location: &'a str) -> Self {
        Self {
            actor,
            target,
            location,
        }
    }
}

/// A planner action: a precondition gate and an effect.
///
/// `effect` must only be called when `is_applicable` holds for the same state
/// and binding. Implementations are stateless and may be shared freely.
pub trait Action: Send + Sync {
    /// Stable name used to identify the action in a catalog and in plans.
    fn name(&self) -> &str;

    /// Human-readable label for one application of the action.
    ///
    /// Actions whose outcome depends on the location embed it, e.g.
    /// `"Move_To: loc2"`.
    fn label(&self, binding: &Binding<'_>) -> String {
        let _ = binding;
        self.name().to_string()
    }

    /// Precondition check.
    fn is_applicable(&self, state: &WorldState, binding: &Binding<'_>) -> bool;

    /// Mutates `state` into the successor.
    fn effect(&self, state: &mut WorldState, binding: &Binding<'_>);

    /// Produces the successor as a fresh value, leaving `state` untouched.
    fn apply(&self, state: &WorldState, binding: &Binding<'_>) -> WorldState {
        let mut next = state.clone();
        self.effect(&mut next, binding);
        next
    }
}

/// `FnAction` builds an [`Action`] from a precondition closure and an effect
/// closure.
pub struct FnAction<P, E> {
    name: String,
    embeds_location: bool,
    precondition: P,
    effect: E,
}

impl<P, E> FnAction<P, E>
where
    P: Fn(&WorldState, &Binding<'_>) -> bool + Send + Sync,
    E: Fn(&mut WorldState, &Binding<'_>) + Send + Sync,
{
    pub fn new(name: impl Into<String>, precondition: P, effect: E) -> Self {
        Self {
            name: name.into(),
            embeds_location: false,
            precondition,
            effect,
        }
    }

    /// Makes the label carry the location argument (`"<name>: <location>"`).
    pub fn embedding_location(mut self) -> Self {
        self.embeds_location = true;
        self
    }
}

impl<P, E> Action for FnAction<P, E>
where
    P: Fn(&WorldState, &Binding<'_>) -> bool + Send + Sync,
    E: Fn(&mut WorldState, &Binding<'_>) + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self, binding: &Binding<'_>) -> String {
        if self.embeds_location {
            format!("{}: {}", self.name, binding.location)
        } else {
            self.name.clone()
        }
    }

    fn is_applicable(&self, state: &WorldState, binding: &Binding<'_>) -> bool {
        (self.precondition)(state, binding)
    }

    fn effect(&self, state: &mut WorldState, binding: &Binding<'_>) {
        (self.effect)(state, binding)
    }
}

impl<P, E> fmt::Debug for FnAction<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAction")
            .field("name", &self.name)
            .field("embeds_location", &self.embeds_location)
            .finish_non_exhaustive()
    }
}
