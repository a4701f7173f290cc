//! Ordered action catalogs and the built-in combat actions.
//!
//! Catalog order matters: the search expands actions in this order, so it
//! decides which of several equally short plans is returned.

use std::fmt;

use crate::action::{Action, Binding};
use crate::{Health, PlanError, Result, WorldState};

/// Leave cover. Applicable while the actor is in cover.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCover;

impl Action for ExitCover {
    fn name(&self) -> &str {
        "Exit_Cover"
    }

    fn is_applicable(&self, state: &WorldState, b: &Binding<'_>) -> bool {
        state.in_cover(b.actor) == Some(true)
    }

    fn effect(&self, state: &mut WorldState, b: &Binding<'_>) {
        state.set_in_cover(b.actor, false);
    }
}

/// Enter cover. Applicable while the actor is exposed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeCover;

impl Action for TakeCover {
    fn name(&self) -> &str {
        "Take_Cover"
    }

    fn is_applicable(&self, state: &WorldState, b: &Binding<'_>) -> bool {
        state.in_cover(b.actor) == Some(false)
    }

    fn effect(&self, state: &mut WorldState, b: &Binding<'_>) {
        state.set_in_cover(b.actor, true);
    }
}

/// Shoot the target; requires sharing its location. Cover does not matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shoot;

impl Action for Shoot {
    fn name(&self) -> &str {
        "Shoot"
    }

    fn is_applicable(&self, state: &WorldState, b: &Binding<'_>) -> bool {
        match (state.location(b.actor), state.location(b.target)) {
            (Some(here), Some(there)) => here == there,
            _ => false,
        }
    }

    fn effect(&self, state: &mut WorldState, b: &Binding<'_>) {
        if let Some(health) = state.health(b.target) {
            state.set_health(b.target, health.degraded());
        }
    }
}

/// Walk to the bound location. The actor must be out of cover and elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveTo;

impl Action for MoveTo {
    fn name(&self) -> &str {
        "Move_To"
    }

    fn label(&self, b: &Binding<'_>) -> String {
        format!("Move_To: {}", b.location)
    }

    fn is_applicable(&self, state: &WorldState, b: &Binding<'_>) -> bool {
        state.in_cover(b.actor) == Some(false)
            && state.location(b.actor).map_or(false, |here| here != b.location)
    }

    fn effect(&self, state: &mut WorldState, b: &Binding<'_>) {
        state.set_location(b.actor, b.location);
    }
}

/// Throw a grenade at the target from any location.
///
/// An exposed target at full health drops to low. The blast never finishes
/// a wounded target and never heals a dead one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrowGrenade;

impl Action for ThrowGrenade {
    fn name(&self) -> &str {
        "Throw_Grenade"
    }

    fn is_applicable(&self, state: &WorldState, b: &Binding<'_>) -> bool {
        state.grenades(b.actor).map_or(false, |n| n > 0) && state.in_cover(b.actor) == Some(false)
    }

    fn effect(&self, state: &mut WorldState, b: &Binding<'_>) {
        state.spend_grenade(b.actor);
        if state.in_cover(b.target) == Some(false) {
            if let Some(health) = state.health(b.target) {
                state.set_health(b.target, health.at_most(Health::Low));
            }
        }
    }
}

/// An ordered, stateless list of actions.
///
/// # Examples
///
/// ```
/// use strips_rs::ActionCatalog;
///
/// let catalog = ActionCatalog::combat();
/// let names: Vec<_> = catalog.names().collect();
/// assert_eq!(
///     names,
///     ["Exit_Cover", "Take_Cover", "Shoot", "Move_To", "Throw_Grenade"]
/// );
/// ```
#[derive(Default)]
pub struct ActionCatalog {
    actions: Vec<Box<dyn Action>>,
}

impl ActionCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five combat actions in expansion order: exit cover, take cover,
    /// shoot, move, throw grenade.
    pub fn combat() -> Self {
        Self {
            actions: vec![
                Box::new(ExitCover),
                Box::new(TakeCover),
                Box::new(Shoot),
                Box::new(MoveTo),
                Box::new(ThrowGrenade),
            ],
        }
    }

    /// Appends an action.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::DuplicateAction`] if an action with the same name
    /// is already present; plan replay looks actions up by name.
    pub fn add(&mut self, action: impl Action + 'static) -> Result<()> {
        if self.get(action.name()).is_some() {
            return Err(PlanError::DuplicateAction(action.name().to_string()));
        }
        self.actions.push(Box::new(action));
        Ok(())
    }

    /// Builder form of [`ActionCatalog::add`].
    pub fn with(mut self, action: impl Action + 'static) -> Result<Self> {
        self.add(action)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Action> {
        self.actions.iter().map(|a| a.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.name())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FnAction;

    fn state() -> WorldState {
        WorldState::new()
            .with_agent("npc", Health::Full, "loc1", true, 2)
            .with_agent("player", Health::Full, "loc2", false, 0)
    }

    fn bind(location: &str) -> Binding<'_> {
        Binding::new("npc", "player", location)
    }

    #[test]
    fn test_cover_toggles() {
        let s = state();
        assert!(ExitCover.is_applicable(&s, &bind("loc1")));
        assert!(!TakeCover.is_applicable(&s, &bind("loc1")));

        let exposed = ExitCover.apply(&s, &bind("loc1"));
        assert_eq!(exposed.in_cover("npc"), Some(false));
        assert!(TakeCover.is_applicable(&exposed, &bind("loc1")));
        assert_eq!(
            TakeCover.apply(&exposed, &bind("loc1")).in_cover("npc"),
            Some(true)
        );
    }

    #[test]
    fn test_move_requires_exposure_and_new_destination() {
        let s = state();
        assert!(!MoveTo.is_applicable(&s, &bind("loc2")));

        let exposed = ExitCover.apply(&s, &bind("loc1"));
        assert!(!MoveTo.is_applicable(&exposed, &bind("loc1")));
        assert!(MoveTo.is_applicable(&exposed, &bind("loc2")));

        let moved = MoveTo.apply(&exposed, &bind("loc2"));
        assert_eq!(moved.location("npc"), Some("loc2"));
        assert_eq!(MoveTo.label(&bind("loc2")), "Move_To: loc2");
    }

    #[test]
    fn test_shoot_walks_health_ladder() {
        let mut s = state();
        assert!(!Shoot.is_applicable(&s, &bind("loc1")));
        // in cover does not matter for shooting
        s.set_location("npc", "loc2");
        assert!(Shoot.is_applicable(&s, &bind("loc1")));

        let once = Shoot.apply(&s, &bind("loc1"));
        assert_eq!(once.health("player"), Some(Health::Low));
        let twice = Shoot.apply(&once, &bind("loc1"));
        assert_eq!(twice.health("player"), Some(Health::Dead));
        let thrice = Shoot.apply(&twice, &bind("loc1"));
        assert_eq!(thrice.health("player"), Some(Health::Dead));
        assert_eq!(thrice.health("npc"), Some(Health::Full));
    }

    #[test]
    fn test_grenade_wounds_but_never_kills_or_heals() {
        let s = state();
        assert!(!ThrowGrenade.is_applicable(&s, &bind("loc1")));

        let exposed = ExitCover.apply(&s, &bind("loc1"));
        let hit = ThrowGrenade.apply(&exposed, &bind("loc1"));
        assert_eq!(hit.grenades("npc"), Some(1));
        assert_eq!(hit.health("player"), Some(Health::Low));

        let again = ThrowGrenade.apply(&hit, &bind("loc1"));
        assert_eq!(again.grenades("npc"), Some(0));
        assert_eq!(again.health("player"), Some(Health::Low));
        assert!(!ThrowGrenade.is_applicable(&again, &bind("loc1")));

        let mut dead = exposed.clone();
        dead.set_health("player", Health::Dead);
        let blast = ThrowGrenade.apply(&dead, &bind("loc1"));
        assert_eq!(blast.health("player"), Some(Health::Dead));
    }

    #[test]
    fn test_grenade_blocked_by_target_cover() {
        let mut s = ExitCover.apply(&state(), &bind("loc1"));
        s.set_in_cover("player", true);
        let thrown = ThrowGrenade.apply(&s, &bind("loc1"));
        assert_eq!(thrown.health("player"), Some(Health::Full));
        assert_eq!(thrown.grenades("npc"), Some(1));
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut catalog = ActionCatalog::combat();
        let err = catalog.add(Shoot).unwrap_err();
        assert!(matches!(err, PlanError::DuplicateAction(name) if name == "Shoot"));

        let wait = FnAction::new(
            "Wait",
            |_: &WorldState, _: &Binding<'_>| true,
            |_: &mut WorldState, _: &Binding<'_>| {},
        );
        catalog.add(wait).unwrap();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.get("Wait").is_some());
    }

    #[test]
    fn test_debug_lists_names() {
        let catalog = ActionCatalog::new().with(Shoot).unwrap();
        assert_eq!(format!("{:?}", catalog), r#"["Shoot"]"#);
    }
}
