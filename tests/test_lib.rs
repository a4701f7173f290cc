use strips_rs::{
    ActionCatalog, Binding, FnAction, GraphVisualizer, Goal, Health, PlanError, Planner, Scenario,
    WorldState,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() {
        let start = WorldState::new()
            .with_agent("npc", Health::Full, "loc1", true, 2)
            .with_agent("player", Health::Full, "loc2", false, 0);
        let goal = Goal::new().health("player", Health::Dead);

        let planner = Planner::new(ActionCatalog::combat(), ["loc1", "loc2"]);
        let outcome = planner.plan(&start, &goal).unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.plan().len(), 4);
        assert_eq!(outcome.plan().steps()[0].label, "Exit_Cover");
        assert_eq!(outcome.plan().steps()[3].label, "Shoot");
    }

    #[test]
    fn test_impossible_goal() {
        let start = WorldState::new()
            .with_agent("npc", Health::Full, "loc1", true, 0)
            .with_agent("player", Health::Full, "loc2", true, 0);
        let goal = Goal::new().grenades("npc", 1);

        let planner = Planner::new(ActionCatalog::combat(), ["loc1", "loc2"]);
        let outcome = planner.plan(&start, &goal).unwrap();
        assert!(!outcome.is_success());
        assert!(outcome.plan().is_empty());
        assert!(outcome.states_discovered() > 1);
    }

    #[test]
    fn test_custom_action_extends_catalog() {
        // a medkit lets the actor bring a wounded ally back, which the built-in
        // actions never do
        let heal = FnAction::new(
            "Use_Medkit",
            |s: &WorldState, b: &Binding<'_>| {
                s.health(b.target) == Some(Health::Low) && s.location(b.actor) == s.location(b.target)
            },
            |s: &mut WorldState, b: &Binding<'_>| s.set_health(b.target, Health::Full),
        );
        let catalog = ActionCatalog::new()
            .with(strips_rs::ExitCover)
            .unwrap()
            .with(strips_rs::MoveTo)
            .unwrap()
            .with(heal)
            .unwrap();

        let start = WorldState::new()
            .with_agent("medic", Health::Full, "camp", true, 0)
            .with_agent("scout", Health::Low, "ridge", false, 0);
        let goal = Goal::new().health("scout", Health::Full);

        let planner = Planner::new(catalog, ["camp", "ridge"]).with_roles("medic", "scout");
        let outcome = planner.plan(&start, &goal).unwrap();
        let labels: Vec<_> = outcome.plan().labels().collect();
        assert_eq!(labels, ["Exit_Cover", "Move_To: ridge", "Use_Medkit"]);
    }

    #[test]
    fn test_malformed_scenario_fails_fast() {
        let mut scenario = Scenario::ambush();
        scenario.goal = Goal::new().health("boss", Health::Dead);
        let result = scenario.solve(ActionCatalog::combat());
        assert!(matches!(result, Err(PlanError::UnknownAgent(a)) if a == "boss"));
    }

    #[test]
    fn test_visualize_search() {
        let outcome = Scenario::ambush().solve(ActionCatalog::combat()).unwrap();

        let path = std::env::temp_dir().join("strips_rs_ambush.dot");
        GraphVisualizer::new().save_dot(&outcome, &path).unwrap();

        let dot = std::fs::read_to_string(&path).unwrap();
        assert!(dot.contains("digraph StateSpace"));
        assert!(dot.contains("Move_To: loc2"));
        std::fs::remove_file(&path).unwrap();
    }
}
