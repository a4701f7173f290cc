mod action;
mod catalog;
mod error;
mod goal;
mod graph;
mod plan;
mod planner;
mod scenario;
mod search;
mod visualizer;
mod world_state;

pub use action::{Action, Binding, FnAction};
pub use catalog::{ActionCatalog, ExitCover, MoveTo, Shoot, TakeCover, ThrowGrenade};
pub use error::{PlanError, Result};
pub use goal::Goal;
pub use graph::{StateGraph, StateId, StateNode};
pub use plan::{Plan, PlanStep};
pub use planner::{Planner, PlannerConfig, DEFAULT_ACTOR, DEFAULT_TARGET};
pub use scenario::Scenario;
pub use search::SearchOutcome;
pub use visualizer::GraphVisualizer;
pub use world_state::{Health, WorldState};
