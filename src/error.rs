use thiserror::Error;

/// Errors raised while validating a scenario, searching, or replaying a plan.
///
/// An unreachable goal is not represented here: the search reports it as a
/// normal outcome with an empty plan.
///
/// # Examples
///
/// ```
/// use strips_rs::PlanError;
///
/// let error = PlanError::UnknownAgent("sniper".to_string());
/// assert_eq!(format!("{}", error), "Unknown agent: sniper");
/// ```
#[derive(Error, Debug)]
pub enum PlanError {
    // Scenario errors
    /// The goal or the actor/target roles name an agent the start state does not track
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    /// The actor and target roles name the same agent
    #[error("Invalid roles: {0}")]
    InvalidRoles(String),

    /// The four mappings of the start state do not cover the same agents
    #[error("Inconsistent agent set: {0}")]
    InconsistentAgents(String),

    /// A location outside the admissible location set
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    /// The admissible location set is empty
    #[error("Location set is empty")]
    NoLocations,

    #[error("Location listed more than once: {0}")]
    DuplicateLocation(String),

    #[error("Action already in catalog: {0}")]
    DuplicateAction(String),

    // Search errors
    /// The search discovered more states than the configured cap allows
    #[error("State limit of {limit} exceeded ({discovered} states discovered after {iterations} iterations)")]
    StateLimitExceeded {
        limit: usize,
        discovered: usize,
        iterations: usize,
    },

    // Replay errors
    /// A plan step was replayed against a state where its precondition is false
    #[error("Action precondition not met: {0}")]
    PreconditionNotMet(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A wrapper around serde_json serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unknown_location_display() {
        let err = PlanError::UnknownLocation("loc9".to_string());
        assert_eq!(format!("{}", err), "Unknown location: loc9");
    }

    #[test]
    fn test_state_limit_display() {
        let err = PlanError::StateLimitExceeded {
            limit: 10,
            discovered: 11,
            iterations: 4,
        };
        assert_eq!(
            format!("{}", err),
            "State limit of 10 exceeded (11 states discovered after 4 iterations)"
        );
    }

    #[test]
    fn test_precondition_not_met_display() {
        let err = PlanError::PreconditionNotMet("Shoot".to_string());
        assert_eq!(format!("{}", err), "Action precondition not met: Shoot");
    }

    #[test]
    fn test_io_error_has_source() {
        let err = PlanError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_roles_display() {
        let err = PlanError::InvalidRoles("npc acts on itself".to_string());
        assert_eq!(format!("{}", err), "Invalid roles: npc acts on itself");
    }

    #[test]
    fn test_error_trait() {
        let err = PlanError::NoLocations;
        assert!(err.source().is_none());
    }
}
