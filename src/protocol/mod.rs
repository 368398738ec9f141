//! Core A2A protocol types and definitions

use serde::{Deserialize, Serialize};

pub mod agent;
pub mod error;
pub mod task;

pub use agent::{AgentCapabilities, AgentCard, AgentSkill, TransportProtocol};
pub use error::{A2AError, A2AResult};
pub use task::{Task, TaskState, TaskStatus};

/// Version of the A2A protocol spoken by this crate
pub const PROTOCOL_VERSION: &str = "0.3.0";

/// Path serving the agent card
pub const AGENT_CARD_PATH: &str = "/a2a/agent_card";

/// Path accepting task submissions
pub const TASKS_PATH: &str = "/a2a/tasks";

/// Path serving the liveness probe
pub const HEALTH_PATH: &str = "/health";

/// Liveness payload served at the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    /// Fixed liveness marker, always `"healthy"`
    pub status: String,

    /// Name of the responding agent
    pub agent: String,
}

impl HealthResponse {
    /// Create the liveness payload for an agent
    pub fn healthy(agent: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            agent: agent.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_wire_shape() {
        let health = HealthResponse::healthy("GeneratorAgent");
        let json = serde_json::to_string(&health).unwrap();
        assert_eq!(json, r#"{"status":"healthy","agent":"GeneratorAgent"}"#);
    }
}
