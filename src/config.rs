//! Deployment configuration for the agent pair

use url::Url;

use crate::protocol::{A2AError, A2AResult};

/// Port the generator agent listens on unless overridden
pub const DEFAULT_GENERATOR_PORT: u16 = 8001;

/// Port the reviewer agent listens on unless overridden
pub const DEFAULT_REVIEWER_PORT: u16 = 8002;

/// Base URLs of a generator/reviewer pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentEndpoints {
    pub generator: Url,
    pub reviewer: Url,
}

impl AgentEndpoints {
    /// Create endpoints from explicit base URLs
    pub fn new(generator: Url, reviewer: Url) -> Self {
        Self {
            generator,
            reviewer,
        }
    }

    /// Resolve endpoints from the environment
    ///
    /// `GENERATOR_AGENT_URL` and `REVIEWER_AGENT_URL` override the full
    /// base URL of their agent. Otherwise `GENERATOR_PORT` and
    /// `REVIEWER_PORT` select the port on localhost, falling back to
    /// 8001 and 8002.
    ///
    /// # Errors
    ///
    /// Fails when an override variable holds an unparseable URL.
    pub fn from_env() -> A2AResult<Self> {
        Ok(Self {
            generator: endpoint_from_env(
                "GENERATOR_AGENT_URL",
                "GENERATOR_PORT",
                DEFAULT_GENERATOR_PORT,
            )?,
            reviewer: endpoint_from_env(
                "REVIEWER_AGENT_URL",
                "REVIEWER_PORT",
                DEFAULT_REVIEWER_PORT,
            )?,
        })
    }
}

fn endpoint_from_env(url_var: &str, port_var: &str, default_port: u16) -> A2AResult<Url> {
    if let Ok(raw) = std::env::var(url_var) {
        return raw
            .parse()
            .map_err(|err| A2AError::Validation(format!("{} is not a valid URL: {}", url_var, err)));
    }
    let port = std::env::var(port_var)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(default_port);
    format!("http://localhost:{}", port)
        .parse()
        .map_err(|err| A2AError::Validation(format!("invalid local endpoint: {}", err)))
}
