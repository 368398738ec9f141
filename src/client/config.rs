//! Client configuration

use std::time::Duration;

/// Configuration for an A2A client
///
/// Task execution gets a long timeout because generation skills routinely
/// shell out to heavy downstream work; health probes stay short so liveness
/// checks answer promptly either way.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout for task execution and card discovery
    pub timeout: Duration,

    /// Timeout for health probes
    pub health_timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with protocol defaults
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            health_timeout: Duration::from_secs(5),
        }
    }

    /// Set the task execution timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the health probe timeout
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
