//! High-level A2A agent client

use tracing::{debug, warn};
use url::Url;

use crate::{
    client::config::ClientConfig,
    protocol::{
        A2AError, A2AResult, AgentCard, Task, TaskStatus, AGENT_CARD_PATH, HEALTH_PATH, TASKS_PATH,
    },
};

/// Client for one remote protocol agent
///
/// The client owns a persistent connection pool for its lifetime; dropping
/// the client releases the pool on every exit path, panics included.
///
/// Failure handling is deliberately asymmetric. Capability discovery fails
/// loudly so a misconfigured endpoint is caught at startup, while
/// [`AgentClient::execute`] never fails: every transport, HTTP, and decoding
/// problem is folded into a `failed` task result so callers can treat "the
/// agent said no" and "the agent was unreachable" uniformly.
///
/// # Example
///
/// ```rust,no_run
/// use a2a_greenlight::client::AgentClient;
/// use a2a_greenlight::protocol::Task;
///
/// # async fn example() -> Result<(), a2a_greenlight::protocol::A2AError> {
/// let client = AgentClient::new("http://localhost:8001".parse().unwrap())?;
/// let card = client.fetch_agent_card().await?;
/// println!("Talking to {}", card.name);
///
/// let task = Task::new("generate").with_input("topic_or_feedback", "Rain");
/// let status = client.execute(&task).await;
/// println!("Finished in state {:?}", status.state);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: Url,
    config: ClientConfig,
}

impl AgentClient {
    /// Create a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns a transport error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: Url) -> A2AResult<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a client with explicit configuration
    ///
    /// # Errors
    ///
    /// Returns a transport error if the underlying HTTP client cannot be
    /// constructed.
    pub fn with_config(base_url: Url, config: ClientConfig) -> A2AResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Base URL of the remote agent
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the remote agent's card
    ///
    /// # Errors
    ///
    /// Returns the underlying transport, HTTP, or decoding error. Discovery
    /// failures are fatal by convention: a client pointed at a wrong
    /// endpoint should fail at startup, not during a negotiation.
    pub async fn fetch_agent_card(&self) -> A2AResult<AgentCard> {
        let url = self.endpoint(AGENT_CARD_PATH)?;
        let response = self.http.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(A2AError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(response.json().await?)
    }

    /// Execute a task on the remote agent
    ///
    /// This call never fails: any connection error, timeout, non-2xx
    /// response, or undecodable body is converted into a `failed`
    /// [`TaskStatus`] describing the cause.
    pub async fn execute(&self, task: &Task) -> TaskStatus {
        match self.try_execute(task).await {
            Ok(status) => status,
            Err(err) => {
                warn!(
                    "Task for skill '{}' against {} failed in transit: {}",
                    task.skill, self.base_url, err
                );
                TaskStatus::failed(format!("HTTP request failed: {}", err))
                    .with_message(format!("Agent communication failed ({})", self.base_url))
            }
        }
    }

    async fn try_execute(&self, task: &Task) -> A2AResult<TaskStatus> {
        let url = self.endpoint(TASKS_PATH)?;
        debug!("Submitting skill '{}' to {}", task.skill, url);
        let response = self.http.post(url.clone()).json(task).send().await?;
        if !response.status().is_success() {
            return Err(A2AError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(response.json().await?)
    }

    /// Probe the remote agent's liveness endpoint
    ///
    /// Uses the short health timeout and swallows every error as `false`.
    pub async fn health_check(&self) -> bool {
        let Ok(url) = self.endpoint(HEALTH_PATH) else {
            return false;
        };
        match self
            .http
            .get(url)
            .timeout(self.config.health_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!("Health probe against {} failed: {}", self.base_url, err);
                false
            }
        }
    }

    fn endpoint(&self, path: &str) -> A2AResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| A2AError::Validation(format!("invalid endpoint path '{}': {}", path, err)))
    }
}
