//! A2A task request and result types

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{A2AError, A2AResult};

/// One unit of work sent to an agent
///
/// A task names the skill to invoke and carries a free-form JSON object as
/// input. The protocol layer does not schema-check the input; each skill
/// parses it into its own typed contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Identifier of the skill to invoke
    pub skill: String,

    /// Skill-specific input payload, defaults to an empty object
    #[serde(default)]
    pub input: Map<String, Value>,

    /// Optional caller-supplied identifier for correlation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl Task {
    /// Create a new task for a skill with an empty input payload
    pub fn new(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            input: Map::new(),
            task_id: None,
        }
    }

    /// Insert a single input field
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input.insert(key.into(), value.into());
        self
    }

    /// Replace the input payload with a serialized struct
    ///
    /// # Errors
    ///
    /// Returns a validation error if the payload does not serialize to a
    /// JSON object.
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> A2AResult<Self> {
        match serde_json::to_value(payload)? {
            Value::Object(map) => {
                self.input = map;
                Ok(self)
            }
            other => Err(A2AError::Validation(format!(
                "task input must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Set the correlation identifier
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Parse the input payload into a typed skill contract
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the skill when the payload does
    /// not match the expected shape.
    pub fn parse_input<T: DeserializeOwned>(&self) -> A2AResult<T> {
        serde_json::from_value(Value::Object(self.input.clone())).map_err(|err| {
            A2AError::Validation(format!("invalid input for skill '{}': {}", self.skill, err))
        })
    }
}

/// Task state in the A2A protocol lifecycle
///
/// The request/response call path used here resolves every task directly to
/// `completed` or `failed`; the remaining states exist in the vocabulary for
/// forward compatibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Task has been received and is queued for processing
    Pending,

    /// Task is currently being processed
    Running,

    /// Task completed successfully
    Completed,

    /// Task failed with an error
    Failed,

    /// Task was cancelled by the client
    Cancelled,
}

impl TaskState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Cancelled
        )
    }
}

/// Outcome of a task execution
///
/// Invariant: `error` is non-empty if and only if the state is `failed`,
/// and a `completed` result always carries an output object. The optional
/// `message` is a human-readable diagnostic with no protocol semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// Terminal or in-flight state of the task
    pub state: TaskState,

    /// Skill-specific output payload (present when completed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Map<String, Value>>,

    /// Human-readable diagnostic message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Error description (present when failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskStatus {
    /// Create a completed result from a serializable output payload
    ///
    /// # Errors
    ///
    /// Returns a validation error if the payload does not serialize to a
    /// JSON object.
    pub fn completed<T: Serialize>(output: &T) -> A2AResult<Self> {
        match serde_json::to_value(output)? {
            Value::Object(map) => Ok(Self {
                state: TaskState::Completed,
                output: Some(map),
                message: None,
                error: None,
            }),
            other => Err(A2AError::Validation(format!(
                "task output must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Create a failed result with an error description
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            state: TaskState::Failed,
            output: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Attach a diagnostic message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Check if the task completed successfully
    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }

    /// Check if the task failed
    pub fn is_failed(&self) -> bool {
        self.state == TaskState::Failed
    }

    /// Best available failure description
    ///
    /// Prefers the error field, falls back to the diagnostic message.
    pub fn failure_cause(&self) -> String {
        self.error
            .clone()
            .filter(|e| !e.is_empty())
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "unspecified failure".to_string())
    }

    /// Parse the output payload into a typed skill contract
    ///
    /// # Errors
    ///
    /// Returns a protocol error when the output is absent or does not match
    /// the expected shape.
    pub fn parse_output<T: DeserializeOwned>(&self) -> A2AResult<T> {
        let output = self
            .output
            .as_ref()
            .ok_or_else(|| A2AError::Protocol("task result carries no output".to_string()))?;
        serde_json::from_value(Value::Object(output.clone()))
            .map_err(|err| A2AError::Protocol(format!("malformed task output: {}", err)))
    }

    /// Check the state/error/output invariant
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the violated rule.
    pub fn validate(&self) -> A2AResult<()> {
        let has_error = self.error.as_deref().is_some_and(|e| !e.is_empty());
        match self.state {
            TaskState::Failed if !has_error => Err(A2AError::Validation(
                "failed task result must carry a non-empty error".to_string(),
            )),
            TaskState::Completed if has_error => Err(A2AError::Validation(
                "completed task result must not carry an error".to_string(),
            )),
            TaskState::Completed if self.output.is_none() => Err(A2AError::Validation(
                "completed task result must carry an output".to_string(),
            )),
            _ if has_error && self.state != TaskState::Failed => Err(A2AError::Validation(
                format!("only failed results may carry an error, state is {:?}", self.state),
            )),
            _ => Ok(()),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
