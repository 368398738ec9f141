//! Negotiation trace and terminal result types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agents::PublicationMetadata;

/// Action recorded by a conversation entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentAction {
    /// The generator produced (or failed to produce) content
    Generate,

    /// The reviewer rendered (or failed to render) a verdict
    Review,

    /// An agent call failed at the infrastructure level
    Error,
}

/// One step of a negotiation
///
/// Entries are append-only and owned by a single workflow run; together they
/// reconstruct every decision the orchestrator made.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationEntry {
    /// 1-based iteration the step belongs to
    pub iteration: u32,

    /// Name of the acting agent
    pub agent: String,

    /// What the step did
    pub action: AgentAction,

    /// Action-specific payload
    pub output: Value,

    /// When the step was recorded
    pub timestamp: DateTime<Utc>,
}

impl ConversationEntry {
    /// Record a step at the current time
    pub fn new(
        iteration: u32,
        agent: impl Into<String>,
        action: AgentAction,
        output: Value,
    ) -> Self {
        Self {
            iteration,
            agent: agent.into(),
            action,
            output,
            timestamp: Utc::now(),
        }
    }
}

/// Category of a negotiation failure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required agent was unreachable or returned a non-completed result
    AgentUnreachableOrErroring,

    /// The reviewer turned the content down; terminal only through exhaustion
    ContentRejected,

    /// The iteration bound was reached without an approval
    MaxIterationsExhausted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::AgentUnreachableOrErroring => "agent_unreachable_or_erroring",
            FailureKind::ContentRejected => "content_rejected",
            FailureKind::MaxIterationsExhausted => "max_iterations_exhausted",
        })
    }
}

/// Terminal failure record of an unsuccessful negotiation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NegotiationFailure {
    /// Machine-readable category
    pub kind: FailureKind,

    /// Human-readable cause
    pub error: String,
}

/// Terminal result of one negotiation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NegotiationOutcome {
    /// Whether the negotiation ended with an approved artifact
    pub success: bool,

    /// The approved content, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_content: Option<String>,

    /// Publication metadata, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PublicationMetadata>,

    /// Full ordered conversation trace
    pub conversation_log: Vec<ConversationEntry>,

    /// Number of generate/review iterations performed
    pub iterations: u32,

    /// Score of the approving verdict, 0 when unsuccessful
    pub final_score: u8,

    /// Failure record, present only when unsuccessful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<NegotiationFailure>,
}

impl NegotiationOutcome {
    /// Successful terminal outcome
    pub fn approved(
        content: impl Into<String>,
        metadata: PublicationMetadata,
        conversation_log: Vec<ConversationEntry>,
        iterations: u32,
        final_score: u8,
    ) -> Self {
        Self {
            success: true,
            approved_content: Some(content.into()),
            metadata: Some(metadata),
            conversation_log,
            iterations,
            final_score,
            failure: None,
        }
    }

    /// Infrastructure-failure terminal outcome
    pub fn aborted(
        error: impl Into<String>,
        conversation_log: Vec<ConversationEntry>,
        iterations: u32,
    ) -> Self {
        Self::failed(
            FailureKind::AgentUnreachableOrErroring,
            error,
            conversation_log,
            iterations,
        )
    }

    /// Bound-exhaustion terminal outcome
    pub fn exhausted(
        error: impl Into<String>,
        conversation_log: Vec<ConversationEntry>,
        iterations: u32,
    ) -> Self {
        Self::failed(
            FailureKind::MaxIterationsExhausted,
            error,
            conversation_log,
            iterations,
        )
    }

    fn failed(
        kind: FailureKind,
        error: impl Into<String>,
        conversation_log: Vec<ConversationEntry>,
        iterations: u32,
    ) -> Self {
        Self {
            success: false,
            approved_content: None,
            metadata: None,
            conversation_log,
            iterations,
            final_score: 0,
            failure: Some(NegotiationFailure {
                kind,
                error: error.into(),
            }),
        }
    }

    /// Failure category, if the negotiation was unsuccessful
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|failure| failure.kind)
    }

    /// Error string, if the negotiation was unsuccessful
    pub fn error(&self) -> Option<&str> {
        self.failure.as_ref().map(|failure| failure.error.as_str())
    }
}
