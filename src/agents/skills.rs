//! Skill identifiers and typed input/output contracts

use serde::{Deserialize, Serialize};

use crate::protocol::{A2AError, A2AResult, Task};

/// Skill id of the content-generation operation
pub const GENERATE_SKILL: &str = "generate";

/// Skill id of the content-review operation
pub const REVIEW_SKILL: &str = "review";

/// Skill id of the publication-metadata operation
pub const METADATA_SKILL: &str = "metadata";

/// Input contract of the `generate` skill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorInput {
    /// Original topic on the first attempt, composite retry instruction after
    pub topic_or_feedback: String,

    /// Target duration in seconds, passed through unchanged on every attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hint: Option<f64>,

    /// Whether this request revises previously rejected content
    #[serde(default)]
    pub is_retry: bool,
}

/// Output contract of the `generate` skill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorOutput {
    /// The produced content
    pub content: String,
}

/// Input contract of the `review` skill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewerInput {
    /// Content to judge
    pub content: String,

    /// Duration the content is expected to fill, in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_duration: Option<f64>,
}

/// Structured verdict returned by the `review` skill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewVerdict {
    /// Whether the content is approved for production
    pub approved: bool,

    /// Free-text reasoning, fed back to the generator on rejection
    pub feedback: String,

    /// Suitability score from 0 to 100
    pub score: u8,
}

impl ReviewVerdict {
    /// Create an approving verdict
    pub fn approval(feedback: impl Into<String>, score: u8) -> Self {
        Self {
            approved: true,
            feedback: feedback.into(),
            score,
        }
    }

    /// Create a rejecting verdict
    pub fn rejection(feedback: impl Into<String>, score: u8) -> Self {
        Self {
            approved: false,
            feedback: feedback.into(),
            score,
        }
    }
}

/// Input contract of the `metadata` skill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataInput {
    /// The approved content
    pub content: String,

    /// The original topic the content was produced for
    pub topic: String,
}

/// Publication metadata for an approved piece of content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicationMetadata {
    /// Publication title
    pub title: String,

    /// Publication description
    pub description: String,

    /// Publication tags
    pub tags: Vec<String>,
}

impl PublicationMetadata {
    /// Deterministic default metadata derived from the topic
    ///
    /// Used when the metadata skill is unavailable or misbehaves; every
    /// field is guaranteed non-empty.
    pub fn fallback(topic: &str) -> Self {
        Self {
            title: format!("{} - Generated Short", topic),
            description: format!(
                "A short-form video about {}, produced by an automated generate-and-review pipeline.",
                topic
            ),
            tags: vec![
                "shorts".to_string(),
                "auto-generated".to_string(),
                topic.to_lowercase(),
            ],
        }
    }
}

/// A task input parsed into its typed per-skill contract
///
/// Dispatch is keyed on the task's skill id, so malformed payloads are
/// rejected at the server boundary with an error naming the offending skill
/// instead of surfacing deep inside an engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillRequest {
    /// `generate` invocation
    Generate(GeneratorInput),

    /// `review` invocation
    Review(ReviewerInput),

    /// `metadata` invocation
    Metadata(MetadataInput),
}

impl SkillRequest {
    /// Parse a task into the typed contract for its skill
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown skill id or an input
    /// payload that does not match the skill's contract.
    pub fn parse(task: &Task) -> A2AResult<Self> {
        match task.skill.as_str() {
            GENERATE_SKILL => Ok(Self::Generate(task.parse_input()?)),
            REVIEW_SKILL => Ok(Self::Review(task.parse_input()?)),
            METADATA_SKILL => Ok(Self::Metadata(task.parse_input()?)),
            other => Err(A2AError::Validation(format!("unknown skill '{}'", other))),
        }
    }

    /// Skill id this request was parsed from
    pub fn skill_id(&self) -> &'static str {
        match self {
            Self::Generate(_) => GENERATE_SKILL,
            Self::Review(_) => REVIEW_SKILL,
            Self::Metadata(_) => METADATA_SKILL,
        }
    }
}
