//! Reviewer role: judges content and renders verdicts

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::{
    protocol::{AgentCapabilities, AgentCard, AgentSkill, Task, TaskStatus},
    server::{AgentServer, SkillHandler},
};

use super::skills::{ReviewVerdict, ReviewerInput, SkillRequest, REVIEW_SKILL};

/// Judging strategy behind a reviewer agent
///
/// The verdict is the structured contract; how it is reached (model call,
/// heuristics, rubric) is the implementation's business.
#[async_trait]
pub trait ReviewerEngine: Send + Sync + 'static {
    /// Judge a piece of content and render a verdict
    async fn review(&self, input: &ReviewerInput) -> anyhow::Result<ReviewVerdict>;
}

/// Protocol-facing reviewer agent backed by an engine
pub struct ReviewerAgent<E> {
    engine: Arc<E>,
}

impl<E: ReviewerEngine> ReviewerAgent<E> {
    /// Wrap an engine into the reviewer role
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Build a servable agent publishing the standard reviewer card
    pub fn into_server(self, base_url: Url) -> AgentServer {
        AgentServer::new(reviewer_card(base_url), self)
    }
}

/// Card advertised by a reviewer agent at the given base URL
pub fn reviewer_card(base_url: Url) -> AgentCard {
    AgentCard::new(
        "ReviewerAgent",
        "Judges generated content against quality and duration expectations",
        base_url,
    )
    .with_skill(
        AgentSkill::new(
            REVIEW_SKILL,
            "Content Review",
            "Scores content and returns an approve/reject verdict with feedback",
        )
        .with_examples(["Review a storyboard draft for 'Rain'"])
        .with_tags(["review", "quality-check", "validation"]),
    )
    .with_capabilities(AgentCapabilities::new())
}

#[async_trait]
impl<E: ReviewerEngine> SkillHandler for ReviewerAgent<E> {
    async fn handle(&self, task: Task) -> anyhow::Result<TaskStatus> {
        match SkillRequest::parse(&task) {
            Ok(SkillRequest::Review(input)) => {
                let verdict = self.engine.review(&input).await?;
                Ok(TaskStatus::completed(&verdict)?.with_message("Review completed"))
            }
            Ok(other) => Ok(TaskStatus::failed(format!(
                "skill '{}' is not offered by the reviewer agent",
                other.skill_id()
            ))),
            Err(err) => Ok(TaskStatus::failed(err.to_string())),
        }
    }
}
