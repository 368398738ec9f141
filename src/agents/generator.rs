//! Generator role: drafts content and derives publication metadata

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::{
    protocol::{AgentCapabilities, AgentCard, AgentSkill, Task, TaskStatus},
    server::{AgentServer, SkillHandler},
};

use super::skills::{
    GeneratorInput, GeneratorOutput, MetadataInput, PublicationMetadata, SkillRequest,
    GENERATE_SKILL, METADATA_SKILL,
};

/// Content-production strategy behind a generator agent
///
/// Implementations own the semantic work (model calls, templating, length
/// control); the protocol layer treats them as opaque and only ever
/// stringifies their errors.
#[async_trait]
pub trait GeneratorEngine: Send + Sync + 'static {
    /// Draft content for a topic, or rework it from reviewer feedback
    async fn generate(&self, input: &GeneratorInput) -> anyhow::Result<String>;

    /// Derive publication metadata for approved content
    async fn publication_metadata(
        &self,
        input: &MetadataInput,
    ) -> anyhow::Result<PublicationMetadata>;
}

/// Protocol-facing generator agent backed by an engine
pub struct GeneratorAgent<E> {
    engine: Arc<E>,
}

impl<E: GeneratorEngine> GeneratorAgent<E> {
    /// Wrap an engine into the generator role
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Build a servable agent publishing the standard generator card
    pub fn into_server(self, base_url: Url) -> AgentServer {
        AgentServer::new(generator_card(base_url), self)
    }
}

/// Card advertised by a generator agent at the given base URL
pub fn generator_card(base_url: Url) -> AgentCard {
    AgentCard::new(
        "GeneratorAgent",
        "Drafts short-form video content and revises it after review feedback",
        base_url,
    )
    .with_skill(
        AgentSkill::new(
            GENERATE_SKILL,
            "Content Generation",
            "Drafts content for a topic or reworks it from rejection feedback",
        )
        .with_examples([
            "Draft a storyboard for 'Rain'",
            "Revise a draft using reviewer feedback",
        ])
        .with_tags(["generation", "drafting", "video"]),
    )
    .with_skill(
        AgentSkill::new(
            METADATA_SKILL,
            "Publication Metadata",
            "Derives a title, description, and tags for approved content",
        )
        .with_examples(["Summarize an approved draft for publishing"])
        .with_tags(["metadata", "publishing"]),
    )
    .with_capabilities(AgentCapabilities::new())
}

#[async_trait]
impl<E: GeneratorEngine> SkillHandler for GeneratorAgent<E> {
    async fn handle(&self, task: Task) -> anyhow::Result<TaskStatus> {
        match SkillRequest::parse(&task) {
            Ok(SkillRequest::Generate(input)) => {
                let content = self.engine.generate(&input).await?;
                Ok(TaskStatus::completed(&GeneratorOutput { content })?
                    .with_message("Content generated"))
            }
            Ok(SkillRequest::Metadata(input)) => {
                let metadata = self.engine.publication_metadata(&input).await?;
                Ok(TaskStatus::completed(&metadata)?.with_message("Publication metadata derived"))
            }
            Ok(other) => Ok(TaskStatus::failed(format!(
                "skill '{}' is not offered by the generator agent",
                other.skill_id()
            ))),
            Err(err) => Ok(TaskStatus::failed(err.to_string())),
        }
    }
}
