//! Bounded generate/review negotiation loop

use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    agents::{
        GeneratorInput, GeneratorOutput, MetadataInput, PublicationMetadata, ReviewVerdict,
        ReviewerInput, GENERATE_SKILL, METADATA_SKILL, REVIEW_SKILL,
    },
    client::AgentClient,
    config::AgentEndpoints,
    protocol::{A2AError, A2AResult, AgentCard, Task, TaskStatus},
};

use super::outcome::{AgentAction, ConversationEntry, FailureKind, NegotiationOutcome};

/// Configuration for the negotiation loop
#[derive(Debug, Clone)]
pub struct NegotiationConfig {
    /// Upper bound on generate/review iterations per run
    pub max_iterations: u32,
}

impl NegotiationConfig {
    /// Create a configuration with the default iteration bound of 5
    pub fn new() -> Self {
        Self { max_iterations: 5 }
    }

    /// Set the iteration bound
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrator driving one generator/reviewer pair to convergence
///
/// Holds exactly one client per remote agent; dropping the negotiator
/// releases both connection pools. A run is strictly sequential: each step
/// consumes the previous step's result, so there is no parallelism inside
/// one negotiation, while independent negotiations may run concurrently on
/// their own negotiator instances.
#[derive(Debug)]
pub struct Negotiator {
    generator: AgentClient,
    reviewer: AgentClient,
    generator_name: String,
    reviewer_name: String,
    config: NegotiationConfig,
}

impl Negotiator {
    /// Connect to both agents with default configuration
    ///
    /// # Errors
    ///
    /// Fails loudly when either agent is unreachable or does not advertise
    /// the skill its role requires.
    pub async fn connect(endpoints: &AgentEndpoints) -> A2AResult<Self> {
        Self::connect_with_config(endpoints, NegotiationConfig::default()).await
    }

    /// Connect to both agents with explicit configuration
    ///
    /// # Errors
    ///
    /// Same discovery failures as [`Negotiator::connect`].
    pub async fn connect_with_config(
        endpoints: &AgentEndpoints,
        config: NegotiationConfig,
    ) -> A2AResult<Self> {
        let generator = AgentClient::new(endpoints.generator.clone())?;
        let reviewer = AgentClient::new(endpoints.reviewer.clone())?;
        Self::from_clients(generator, reviewer, config).await
    }

    /// Build from preconfigured clients, still performing discovery
    ///
    /// # Errors
    ///
    /// Returns discovery errors from either card fetch, or a missing-skill
    /// error when a card lacks its role's required skill.
    pub async fn from_clients(
        generator: AgentClient,
        reviewer: AgentClient,
        config: NegotiationConfig,
    ) -> A2AResult<Self> {
        let generator_card = generator.fetch_agent_card().await?;
        let reviewer_card = reviewer.fetch_agent_card().await?;
        require_skill(&generator_card, GENERATE_SKILL)?;
        require_skill(&reviewer_card, REVIEW_SKILL)?;

        info!(
            "Negotiating between '{}' ({}) and '{}' ({})",
            generator_card.name,
            generator.base_url(),
            reviewer_card.name,
            reviewer.base_url()
        );

        Ok(Self {
            generator,
            reviewer,
            generator_name: generator_card.name,
            reviewer_name: reviewer_card.name,
            config,
        })
    }

    /// The negotiation configuration
    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }

    /// Discovered name of the generator agent
    pub fn generator_name(&self) -> &str {
        &self.generator_name
    }

    /// Discovered name of the reviewer agent
    pub fn reviewer_name(&self) -> &str {
        &self.reviewer_name
    }

    /// Probe both agents' liveness concurrently
    pub async fn agents_healthy(&self) -> bool {
        let (generator, reviewer) =
            tokio::join!(self.generator.health_check(), self.reviewer.health_check());
        generator && reviewer
    }

    /// Drive one topic to an approved artifact or a well-defined failure
    ///
    /// The single entry point of the workflow. It never fails: every
    /// failure mode is folded into the returned [`NegotiationOutcome`],
    /// whose conversation log reconstructs each step taken.
    pub async fn run_negotiation(
        &self,
        topic: &str,
        duration_hint: Option<f64>,
        max_iterations: Option<u32>,
    ) -> NegotiationOutcome {
        let bound = max_iterations.unwrap_or(self.config.max_iterations).max(1);
        let mut log: Vec<ConversationEntry> = Vec::new();
        let mut instruction = topic.to_string();

        info!(
            "Starting negotiation for topic '{}' with at most {} iterations",
            topic, bound
        );

        for attempt in 1..=bound {
            let generator_input = GeneratorInput {
                topic_or_feedback: instruction.clone(),
                duration_hint,
                is_retry: attempt > 1,
            };
            let generation = self
                .call(&self.generator, GENERATE_SKILL, &generator_input)
                .await;
            if !generation.is_completed() {
                let cause = generation.failure_cause();
                warn!("Generator failed on attempt {}: {}", attempt, cause);
                log.push(ConversationEntry::new(
                    attempt,
                    &self.generator_name,
                    AgentAction::Error,
                    json!({ "error": cause }),
                ));
                return NegotiationOutcome::aborted(
                    format!("Generator error: {}", cause),
                    log,
                    attempt,
                );
            }
            let content = match generation.parse_output::<GeneratorOutput>() {
                Ok(output) => output.content,
                Err(err) => {
                    let cause = format!("Generator returned an unusable payload: {}", err);
                    warn!("{}", cause);
                    log.push(ConversationEntry::new(
                        attempt,
                        &self.generator_name,
                        AgentAction::Error,
                        json!({ "error": cause }),
                    ));
                    return NegotiationOutcome::aborted(cause, log, attempt);
                }
            };
            log.push(ConversationEntry::new(
                attempt,
                &self.generator_name,
                AgentAction::Generate,
                json!({ "content": content }),
            ));

            let reviewer_input = ReviewerInput {
                content: content.clone(),
                expected_duration: duration_hint,
            };
            let review = self.call(&self.reviewer, REVIEW_SKILL, &reviewer_input).await;
            if !review.is_completed() {
                let cause = review.failure_cause();
                warn!("Reviewer failed on attempt {}: {}", attempt, cause);
                log.push(ConversationEntry::new(
                    attempt,
                    &self.reviewer_name,
                    AgentAction::Error,
                    json!({ "error": cause }),
                ));
                return NegotiationOutcome::aborted(
                    format!("Reviewer error: {}", cause),
                    log,
                    attempt,
                );
            }

            // An unparseable or out-of-range verdict rejects the content and
            // consumes the attempt
            let verdict = match parse_verdict(&review) {
                Ok(verdict) => {
                    log.push(ConversationEntry::new(
                        attempt,
                        &self.reviewer_name,
                        AgentAction::Review,
                        json!({
                            "approved": verdict.approved,
                            "feedback": verdict.feedback,
                            "score": verdict.score,
                        }),
                    ));
                    verdict
                }
                Err(err) => {
                    warn!("Reviewer verdict malformed on attempt {}: {}", attempt, err);
                    log.push(ConversationEntry::new(
                        attempt,
                        &self.reviewer_name,
                        AgentAction::Review,
                        json!({
                            "verdict_malformed": true,
                            "raw": review.output,
                            "error": err.to_string(),
                        }),
                    ));
                    ReviewVerdict::rejection(format!("Verdict was malformed: {}", err), 0)
                }
            };

            if verdict.approved {
                info!(
                    "Content approved on attempt {} with score {}",
                    attempt, verdict.score
                );
                let metadata = self.publication_metadata(&content, topic).await;
                return NegotiationOutcome::approved(content, metadata, log, attempt, verdict.score);
            }

            if attempt < bound {
                info!(
                    "Attempt {}/{} rejected with score {} ({}), retrying with feedback",
                    attempt,
                    bound,
                    verdict.score,
                    FailureKind::ContentRejected
                );
                instruction = retry_instruction(&verdict.feedback, topic, duration_hint);
            } else {
                warn!(
                    "Attempt {}/{} rejected with score {}, iteration bound reached",
                    attempt, bound, verdict.score
                );
            }
        }

        NegotiationOutcome::exhausted(
            format!("No approval within {} iterations", bound),
            log,
            bound,
        )
    }

    /// Derive publication metadata, never failing the workflow
    ///
    /// The secondary metadata call is best-effort: any failure falls back
    /// to deterministic defaults derived from the topic.
    async fn publication_metadata(&self, content: &str, topic: &str) -> PublicationMetadata {
        let input = MetadataInput {
            content: content.to_string(),
            topic: topic.to_string(),
        };
        let status = self.call(&self.generator, METADATA_SKILL, &input).await;
        if status.is_completed() {
            match status.parse_output::<PublicationMetadata>() {
                Ok(metadata) => return metadata,
                Err(err) => warn!("Metadata payload unusable, using defaults: {}", err),
            }
        } else {
            warn!(
                "Metadata call failed, using defaults: {}",
                status.failure_cause()
            );
        }
        PublicationMetadata::fallback(topic)
    }

    /// Execute one skill call with a fresh correlation id
    ///
    /// Mirrors the client's contract: even input-encoding problems come
    /// back as a failed result instead of an error.
    async fn call<T: Serialize>(
        &self,
        client: &AgentClient,
        skill: &str,
        payload: &T,
    ) -> TaskStatus {
        match Task::new(skill).with_payload(payload) {
            Ok(task) => {
                let task = task.with_task_id(Uuid::now_v7().to_string());
                client.execute(&task).await
            }
            Err(err) => TaskStatus::failed(format!("could not encode task input: {}", err)),
        }
    }
}

fn require_skill(card: &AgentCard, skill: &str) -> A2AResult<()> {
    if card.has_skill(skill) {
        Ok(())
    } else {
        Err(A2AError::MissingSkill {
            agent: card.name.clone(),
            skill: skill.to_string(),
        })
    }
}

/// Decode a reviewer verdict, holding the score to the 0-100 contract
fn parse_verdict(review: &TaskStatus) -> A2AResult<ReviewVerdict> {
    let verdict: ReviewVerdict = review.parse_output()?;
    if verdict.score > 100 {
        return Err(A2AError::Validation(format!(
            "score {} is outside the 0-100 range",
            verdict.score
        )));
    }
    Ok(verdict)
}

/// Composite instruction sent to the generator after a rejection
///
/// Carries the reviewer's feedback verbatim together with the original
/// topic and duration constraint; the orchestrator never summarizes or
/// truncates feedback.
fn retry_instruction(feedback: &str, topic: &str, duration_hint: Option<f64>) -> String {
    let duration = duration_hint
        .map(|seconds| format!("{} seconds", seconds))
        .unwrap_or_else(|| "not specified".to_string());
    format!(
        "Previous content was REJECTED by the reviewer.\n\n\
         REJECTION REASON:\n{}\n\n\
         ORIGINAL REQUEST: {}\n\
         REQUIRED DURATION: {}\n\n\
         Produce a new version that fixes every issue while staying true to the original request.",
        feedback, topic, duration
    )
}
