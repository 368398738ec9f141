//! Shared fixtures: scripted engines and in-process agent servers
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::net::TcpListener;
use url::Url;

use a2a_greenlight::{
    agents::{
        GeneratorAgent, GeneratorEngine, GeneratorInput, MetadataInput, PublicationMetadata,
        ReviewVerdict, ReviewerAgent, ReviewerEngine, ReviewerInput,
    },
    config::AgentEndpoints,
    server::AgentServer,
};

/// Generator engine producing numbered drafts and recording every input
#[derive(Clone, Default)]
pub struct ScriptedGenerator {
    state: Arc<GeneratorState>,
}

#[derive(Default)]
struct GeneratorState {
    calls: AtomicUsize,
    metadata_calls: AtomicUsize,
    inputs: Mutex<Vec<GeneratorInput>>,
    generate_error: Option<String>,
    metadata_error: Option<String>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose generate skill always errors with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            state: Arc::new(GeneratorState {
                generate_error: Some(message.to_string()),
                ..GeneratorState::default()
            }),
        }
    }

    /// Engine whose metadata skill errors while generation keeps working
    pub fn broken_metadata(message: &str) -> Self {
        Self {
            state: Arc::new(GeneratorState {
                metadata_error: Some(message.to_string()),
                ..GeneratorState::default()
            }),
        }
    }

    pub fn generate_calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn metadata_calls(&self) -> usize {
        self.state.metadata_calls.load(Ordering::SeqCst)
    }

    /// Inputs seen by the generate skill, in call order
    pub fn recorded_inputs(&self) -> Vec<GeneratorInput> {
        self.state.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeneratorEngine for ScriptedGenerator {
    async fn generate(&self, input: &GeneratorInput) -> anyhow::Result<String> {
        let call = self.state.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.inputs.lock().unwrap().push(input.clone());
        if let Some(message) = &self.state.generate_error {
            return Err(anyhow!("{}", message));
        }
        Ok(format!("Draft {}: {}", call, input.topic_or_feedback))
    }

    async fn publication_metadata(
        &self,
        input: &MetadataInput,
    ) -> anyhow::Result<PublicationMetadata> {
        self.state.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.state.metadata_error {
            return Err(anyhow!("{}", message));
        }
        Ok(PublicationMetadata {
            title: format!("{} (scripted)", input.topic),
            description: format!("Scripted metadata for {}", input.topic),
            tags: vec!["scripted".to_string()],
        })
    }
}

/// Reviewer engine replaying a fixed verdict script
///
/// Verdicts are consumed front to back; once the script runs dry every
/// further review returns the fallback verdict.
#[derive(Clone)]
pub struct ScriptedReviewer {
    state: Arc<ReviewerState>,
}

struct ReviewerState {
    calls: AtomicUsize,
    script: Mutex<VecDeque<ReviewVerdict>>,
    inputs: Mutex<Vec<ReviewerInput>>,
    fallback: ReviewVerdict,
    error: Option<String>,
}

impl ReviewerState {
    fn with_fallback(fallback: ReviewVerdict) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(VecDeque::new()),
            inputs: Mutex::new(Vec::new()),
            fallback,
            error: None,
        }
    }
}

impl ScriptedReviewer {
    pub fn new(
        script: impl IntoIterator<Item = ReviewVerdict>,
        fallback: ReviewVerdict,
    ) -> Self {
        let state = ReviewerState {
            script: Mutex::new(script.into_iter().collect()),
            ..ReviewerState::with_fallback(fallback)
        };
        Self {
            state: Arc::new(state),
        }
    }

    /// Reviewer that renders the same verdict on every call
    pub fn always(verdict: ReviewVerdict) -> Self {
        Self::new([], verdict)
    }

    /// Reviewer whose review skill always errors with `message`
    pub fn failing(message: &str) -> Self {
        let state = ReviewerState {
            error: Some(message.to_string()),
            ..ReviewerState::with_fallback(ReviewVerdict::rejection("unreachable", 0))
        };
        Self {
            state: Arc::new(state),
        }
    }

    pub fn review_calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Inputs seen by the review skill, in call order
    pub fn recorded_inputs(&self) -> Vec<ReviewerInput> {
        self.state.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewerEngine for ScriptedReviewer {
    async fn review(&self, input: &ReviewerInput) -> anyhow::Result<ReviewVerdict> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        self.state.inputs.lock().unwrap().push(input.clone());
        if let Some(message) = &self.state.error {
            return Err(anyhow!("{}", message));
        }
        let next = self.state.script.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.state.fallback.clone()))
    }
}

/// Serve an agent on an ephemeral local port, detached from the test
pub async fn spawn_server(build: impl FnOnce(Url) -> AgentServer) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url: Url = format!("http://{}", listener.local_addr().unwrap())
        .parse()
        .unwrap();
    let server = build(base_url.clone());
    tokio::spawn(async move {
        server.serve(listener).await.unwrap();
    });
    base_url
}

pub async fn spawn_generator(engine: ScriptedGenerator) -> Url {
    spawn_server(|url| GeneratorAgent::new(engine).into_server(url)).await
}

pub async fn spawn_reviewer(engine: ScriptedReviewer) -> Url {
    spawn_server(|url| ReviewerAgent::new(engine).into_server(url)).await
}

/// Spin up a full generator/reviewer pair and return its endpoints
pub async fn spawn_pair(
    generator: ScriptedGenerator,
    reviewer: ScriptedReviewer,
) -> AgentEndpoints {
    let generator_url = spawn_generator(generator).await;
    let reviewer_url = spawn_reviewer(reviewer).await;
    AgentEndpoints::new(generator_url, reviewer_url)
}
