//! HTTP surface of a protocol agent

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use futures::FutureExt;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::protocol::{
    AgentCard, HealthResponse, Task, TaskStatus, AGENT_CARD_PATH, HEALTH_PATH, TASKS_PATH,
};

use super::handler::{panic_payload_text, SkillHandler};

/// One agent service: a published card plus a bound decision function
///
/// The server exposes the fixed three-endpoint protocol surface. Card and
/// health requests are answered from memory; task submissions invoke the
/// bound [`SkillHandler`] and always answer HTTP 200 with a task result,
/// encoding handler failures inside the body. A panic raised while the
/// handler runs is caught at the dispatch point and reported the same way.
pub struct AgentServer {
    card: Arc<AgentCard>,
    handler: Arc<dyn SkillHandler>,
}

#[derive(Clone)]
struct AgentState {
    card: Arc<AgentCard>,
    handler: Arc<dyn SkillHandler>,
}

impl AgentServer {
    /// Bind a card and a decision function into a servable agent
    pub fn new(card: AgentCard, handler: impl SkillHandler) -> Self {
        Self {
            card: Arc::new(card),
            handler: Arc::new(handler),
        }
    }

    /// The card this server publishes
    pub fn card(&self) -> &AgentCard {
        &self.card
    }

    /// Build the protocol router
    ///
    /// Useful when the agent's routes are nested into a larger application;
    /// [`AgentServer::serve`] covers the standalone case.
    pub fn router(&self) -> Router {
        let state = AgentState {
            card: Arc::clone(&self.card),
            handler: Arc::clone(&self.handler),
        };
        Router::new()
            .route(AGENT_CARD_PATH, get(agent_card))
            .route(TASKS_PATH, post(submit_task))
            .route(HEALTH_PATH, get(health))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Serve the agent on an already-bound listener until shutdown
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the accept loop.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        if let Ok(addr) = listener.local_addr() {
            info!("Agent '{}' listening on {}", self.card.name, addr);
        }
        axum::serve(listener, self.router()).await
    }
}

async fn agent_card(State(state): State<AgentState>) -> Json<AgentCard> {
    Json(state.card.as_ref().clone())
}

async fn health(State(state): State<AgentState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(&state.card.name))
}

async fn submit_task(
    State(state): State<AgentState>,
    Json(task): Json<Task>,
) -> Json<TaskStatus> {
    let skill = task.skill.clone();
    debug!("Task received for skill '{}' (id {:?})", skill, task.task_id);

    // A handler panic surfaces as a failed result, never a dropped connection
    let outcome = AssertUnwindSafe(state.handler.handle(task))
        .catch_unwind()
        .await;
    let status = match outcome {
        Ok(Ok(status)) => status,
        Ok(Err(err)) => {
            warn!("Decision function for skill '{}' failed: {:#}", skill, err);
            TaskStatus::failed(format!("{:#}", err))
                .with_message(format!("Task execution failed for skill '{}'", skill))
        }
        Err(payload) => {
            warn!("Decision function for skill '{}' panicked", skill);
            TaskStatus::failed(format!("skill handler panicked: {}", panic_payload_text(payload)))
                .with_message(format!("Task execution failed for skill '{}'", skill))
        }
    };
    Json(status)
}
