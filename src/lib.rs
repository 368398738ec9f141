//! # A2A Greenlight
//!
//! Agent-to-agent task services with a bounded generate/review negotiation
//! orchestrator.
//!
//! This library provides a small HTTP+JSON implementation of the
//! Agent2Agent (A2A) protocol: agents advertise their skills through agent
//! cards, accept single-shot tasks, and report results as task statuses.
//! On top of it sits a negotiation workflow in which a generator agent
//! drafts content, a reviewer agent judges it, and rejections feed back
//! into revised drafts until approval or an iteration bound.
//!
//! ## Features
//!
//! - **Protocol Core**: Agent cards, tasks, and task statuses with strict
//!   state invariants
//! - **Agent Servers**: Axum-based HTTP servers hosting async or blocking
//!   skill handlers
//! - **Resilient Client**: Task execution that folds every transport
//!   failure into a failed result
//! - **Negotiation Loop**: Bounded iterative refinement with a complete
//!   conversation log
//!
//! ## Example
//!
//! ```rust,no_run
//! use a2a_greenlight::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoints = AgentEndpoints::from_env()?;
//!     let negotiator = Negotiator::connect(&endpoints).await?;
//!
//!     let outcome = negotiator
//!         .run_negotiation("A rainy day in Seoul", Some(45.0), None)
//!         .await;
//!     if outcome.success {
//!         println!("Approved after {} iterations", outcome.iterations);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod client;
pub mod config;
pub mod negotiation;
pub mod protocol;
pub mod server;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        agents::{GeneratorAgent, GeneratorEngine, ReviewVerdict, ReviewerAgent, ReviewerEngine},
        client::{AgentClient, ClientConfig},
        config::AgentEndpoints,
        negotiation::{NegotiationConfig, NegotiationOutcome, Negotiator},
        protocol::error::A2AError,
        protocol::{AgentCard, AgentSkill, Task, TaskState, TaskStatus},
        server::AgentServer,
    };
}
