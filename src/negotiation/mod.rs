//! Iterative generate/review negotiation between two agents
//!
//! The [`Negotiator`] submits a topic to a generator agent, has a reviewer
//! agent judge the draft, and feeds rejections back verbatim until the
//! content is approved or the iteration bound is reached. Every run yields
//! a [`NegotiationOutcome`] carrying the full conversation log.

pub mod orchestrator;
pub mod outcome;

pub use orchestrator::{NegotiationConfig, Negotiator};
pub use outcome::{
    AgentAction, ConversationEntry, FailureKind, NegotiationFailure, NegotiationOutcome,
};
