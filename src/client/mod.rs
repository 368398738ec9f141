//! High-level client API for A2A protocol

pub mod agent;
pub mod config;

pub use agent::AgentClient;
pub use config::ClientConfig;
