//! Protocol server exposing a decision function over HTTP

pub mod handler;
pub mod router;

pub use handler::{blocking_skill_fn, skill_fn, BlockingSkill, SkillFn, SkillHandler};
pub use router::AgentServer;
