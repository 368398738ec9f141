//! Built-in agent roles and their skill contracts

pub mod generator;
pub mod reviewer;
pub mod skills;

pub use generator::{generator_card, GeneratorAgent, GeneratorEngine};
pub use reviewer::{reviewer_card, ReviewerAgent, ReviewerEngine};
pub use skills::{
    GeneratorInput, GeneratorOutput, MetadataInput, PublicationMetadata, ReviewVerdict,
    ReviewerInput, SkillRequest, GENERATE_SKILL, METADATA_SKILL, REVIEW_SKILL,
};
