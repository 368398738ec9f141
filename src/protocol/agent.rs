//! Agent discovery and capability types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use super::PROTOCOL_VERSION;

/// Agent Card for agent discovery
///
/// The card is the machine-readable manifest an agent publishes at its
/// capability endpoint: identity, offered skills, and transport modes.
/// It is constructed once at service start and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentCard {
    /// Name of the agent
    pub name: String,

    /// Human-readable description of the agent
    pub description: String,

    /// Base URL the agent is reachable at
    pub url: Url,

    /// Agent version
    #[serde(default = "default_version")]
    pub version: String,

    /// Version of the A2A protocol the agent speaks
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,

    /// Skills the agent offers
    #[serde(default)]
    pub skills: Vec<AgentSkill>,

    /// Transport the agent prefers for task submission
    #[serde(default)]
    pub preferred_transport: TransportProtocol,

    /// Supported input content modes
    #[serde(default = "default_modes")]
    pub default_input_modes: Vec<String>,

    /// Supported output content modes
    #[serde(default = "default_modes")]
    pub default_output_modes: Vec<String>,

    /// Optional capability flag set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<AgentCapabilities>,

    /// Whether an authenticated extended card is available
    #[serde(default)]
    pub supports_authenticated_extended_card: bool,
}

impl AgentCard {
    /// Create a new agent card with protocol defaults
    pub fn new(name: impl Into<String>, description: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url,
            version: default_version(),
            protocol_version: default_protocol_version(),
            skills: Vec::new(),
            preferred_transport: TransportProtocol::default(),
            default_input_modes: default_modes(),
            default_output_modes: default_modes(),
            capabilities: None,
            supports_authenticated_extended_card: false,
        }
    }

    /// Set the agent version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Add a skill to the card
    pub fn with_skill(mut self, skill: AgentSkill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Set the capability flag set
    pub fn with_capabilities(mut self, capabilities: AgentCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Look up a skill by identifier
    pub fn skill(&self, id: &str) -> Option<&AgentSkill> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    /// Check whether the card advertises a skill
    pub fn has_skill(&self, id: &str) -> bool {
        self.skill(id).is_some()
    }

    /// Identifiers of all advertised skills
    pub fn skill_ids(&self) -> Vec<&str> {
        self.skills.iter().map(|skill| skill.id.as_str()).collect()
    }
}

/// One named operation an agent can perform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSkill {
    /// Identifier, unique within the owning card
    pub id: String,

    /// Human-readable skill name
    pub name: String,

    /// What the skill does
    pub description: String,

    /// Example invocations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,

    /// Classification tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl AgentSkill {
    /// Create a new skill descriptor
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            examples: None,
            tags: None,
        }
    }

    /// Attach example invocations
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = Some(examples.into_iter().map(Into::into).collect());
        self
    }

    /// Attach classification tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Agent capability flags
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentCapabilities {
    /// Supports streaming responses
    #[serde(default)]
    pub streaming: bool,

    /// Free-form capability extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl AgentCapabilities {
    /// Create capabilities with default values (all off)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable streaming
    pub fn with_streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    /// Add a capability extension
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Transport bindings an agent can prefer
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransportProtocol {
    /// Plain HTTP with JSON bodies
    #[default]
    #[serde(rename = "HTTP+JSON")]
    HttpJson,

    /// JSON-RPC over HTTP
    #[serde(rename = "JSONRPC")]
    JsonRpc,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_protocol_version() -> String {
    PROTOCOL_VERSION.to_string()
}

fn default_modes() -> Vec<String> {
    vec!["text".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("http://localhost:8001").unwrap()
    }

    #[test]
    fn test_agent_card_creation() {
        let card = AgentCard::new("GeneratorAgent", "Drafts content", base_url())
            .with_version("2.1.0")
            .with_skill(AgentSkill::new("generate", "Content Generation", "Drafts content"))
            .with_capabilities(AgentCapabilities::new());

        assert_eq!(card.name, "GeneratorAgent");
        assert_eq!(card.version, "2.1.0");
        assert_eq!(card.protocol_version, PROTOCOL_VERSION);
        assert_eq!(card.preferred_transport, TransportProtocol::HttpJson);
        assert_eq!(card.default_input_modes, vec!["text".to_string()]);
        assert!(!card.supports_authenticated_extended_card);
    }

    #[test]
    fn test_skill_lookup() {
        let card = AgentCard::new("ReviewerAgent", "Judges content", base_url())
            .with_skill(AgentSkill::new("review", "Content Review", "Judges drafts"));

        assert!(card.has_skill("review"));
        assert!(!card.has_skill("generate"));
        assert_eq!(card.skill_ids(), vec!["review"]);
        assert_eq!(card.skill("review").map(|s| s.name.as_str()), Some("Content Review"));
    }

    #[test]
    fn test_skill_builders() {
        let skill = AgentSkill::new("generate", "Content Generation", "Drafts content")
            .with_examples(["Draft a storyboard for 'Rain'"])
            .with_tags(["generation", "drafting"]);

        assert_eq!(skill.examples.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            skill.tags,
            Some(vec!["generation".to_string(), "drafting".to_string()])
        );
    }

    #[test]
    fn test_agent_capabilities() {
        let caps = AgentCapabilities::new()
            .with_streaming()
            .with_extension("negotiation", true);

        assert!(caps.streaming);
        assert!(caps.extensions.as_ref().is_some_and(|e| e.contains_key("negotiation")));
    }

    #[test]
    fn test_agent_card_serialization() {
        let card = AgentCard::new("GeneratorAgent", "Drafts content", base_url())
            .with_capabilities(AgentCapabilities::new());

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"name\":\"GeneratorAgent\""));
        assert!(json.contains("\"protocol_version\":\"0.3.0\""));
        assert!(json.contains("\"preferred_transport\":\"HTTP+JSON\""));

        let deserialized: AgentCard = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }

    #[test]
    fn test_agent_card_deserializes_with_defaults() {
        let json = r#"{
            "name": "ReviewerAgent",
            "description": "Judges content",
            "url": "http://localhost:8002"
        }"#;

        let card: AgentCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.version, "1.0.0");
        assert_eq!(card.protocol_version, "0.3.0");
        assert!(card.skills.is_empty());
        assert_eq!(card.default_output_modes, vec!["text".to_string()]);
        assert!(card.capabilities.is_none());
    }
}
