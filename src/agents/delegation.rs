//! Delegation directive extraction
//!
//! The planner delegates by embedding `{"agent":"<key>","task":"..."}` in its
//! reply. The object is located with a first `{` / last `}` scan, so text that
//! contains more than one brace group (or braces inside the task itself) may not
//! decode; such replies take the fallback path.

use crate::agents::registry::AgentRegistry;
use serde::Deserialize;

/// A validated hand-off from the planner to a registered capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationDirective {
    capability_key: String,
    task_description: String,
}

impl DelegationDirective {
    pub fn capability_key(&self) -> &str {
        &self.capability_key
    }

    pub fn task_description(&self) -> &str {
        &self.task_description
    }
}

/// Why planner output did not yield a directive
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    #[error("no JSON object found in planner output")]
    NoJsonFound,

    #[error("malformed delegation JSON: {0}")]
    MalformedJson(String),

    #[error("agent '{0}' cannot receive delegated work")]
    UnroutableAgent(String),
}

#[derive(Debug, Deserialize)]
struct RawDirective {
    agent: Option<String>,
    #[serde(default)]
    task: String,
}

/// Substring from the first `{` through the last `}`, if they are ordered
pub fn extract_json_block(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Validates planner output against a registry
pub struct DelegationParser<'a> {
    registry: &'a AgentRegistry,
}

impl<'a> DelegationParser<'a> {
    pub fn new(registry: &'a AgentRegistry) -> Self {
        Self { registry }
    }

    pub fn parse(&self, raw_text: &str) -> Result<DelegationDirective, ParseFailure> {
        let block = extract_json_block(raw_text).ok_or(ParseFailure::NoJsonFound)?;

        let directive: RawDirective = serde_json::from_str(block)
            .map_err(|e| ParseFailure::MalformedJson(e.to_string()))?;

        let key = directive.agent.unwrap_or_default();
        if key == self.registry.planner_key() || !self.registry.contains(&key) {
            return Err(ParseFailure::UnroutableAgent(key));
        }

        Ok(DelegationDirective {
            capability_key: key,
            task_description: directive.task.trim().to_string(),
        })
    }
}
