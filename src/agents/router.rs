use crate::agents::delegation::DelegationDirective;
use crate::agents::registry::AgentRegistry;
use crate::types::{AppError, Result};
use std::sync::Arc;

/// Sub-route of a data-lookup task, chosen by a case-insensitive prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRoute<'a> {
    Weather(&'a str),
    News(&'a str),
    Stock(&'a str),
    /// No recognised prefix; the whole task goes to the language model
    GeneralQuery(&'a str),
}

impl<'a> DataRoute<'a> {
    pub fn parse(task: &'a str) -> Self {
        let task = task.trim();

        if let Some(city) = strip_prefix_ignore_case(task, "weather:") {
            DataRoute::Weather(city)
        } else if let Some(topic) = strip_prefix_ignore_case(task, "news:") {
            DataRoute::News(topic)
        } else if let Some(symbol) = strip_prefix_ignore_case(task, "stock:") {
            DataRoute::Stock(symbol)
        } else {
            DataRoute::GeneralQuery(task)
        }
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(text[prefix.len()..].trim())
    } else {
        None
    }
}

/// Maps a delegation directive to the capability that handles it
pub struct CapabilityRouter {
    registry: Arc<AgentRegistry>,
}

impl CapabilityRouter {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self { registry }
    }

    /// Run the directive's task on its capability.
    ///
    /// The task text goes to the agent unchanged; data-lookup agents
    /// apply the prefix sub-routing themselves, search agents run the aggregator.
    pub async fn route(&self, directive: &DelegationDirective) -> Result<String> {
        let key = directive.capability_key();
        let agent = self.registry.get(key).ok_or_else(|| {
            AppError::NotFound(format!("No capability registered for '{}'", key))
        })?;

        tracing::debug!(
            agent = key,
            kind = ?agent.kind(),
            task_len = directive.task_description().len(),
            "Routing delegated task"
        );

        agent.execute(directive.task_description()).await
    }
}
