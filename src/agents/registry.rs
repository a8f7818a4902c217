//! Capability registry
//!
//! Built once at startup and shared as `Arc<AgentRegistry>`. Nothing mutates it
//! afterwards, so the orchestrator, router and HTTP handlers read it freely.

use crate::agents::{
    Agent, ConversationalAgent, DataLookupAgent, SearchAgent, prompts,
};
use crate::llm::LLMClient;
use crate::search::SearchAggregator;
use crate::tools::LiveDataLookup;
use crate::types::{AppError, Result};
use crate::utils::toml_config::JarvisConfig;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key of the planning agent
pub const PLANNER_KEY: &str = "planner";

pub struct AgentRegistry {
    agents: BTreeMap<String, Arc<dyn Agent>>,
    planner_key: String,
}

impl AgentRegistry {
    pub fn builder(planner_key: impl Into<String>) -> AgentRegistryBuilder {
        AgentRegistryBuilder::new(planner_key)
    }

    /// Build the standard planner, task, tool, api and search agents.
    ///
    /// `[agents.<key>]` entries in the configuration override prompts and
    /// descriptions of the matching agent.
    pub fn from_config(
        config: &JarvisConfig,
        llm: Arc<dyn LLMClient>,
        live: Arc<dyn LiveDataLookup>,
        aggregator: Arc<SearchAggregator>,
    ) -> Result<Self> {
        let prompt = |key: &str| {
            config
                .get_agent(key)
                .and_then(|a| a.system_prompt.clone())
                .unwrap_or_else(|| prompts::system_prompt(key).to_string())
        };
        let description = |key: &str| {
            config
                .get_agent(key)
                .and_then(|a| a.description.clone())
                .unwrap_or_else(|| prompts::description(key).to_string())
        };

        let mut builder = Self::builder(PLANNER_KEY);
        for key in [PLANNER_KEY, "task", "tool"] {
            builder = builder.register(Arc::new(ConversationalAgent::new(
                key,
                description(key),
                prompt(key),
                llm.clone(),
            )));
        }

        builder
            .register(Arc::new(DataLookupAgent::new(
                "api",
                description("api"),
                prompt("api"),
                llm,
                live,
            )))
            .register(Arc::new(SearchAgent::new(
                "search",
                description("search"),
                aggregator,
            )))
            .build()
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.agents.contains_key(key)
    }

    /// Registered keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }

    pub fn planner_key(&self) -> &str {
        &self.planner_key
    }

    /// The planning agent; present by construction
    pub fn planner(&self) -> Result<Arc<dyn Agent>> {
        self.get(&self.planner_key)
            .ok_or_else(|| AppError::Internal("Planner agent missing from registry".to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Agent>> {
        self.agents.values()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Collects agents before freezing them into an [`AgentRegistry`]
pub struct AgentRegistryBuilder {
    agents: BTreeMap<String, Arc<dyn Agent>>,
    planner_key: String,
}

impl AgentRegistryBuilder {
    pub fn new(planner_key: impl Into<String>) -> Self {
        Self {
            agents: BTreeMap::new(),
            planner_key: planner_key.into(),
        }
    }

    /// Register an agent under its own key, replacing any earlier one
    pub fn register(mut self, agent: Arc<dyn Agent>) -> Self {
        self.agents.insert(agent.key().to_string(), agent);
        self
    }

    pub fn build(self) -> Result<AgentRegistry> {
        if !self.agents.contains_key(&self.planner_key) {
            return Err(AppError::Configuration(format!(
                "Planner agent '{}' is not registered",
                self.planner_key
            )));
        }

        tracing::info!(
            agents = ?self.agents.keys().collect::<Vec<_>>(),
            "Agent registry initialized"
        );

        Ok(AgentRegistry {
            agents: self.agents,
            planner_key: self.planner_key,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::registry_with_keys;
    use super::*;

    #[test]
    fn test_build_requires_planner() {
        let result = AgentRegistry::builder(PLANNER_KEY).build();
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_keys_are_sorted() {
        let registry = registry_with_keys(&["tool", "planner", "api"]);
        assert_eq!(registry.keys(), vec!["api", "planner", "tool"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("api"));
        assert!(!registry.contains("search"));
    }

    #[tokio::test]
    async fn test_planner_lookup() {
        let registry = registry_with_keys(&["planner"]);
        let planner = registry.planner().unwrap();
        assert_eq!(planner.execute("hi").await.unwrap(), "[planner] hi");
    }
}
