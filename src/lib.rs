//! # J.A.R.V.I.S - Multi-agent personal assistant server
//!
//! Routes a natural-language request to one of several specialist agents and,
//! for factual lookups, aggregates answers from an instant-answer service and an
//! encyclopedia before producing a single reply.
//!
//! ## Overview
//!
//! J.A.R.V.I.S can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `jarvis-server` binary
//! 2. **As a library** - Build an [`AppState`] and drive the orchestrator directly
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use jarvis::{AppState, JarvisConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = JarvisConfig::load("jarvis.toml")?;
//!     let state = AppState::from_config(config).await?;
//!
//!     let reply = state.orchestrator.process("What's the weather in Tokyo?").await?;
//!     println!("[{}] {}", reply.agent_used, reply.response);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `openai` | OpenAI-compatible APIs such as Groq (default) |
//! | `ollama` | Ollama local inference |
//!
//! ## Modules
//!
//! - [`agents`] - Agents, capability registry, delegation parsing and routing
//! - [`search`] - Multi-source search aggregation
//! - [`tools`] - Weather, news and stock lookups
//! - [`llm`] - LLM client implementations
//! - [`api`] - REST API handlers and routes
//! - [`types`] - Common types and error handling

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Agents, registry and the delegation pipeline.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command line parsing and terminal output.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Multi-source search aggregation.
pub mod search;
/// Live data collaborators.
pub mod tools;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{AgentRegistry, AgentRegistryBuilder, OrchestratorReply, RequestOrchestrator};
pub use llm::{LLMClient, LLMClientFactory, Provider};
pub use search::SearchAggregator;
pub use tools::{LiveDataClient, LiveDataLookup};
pub use types::{AppError, Result};
pub use utils::toml_config::JarvisConfig;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML configuration the process was started with
    pub config: Arc<JarvisConfig>,
    /// Read-only capability registry
    pub registry: Arc<AgentRegistry>,
    /// Planner-driven request pipeline
    pub orchestrator: Arc<RequestOrchestrator>,
}

impl AppState {
    /// Assemble state around an already-built registry
    pub fn new(config: Arc<JarvisConfig>, registry: Arc<AgentRegistry>) -> Self {
        Self {
            orchestrator: Arc::new(RequestOrchestrator::new(registry.clone())),
            config,
            registry,
        }
    }

    /// Build every collaborator from configuration.
    ///
    /// One LLM client is shared by the planner, the agents and the summarizer.
    pub async fn from_config(config: JarvisConfig) -> Result<Self> {
        let provider = Provider::from_config(&config)?;
        let factory = LLMClientFactory::new(provider);
        let llm = factory.create_shared().await?;
        tracing::info!(
            provider = factory.default_provider().name(),
            model = llm.model_name(),
            "LLM client ready"
        );

        let live: Arc<dyn LiveDataLookup> = Arc::new(LiveDataClient::from_config(&config)?);
        let aggregator = Arc::new(
            SearchAggregator::from_config(&config.search, llm.clone())
                .map_err(|e| AppError::Configuration(format!("Search sources: {}", e)))?,
        );

        let registry = AgentRegistry::from_config(&config, llm, live, aggregator)?;

        Ok(Self::new(Arc::new(config), Arc::new(registry)))
    }
}
