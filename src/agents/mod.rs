//! Agents, the capability registry and the delegation pipeline
//!
//! A request flows through the [`RequestOrchestrator`]: the planner agent runs
//! once, its output is scanned for a delegation directive by the
//! [`DelegationParser`], and the [`CapabilityRouter`] hands the task to the
//! named agent. Anything that does not parse or route cleanly falls back to the
//! planner's own text.

/// Single-turn agents driven by a system prompt.
pub mod conversational;
/// Live data agent with prefix sub-routing.
pub mod data_lookup;
/// Delegation directive extraction and validation.
pub mod delegation;
/// Request state machine.
pub mod orchestrator;
/// Built-in prompts and descriptions.
pub mod prompts;
/// Capability registry.
pub mod registry;
/// Directive to capability routing.
pub mod router;
/// Agent wrapper around the search aggregator.
pub mod search_agent;

use crate::llm::TextStream;
use crate::types::{AgentKind, Result};
use async_trait::async_trait;

pub use conversational::ConversationalAgent;
pub use data_lookup::DataLookupAgent;
pub use delegation::{DelegationDirective, DelegationParser, ParseFailure};
pub use orchestrator::{OrchestratorReply, RequestOrchestrator};
pub use registry::{AgentRegistry, AgentRegistryBuilder};
pub use router::{CapabilityRouter, DataRoute};
pub use search_agent::SearchAgent;

/// Base trait for all agents
#[async_trait]
pub trait Agent: Send + Sync {
    /// Registry key, also used as the delegation target name
    fn key(&self) -> &str;

    fn kind(&self) -> AgentKind;

    fn description(&self) -> &str;

    /// Run one exchange and return the complete reply
    async fn execute(&self, input: &str) -> Result<String>;

    /// Stream the reply. Agents without native streaming yield one chunk.
    async fn stream(&self, input: &str) -> Result<TextStream> {
        let reply = self.execute(input).await?;
        Ok(Box::new(futures::stream::iter(vec![Ok(reply)])))
    }
}
