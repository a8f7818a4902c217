use crate::agents::delegation::{DelegationDirective, DelegationParser, ParseFailure};
use crate::agents::registry::AgentRegistry;
use crate::agents::router::CapabilityRouter;
use crate::types::Result;
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of one orchestrated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorReply {
    pub response: String,
    /// Agent whose output is returned; the planner on fallback
    pub agent_used: String,
    /// Whether the planner's output was routed to another agent
    pub delegated: bool,
}

enum State {
    AwaitingPlan,
    Parsing(String),
    Routed(DelegationDirective),
    Fallback { buffer: String, reason: ParseFailure },
    Completed(OrchestratorReply),
}

/// Runs the planner once and routes or returns its output.
///
/// Holds no per-request state; concurrent calls only share the read-only
/// registry.
pub struct RequestOrchestrator {
    registry: Arc<AgentRegistry>,
    router: CapabilityRouter,
}

impl RequestOrchestrator {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self {
            router: CapabilityRouter::new(registry.clone()),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    /// Process a user message through the planner.
    ///
    /// Planner or routed-agent failures are returned as errors. Planner output
    /// that does not parse or route is returned unchanged.
    pub async fn process(&self, message: &str) -> Result<OrchestratorReply> {
        let mut state = State::AwaitingPlan;

        loop {
            state = match state {
                State::AwaitingPlan => State::Parsing(self.plan(message).await?),

                State::Parsing(buffer) => {
                    match DelegationParser::new(&self.registry).parse(&buffer) {
                        Ok(directive) => State::Routed(directive),
                        Err(reason) => State::Fallback { buffer, reason },
                    }
                }

                State::Routed(directive) => {
                    info!(
                        agent = directive.capability_key(),
                        task = directive.task_description(),
                        "Planner delegated request"
                    );
                    let response = self.router.route(&directive).await?;

                    State::Completed(OrchestratorReply {
                        response,
                        agent_used: directive.capability_key().to_string(),
                        delegated: true,
                    })
                }

                State::Fallback { buffer, reason } => {
                    debug!(reason = %reason, "Returning planner output directly");

                    State::Completed(OrchestratorReply {
                        response: buffer,
                        agent_used: self.registry.planner_key().to_string(),
                        delegated: false,
                    })
                }

                State::Completed(reply) => return Ok(reply),
            };
        }
    }

    /// Send a message straight to one agent, bypassing the planner
    pub async fn chat_direct(&self, message: &str, agent_key: &str) -> Result<OrchestratorReply> {
        let Some(agent) = self.registry.get(agent_key) else {
            return Ok(OrchestratorReply {
                response: format!(
                    "Agent '{}' not found. Available: [{}]",
                    agent_key,
                    self.registry.keys().join(", ")
                ),
                agent_used: agent_key.to_string(),
                delegated: false,
            });
        };

        let response = agent.execute(message).await?;

        Ok(OrchestratorReply {
            response,
            agent_used: agent_key.to_string(),
            delegated: false,
        })
    }

    /// Run the planner once, accumulating its streamed output
    async fn plan(&self, message: &str) -> Result<String> {
        let planner = self.registry.planner()?;
        let mut stream = planner.stream(message).await?;
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            buffer.push_str(&chunk?);
        }

        debug!(chars = buffer.len(), "Planner output collected");
        Ok(buffer)
    }
}
