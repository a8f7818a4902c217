use crate::agents::Agent;
use crate::llm::{LLMClient, TextStream};
use crate::types::{AgentKind, Result};
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;

/// Reply used when the model produced no text
pub const EMPTY_REPLY: &str = "No response";

/// Agent whose behavior is entirely its system prompt.
///
/// Used for the planner and for the task and tool specialists. Each call is a
/// single independent exchange; nothing is remembered between calls.
pub struct ConversationalAgent {
    key: String,
    description: String,
    system_prompt: String,
    llm: Arc<dyn LLMClient>,
}

impl ConversationalAgent {
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        system_prompt: impl Into<String>,
        llm: Arc<dyn LLMClient>,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            system_prompt: system_prompt.into(),
            llm,
        }
    }
}

#[async_trait]
impl Agent for ConversationalAgent {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Conversational
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self, input: &str) -> Result<String> {
        let mut stream = self.stream(input).await?;
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            buffer.push_str(&chunk?);
        }

        tracing::debug!(agent = %self.key, chars = buffer.len(), "Agent reply collected");

        if buffer.trim().is_empty() {
            return Ok(EMPTY_REPLY.to_string());
        }

        Ok(buffer)
    }

    async fn stream(&self, input: &str) -> Result<TextStream> {
        self.llm.stream_with_system(&self.system_prompt, input).await
    }
}
