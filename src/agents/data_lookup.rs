use crate::agents::Agent;
use crate::agents::router::DataRoute;
use crate::llm::LLMClient;
use crate::tools::LiveDataLookup;
use crate::types::{AgentKind, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Live data agent.
///
/// `weather:`, `news:` and `stock:` tasks go to the matching lookup; anything
/// else is answered by the language model with the agent's system prompt.
pub struct DataLookupAgent {
    key: String,
    description: String,
    system_prompt: String,
    llm: Arc<dyn LLMClient>,
    live: Arc<dyn LiveDataLookup>,
}

impl DataLookupAgent {
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        system_prompt: impl Into<String>,
        llm: Arc<dyn LLMClient>,
        live: Arc<dyn LiveDataLookup>,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            system_prompt: system_prompt.into(),
            llm,
            live,
        }
    }
}

#[async_trait]
impl Agent for DataLookupAgent {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> AgentKind {
        AgentKind::DataLookup
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self, input: &str) -> Result<String> {
        let route = DataRoute::parse(input);
        tracing::debug!(agent = %self.key, route = ?route, "Data lookup");

        match route {
            DataRoute::Weather(city) => Ok(self.live.weather(city).await),
            DataRoute::News(topic) => Ok(self.live.news(topic).await),
            DataRoute::Stock(symbol) => Ok(self.live.stock(symbol).await),
            DataRoute::GeneralQuery(query) => {
                self.llm
                    .generate_with_system(&self.system_prompt, query)
                    .await
            }
        }
    }
}
