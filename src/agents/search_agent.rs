use crate::agents::Agent;
use crate::search::SearchAggregator;
use crate::types::{AgentKind, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Factual lookups through the multi-source aggregator
pub struct SearchAgent {
    key: String,
    description: String,
    aggregator: Arc<SearchAggregator>,
}

impl SearchAgent {
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        aggregator: Arc<SearchAggregator>,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            aggregator,
        }
    }
}

#[async_trait]
impl Agent for SearchAgent {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Search
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self, input: &str) -> Result<String> {
        Ok(self.aggregator.search(input).await)
    }
}
