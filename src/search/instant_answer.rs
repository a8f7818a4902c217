//! Instant-answer provider (DuckDuckGo API).

use crate::search::source::{SourceClient, SourceError, SourceId};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Related topics consulted when the direct answer fields are empty
const RELATED_TOPIC_LIMIT: usize = 2;

pub struct InstantAnswerClient {
    client: Client,
    base_url: String,
}

impl InstantAnswerClient {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl SourceClient for InstantAnswerClient {
    fn id(&self) -> SourceId {
        SourceId::InstantAnswer
    }

    async fn lookup(&self, query: &str) -> Result<Option<String>, SourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_redirect", "1"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        // The API answers with `application/x-javascript`, so decode by hand
        let body = response.text().await?;
        let data: Value =
            serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))?;

        let text = extract_instant_answer(&data);
        tracing::debug!(query, chars = text.len(), "Instant answer lookup finished");

        Ok(Some(text).filter(|t| !t.is_empty()))
    }
}

/// Pull the best available text out of an instant-answer payload.
///
/// Prefers `AbstractText`, then `Definition`, then `Answer`. When all three are
/// empty, joins the `Text` of the first related topics.
pub fn extract_instant_answer(data: &Value) -> String {
    let field = |name: &str| {
        data.get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
    };

    if let Some(direct) = ["AbstractText", "Definition", "Answer"]
        .into_iter()
        .map(field)
        .find(|text| !text.is_empty())
    {
        return direct.to_string();
    }

    data.get("RelatedTopics")
        .and_then(Value::as_array)
        .map(|topics| {
            topics
                .iter()
                .take(RELATED_TOPIC_LIMIT)
                .filter_map(|topic| topic.get("Text").and_then(Value::as_str))
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}
