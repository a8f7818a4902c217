//! Encyclopedia provider (Wikipedia).
//!
//! Three endpoint strategies are tried in order and the first usable text wins:
//! a plain-text extract, a longer extract, and the REST page summary. A strategy
//! that errors is logged and skipped; the lookup only fails when all of them do.

use crate::search::source::{SourceClient, SourceError, SourceId};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Extracts shorter than this are treated as stubs
const MIN_EXTRACT_CHARS: usize = 100;

/// Marker phrase of disambiguation pages
const DISAMBIGUATION_MARKER: &str = "may refer to:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    FullExtract,
    ExtendedExtract,
    RestSummary,
}

impl Strategy {
    const ORDER: [Strategy; 3] = [
        Strategy::FullExtract,
        Strategy::ExtendedExtract,
        Strategy::RestSummary,
    ];

    fn name(&self) -> &'static str {
        match self {
            Strategy::FullExtract => "full_extract",
            Strategy::ExtendedExtract => "extended_extract",
            Strategy::RestSummary => "rest_summary",
        }
    }
}

pub struct EncyclopediaClient {
    client: Client,
    api_url: String,
    rest_url: String,
}

impl EncyclopediaClient {
    pub fn new(
        api_url: impl Into<String>,
        rest_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            rest_url: rest_url.into(),
        })
    }

    async fn run(
        &self,
        strategy: Strategy,
        title: &str,
        raw_query: &str,
    ) -> Result<Option<String>, SourceError> {
        match strategy {
            Strategy::FullExtract => self.fetch_extract(title, 1500).await,
            Strategy::ExtendedExtract => self.fetch_extract(title, 2000).await,
            Strategy::RestSummary => match self.fetch_summary(title).await {
                Err(SourceError::Status(404)) if title != raw_query => {
                    debug!(title, raw_query, "Summary not found, retrying with raw query");
                    self.fetch_summary(raw_query).await
                }
                other => other,
            },
        }
    }

    async fn fetch_extract(
        &self,
        title: &str,
        max_chars: u32,
    ) -> Result<Option<String>, SourceError> {
        let max_chars = max_chars.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("titles", title),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("exsectionformat", "plain"),
                ("exchars", max_chars.as_str()),
                ("exlimit", "1"),
                ("redirects", "1"),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let data: Value = response.json().await?;
        Ok(page_extract(&data))
    }

    async fn fetch_summary(&self, title: &str) -> Result<Option<String>, SourceError> {
        let url = summary_url(&self.rest_url, title)?;
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let data: Value = response.json().await?;
        Ok(data
            .get("extract")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty() && !is_disambiguation(text))
            .map(str::to_string))
    }
}

#[async_trait]
impl SourceClient for EncyclopediaClient {
    fn id(&self) -> SourceId {
        SourceId::Encyclopedia
    }

    async fn lookup(&self, query: &str) -> Result<Option<String>, SourceError> {
        let raw_query = query.trim();
        let title = clean_title(raw_query);
        let mut last_error = None;
        let mut failures = 0;

        for strategy in Strategy::ORDER {
            match self.run(strategy, &title, raw_query).await {
                Ok(Some(text)) => {
                    debug!(
                        strategy = strategy.name(),
                        chars = text.len(),
                        "Encyclopedia lookup succeeded"
                    );
                    return Ok(Some(text));
                }
                Ok(None) => {
                    debug!(strategy = strategy.name(), "No usable encyclopedia content");
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "Encyclopedia strategy failed");
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if failures == Strategy::ORDER.len() => Err(e),
            _ => Ok(None),
        }
    }
}

/// Page title candidate: drops a " biography" suffix word and trims
pub fn clean_title(query: &str) -> String {
    query.replace(" biography", "").trim().to_string()
}

pub fn is_disambiguation(text: &str) -> bool {
    text.to_lowercase().contains(DISAMBIGUATION_MARKER)
}

/// First usable extract in a `query/pages` payload
fn page_extract(data: &Value) -> Option<String> {
    data.pointer("/query/pages")
        .and_then(Value::as_object)?
        .iter()
        .filter(|(page_id, _)| page_id.as_str() != "-1")
        .filter_map(|(_, page)| page.get("extract").and_then(Value::as_str))
        .map(str::trim)
        .find(|text| text.len() > MIN_EXTRACT_CHARS && !is_disambiguation(text))
        .map(str::to_string)
}

fn summary_url(base: &str, title: &str) -> Result<Url, SourceError> {
    let mut url =
        Url::parse(base).map_err(|e| SourceError::Transport(format!("invalid URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| SourceError::Transport(format!("URL cannot take a path: {}", base)))?
        .pop_if_empty()
        .push(&title.replace(' ', "_"));
    Ok(url)
}
