//! Concurrent fan-out to the instant-answer and encyclopedia sources.

use crate::llm::LLMClient;
use crate::search::encyclopedia::EncyclopediaClient;
use crate::search::instant_answer::InstantAnswerClient;
use crate::search::normalizer::normalize;
use crate::search::source::{SourceClient, SourceError, SourceId, SourceOutcome, SourceResult};
use crate::search::summarizer::{Summarizer, raw_fallback};
use crate::utils::toml_config::SearchConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Marker line that prefixes every answer built from source content
pub const SUMMARY_MARKER: &str = "Summary:";

/// How the final text of an aggregation was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Generated(String),
    /// Raw labeled source texts, used when the summarizer failed
    Raw(String),
}

impl Summary {
    pub fn text(&self) -> &str {
        match self {
            Summary::Generated(text) | Summary::Raw(text) => text,
        }
    }
}

/// Per-request aggregation state. Never shared between requests.
#[derive(Debug, Clone)]
pub struct AggregatedAnswer {
    pub query: String,
    pub cleaned_query: String,
    sources: Vec<SourceResult>,
    summary: Option<Summary>,
}

impl AggregatedAnswer {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            cleaned_query: normalize(query),
            sources: Vec::with_capacity(2),
            summary: None,
        }
    }

    pub fn record(&mut self, result: SourceResult) {
        self.sources.push(result);
    }

    pub fn sources(&self) -> &[SourceResult] {
        &self.sources
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn has_content(&self) -> bool {
        self.sources.iter().any(SourceResult::has_content)
    }

    /// Outcome recorded for a source, if it was queried
    pub fn outcome(&self, id: SourceId) -> Option<&SourceOutcome> {
        self.sources
            .iter()
            .find(|s| s.source_id() == id)
            .map(SourceResult::outcome)
    }

    /// Final user-facing text
    pub fn render(&self) -> String {
        match &self.summary {
            Some(summary) => format!("{}\n{}", SUMMARY_MARKER, summary.text()),
            None => no_information_message(&self.query),
        }
    }
}

pub fn no_information_message(query: &str) -> String {
    format!(
        "No useful information found for \"{}\" from either {} or {}.",
        query,
        SourceId::InstantAnswer.name(),
        SourceId::Encyclopedia.name()
    )
}

pub struct SearchAggregator {
    instant: Arc<dyn SourceClient>,
    encyclopedia: Arc<dyn SourceClient>,
    summarizer: Summarizer,
    source_timeout: Duration,
}

impl SearchAggregator {
    pub fn new(
        instant: Arc<dyn SourceClient>,
        encyclopedia: Arc<dyn SourceClient>,
        summarizer: Summarizer,
        source_timeout: Duration,
    ) -> Self {
        Self {
            instant,
            encyclopedia,
            summarizer,
            source_timeout,
        }
    }

    /// Build the aggregator against the configured HTTP sources
    pub fn from_config(
        config: &SearchConfig,
        llm: Arc<dyn LLMClient>,
    ) -> Result<Self, SourceError> {
        let timeout = config.timeout();
        let instant = InstantAnswerClient::new(
            config.instant_answer_url.clone(),
            &config.user_agent,
            timeout,
        )?;
        let encyclopedia = EncyclopediaClient::new(
            config.encyclopedia_api_url.clone(),
            config.encyclopedia_rest_url.clone(),
            &config.user_agent,
            timeout,
        )?;

        Ok(Self::new(
            Arc::new(instant),
            Arc::new(encyclopedia),
            Summarizer::new(llm),
            timeout,
        ))
    }

    /// Fully formatted answer for `query`
    pub async fn search(&self, query: &str) -> String {
        self.aggregate(query).await.render()
    }

    /// Run both sources concurrently and summarize whatever came back.
    ///
    /// The instant-answer source receives the normalized query, the encyclopedia
    /// the original text. Neither call can cancel or fail the other.
    pub async fn aggregate(&self, query: &str) -> AggregatedAnswer {
        let mut answer = AggregatedAnswer::new(query);
        info!(query, cleaned = %answer.cleaned_query, "Searching");

        let (instant, encyclopedia) = tokio::join!(
            self.run_source(self.instant.as_ref(), &answer.cleaned_query),
            self.run_source(self.encyclopedia.as_ref(), query),
        );
        answer.record(instant);
        answer.record(encyclopedia);

        if !answer.has_content() {
            info!(query, "No source produced content, skipping summarization");
            return answer;
        }

        let summary = match self.summarizer.summarize(query, answer.sources()).await {
            Ok(text) => Summary::Generated(text),
            Err(e) => {
                warn!(query, error = %e, "Summarization failed, returning raw source text");
                Summary::Raw(raw_fallback(answer.sources()))
            }
        };
        answer.summary = Some(summary);

        answer
    }

    async fn run_source(&self, source: &dyn SourceClient, query: &str) -> SourceResult {
        let id = source.id();
        let outcome = match tokio::time::timeout(self.source_timeout, source.lookup(query)).await
        {
            Ok(Ok(Some(text))) if !text.trim().is_empty() => SourceOutcome::Ok(text),
            Ok(Ok(_)) => SourceOutcome::Empty,
            Ok(Err(SourceError::Timeout)) | Err(_) => SourceOutcome::TimedOut,
            Ok(Err(e)) => SourceOutcome::Failed(e.to_string()),
        };

        match &outcome {
            SourceOutcome::Failed(cause) => {
                warn!(source = %id, cause = %cause, "Source lookup failed")
            }
            SourceOutcome::TimedOut => warn!(source = %id, "Source lookup timed out"),
            other => info!(
                source = %id,
                outcome = other.label(),
                "Source lookup finished"
            ),
        }

        SourceResult::new(id, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LLMClient, TextStream};
    use crate::search::source::MockSourceClient;
    use crate::types::{AppError, Result};
    use async_trait::async_trait;
    use mockall::predicate::eq;

    struct FixedLLM(Option<&'static str>);

    #[async_trait]
    impl LLMClient for FixedLLM {
        async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| AppError::LLM("unavailable".to_string()))
        }

        async fn stream_with_system(&self, _system: &str, _prompt: &str) -> Result<TextStream> {
            Err(AppError::LLM("not used".to_string()))
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn source(
        id: SourceId,
        reply: std::result::Result<Option<String>, SourceError>,
    ) -> Arc<dyn SourceClient> {
        let mut mock = MockSourceClient::new();
        mock.expect_id().return_const(id);
        mock.expect_lookup().return_once(move |_| reply);
        Arc::new(mock)
    }

    fn aggregator(
        instant: Arc<dyn SourceClient>,
        encyclopedia: Arc<dyn SourceClient>,
        llm: Option<&'static str>,
    ) -> SearchAggregator {
        SearchAggregator::new(
            instant,
            encyclopedia,
            Summarizer::new(Arc::new(FixedLLM(llm))),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn test_sources_receive_cleaned_and_original_query() {
        let mut instant = MockSourceClient::new();
        instant.expect_id().return_const(SourceId::InstantAnswer);
        instant
            .expect_lookup()
            .with(eq("alan turing"))
            .times(1)
            .returning(|_| Ok(None));

        let mut encyclopedia = MockSourceClient::new();
        encyclopedia.expect_id().return_const(SourceId::Encyclopedia);
        encyclopedia
            .expect_lookup()
            .with(eq("Who is Alan Turing?"))
            .times(1)
            .returning(|_| Ok(None));

        let agg = aggregator(Arc::new(instant), Arc::new(encyclopedia), None);
        let answer = agg.search("Who is Alan Turing?").await;

        assert_eq!(
            answer,
            "No useful information found for \"Who is Alan Turing?\" from either DuckDuckGo or Wikipedia."
        );
    }

    #[tokio::test]
    async fn test_failure_is_recorded_as_explicit_outcome() {
        let agg = aggregator(
            source(SourceId::InstantAnswer, Err(SourceError::Status(503))),
            source(SourceId::Encyclopedia, Ok(Some("Text.".to_string()))),
            Some("Condensed."),
        );

        let answer = agg.aggregate("rust").await;
        assert!(matches!(
            answer.outcome(SourceId::InstantAnswer),
            Some(SourceOutcome::Failed(_))
        ));
        assert_eq!(
            answer.summary(),
            Some(&Summary::Generated("Condensed.".to_string()))
        );
        assert_eq!(answer.render(), "Summary:\nCondensed.");
    }

    #[tokio::test]
    async fn test_transport_timeout_is_recorded_as_timed_out() {
        let agg = aggregator(
            source(SourceId::InstantAnswer, Err(SourceError::Timeout)),
            source(SourceId::Encyclopedia, Ok(None)),
            Some("never used"),
        );

        let answer = agg.aggregate("x").await;
        assert_eq!(
            answer.outcome(SourceId::InstantAnswer),
            Some(&SourceOutcome::TimedOut)
        );
        assert_eq!(
            answer.outcome(SourceId::Encyclopedia),
            Some(&SourceOutcome::Empty)
        );
        assert!(answer.summary().is_none());
    }

    #[tokio::test]
    async fn test_whitespace_reply_counts_as_empty() {
        let agg = aggregator(
            source(SourceId::InstantAnswer, Ok(Some("   ".to_string()))),
            source(SourceId::Encyclopedia, Ok(None)),
            Some("never used"),
        );

        let answer = agg.aggregate("nothing").await;
        assert_eq!(
            answer.outcome(SourceId::InstantAnswer),
            Some(&SourceOutcome::Empty)
        );
        assert!(answer.summary().is_none());
    }

    #[tokio::test]
    async fn test_summarizer_failure_uses_raw_text_with_marker() {
        let agg = aggregator(
            source(SourceId::InstantAnswer, Ok(Some("Short.".to_string()))),
            source(SourceId::Encyclopedia, Ok(Some("Long.".to_string()))),
            None,
        );

        let answer = agg.search("rust").await;
        assert_eq!(answer, "Summary:\nDuckDuckGo: Short.\n\nWikipedia: Long.");
    }
}
