//! Source client abstraction and per-source outcomes.

use async_trait::async_trait;
use std::fmt;

/// External information providers queried by the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    InstantAnswer,
    Encyclopedia,
}

impl SourceId {
    /// Display name used in prompts and user-facing messages
    pub fn name(&self) -> &'static str {
        match self {
            SourceId::InstantAnswer => "DuckDuckGo",
            SourceId::Encyclopedia => "Wikipedia",
        }
    }

    /// 1-based position of the source in labeled output
    pub fn ordinal(&self) -> usize {
        match self {
            SourceId::InstantAnswer => 1,
            SourceId::Encyclopedia => 2,
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a single source call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Ok(String),
    Empty,
    TimedOut,
    Failed(String),
}

impl SourceOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            SourceOutcome::Ok(_) => "ok",
            SourceOutcome::Empty => "empty",
            SourceOutcome::TimedOut => "timed_out",
            SourceOutcome::Failed(_) => "failed",
        }
    }
}

/// Result of one fan-out call. The outcome is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResult {
    source_id: SourceId,
    outcome: SourceOutcome,
}

impl SourceResult {
    pub fn new(source_id: SourceId, outcome: SourceOutcome) -> Self {
        Self { source_id, outcome }
    }

    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    pub fn outcome(&self) -> &SourceOutcome {
        &self.outcome
    }

    /// Text contributed to the aggregation; empty for every non-`Ok` outcome
    pub fn text(&self) -> &str {
        match &self.outcome {
            SourceOutcome::Ok(text) => text,
            _ => "",
        }
    }

    pub fn has_content(&self) -> bool {
        !self.text().trim().is_empty()
    }
}

/// Errors raised by a source lookup. Folded into [`SourceOutcome`] by the
/// aggregator and never surfaced past the search module.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Transport(err.to_string())
        }
    }
}

/// A single request/response information provider.
///
/// `Ok(None)` means the provider answered but had nothing usable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceClient: Send + Sync {
    fn id(&self) -> SourceId;

    async fn lookup(&self, query: &str) -> Result<Option<String>, SourceError>;
}
