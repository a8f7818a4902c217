//! Multi-source search aggregation
//!
//! A query is normalized, sent concurrently to an instant-answer provider and
//! an encyclopedia provider, and whatever content comes back is condensed into
//! a single answer by the language model. A failing or slow source only ever
//! empties its own contribution.

/// Concurrent fan-out, failure isolation and answer rendering.
pub mod aggregator;
/// Wikipedia lookups with ordered endpoint strategies.
pub mod encyclopedia;
/// DuckDuckGo instant answers.
pub mod instant_answer;
/// Query canonicalization.
pub mod normalizer;
/// Source client trait and per-source outcomes.
pub mod source;
/// LLM-backed condensation of source texts.
pub mod summarizer;

pub use aggregator::{AggregatedAnswer, SearchAggregator, Summary};
pub use normalizer::normalize;
pub use source::{SourceClient, SourceError, SourceId, SourceOutcome, SourceResult};
pub use summarizer::Summarizer;
