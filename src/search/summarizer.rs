//! Condenses labeled source texts into one answer via the language model.

use crate::llm::LLMClient;
use crate::search::source::SourceResult;
use crate::types::{AppError, Result};
use std::sync::Arc;

const SUMMARIZER_SYSTEM_PROMPT: &str = "You are a careful research assistant. You answer strictly \
from the source material you are given and never invent facts.";

/// Query keywords mapped to the detail the answer should surface
const REQUEST_CATEGORIES: &[(&[&str], &str)] = &[
    (&["born", "birth", "birthday"], "birth date"),
    (&["married", "marriage", "wife", "spouse"], "marriage information"),
    (&["who is", "about", "biography"], "general biography"),
];

pub struct Summarizer {
    llm: Arc<dyn LLMClient>,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    /// Summarize the non-empty sources for `query`.
    ///
    /// An empty completion counts as a failure so the caller can fall back.
    pub async fn summarize(&self, query: &str, sources: &[SourceResult]) -> Result<String> {
        let prompt = build_prompt(query, sources);
        let summary = self
            .llm
            .generate_with_system(SUMMARIZER_SYSTEM_PROMPT, &prompt)
            .await?;

        let summary = summary.trim();
        if summary.is_empty() {
            return Err(AppError::LLM("Summarizer returned an empty answer".to_string()));
        }

        Ok(summary.to_string())
    }
}

/// Detail categories requested by the query, in fixed order
pub fn specific_requests(query: &str) -> Vec<&'static str> {
    let lowered = query.to_lowercase();
    REQUEST_CATEGORIES
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, category)| *category)
        .collect()
}

/// Labeled block of every source that produced content
pub fn sources_block(sources: &[SourceResult]) -> String {
    sources
        .iter()
        .filter(|s| s.has_content())
        .map(|s| {
            let id = s.source_id();
            format!("Source {} ({}):\n{}\n\n", id.ordinal(), id.name(), s.text())
        })
        .collect()
}

/// Raw concatenation used when summarization fails
pub fn raw_fallback(sources: &[SourceResult]) -> String {
    sources
        .iter()
        .filter(|s| s.has_content())
        .map(|s| format!("{}: {}", s.source_id().name(), s.text()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_prompt(query: &str, sources: &[SourceResult]) -> String {
    let requests = specific_requests(query);
    let requested = if requests.is_empty() {
        "general information".to_string()
    } else {
        requests.join(", ")
    };

    format!(
        r#"You are answering the user's question: "{query}"

The user is asking for: {requested}

Instructions:
- Answer using only the source material below.
- If the user asks about a birth date, look for it and include it.
- If the user asks about marriage, look for spouse information and include it.
- If the user asks who someone is, give a short biography.
- Include specific dates, names and details when the sources contain them.
- If some requested information is not in the sources, say clearly that it is not available.
- Do not add facts that are not present in the sources.

{sources}Now answer "{query}" addressing every part of the question:"#,
        query = query,
        requested = requested,
        sources = sources_block(sources),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::source::{SourceId, SourceOutcome};
    use rstest::rstest;

    fn ok(id: SourceId, text: &str) -> SourceResult {
        SourceResult::new(id, SourceOutcome::Ok(text.to_string()))
    }

    #[rstest]
    #[case("When was Ada Lovelace born?", vec!["birth date"])]
    #[case("Who is Alan Turing married to?", vec!["marriage information", "general biography"])]
    #[case("Grace Hopper biography", vec!["general biography"])]
    #[case("closure", vec![])]
    fn test_specific_requests(#[case] query: &str, #[case] expected: Vec<&str>) {
        assert_eq!(specific_requests(query), expected);
    }

    #[test]
    fn test_sources_block_skips_empty_sources() {
        let sources = vec![
            SourceResult::new(SourceId::InstantAnswer, SourceOutcome::TimedOut),
            ok(SourceId::Encyclopedia, "Turing was a mathematician."),
        ];

        let block = sources_block(&sources);
        assert_eq!(block, "Source 2 (Wikipedia):\nTuring was a mathematician.\n\n");
    }

    #[test]
    fn test_raw_fallback_joins_labeled_texts() {
        let sources = vec![
            ok(SourceId::InstantAnswer, "Short answer."),
            ok(SourceId::Encyclopedia, "Long answer."),
        ];

        assert_eq!(
            raw_fallback(&sources),
            "DuckDuckGo: Short answer.\n\nWikipedia: Long answer."
        );
    }

    #[test]
    fn test_prompt_restates_query_and_forbids_fabrication() {
        let sources = vec![ok(SourceId::InstantAnswer, "Rust is a language.")];
        let prompt = build_prompt("What is Rust?", &sources);

        assert!(prompt.contains(r#""What is Rust?""#));
        assert!(prompt.contains("general information"));
        assert!(prompt.contains("not available"));
        assert!(prompt.contains("Do not add facts"));
        assert!(prompt.contains("Source 1 (DuckDuckGo):\nRust is a language."));
        assert!(!prompt.contains("Wikipedia"));
    }
}
