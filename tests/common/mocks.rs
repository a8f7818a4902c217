//! Mock implementations for testing.
//!
//! Hand-written collaborators shared by the integration tests: a language model
//! that records its prompts, search sources with scripted replies, and a live
//! data lookup that records which service was called.

#![allow(dead_code)]

use async_trait::async_trait;
use jarvis::agents::registry::PLANNER_KEY;
use jarvis::agents::{AgentRegistry, ConversationalAgent, DataLookupAgent, SearchAgent};
use jarvis::llm::{LLMClient, TextStream};
use jarvis::search::{SearchAggregator, SourceClient, SourceError, SourceId, Summarizer};
use jarvis::tools::LiveDataLookup;
use jarvis::types::{AppError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock LLM client with a fixed reply.
///
/// Every `(system, prompt)` pair it receives is recorded so tests can assert on
/// what the model was asked. Streaming splits the reply into chunks.
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    chunk_chars: usize,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            chunk_chars: 4,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// Number of completions requested so far
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// User prompt of the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().map(|(_, p)| p.clone())
    }

    /// System prompt of the most recent call
    pub fn last_system(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().map(|(s, _)| s.clone())
    }

    fn record(&self, system: &str, prompt: &str) -> Result<()> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.record(system, prompt)?;
        Ok(self.response.clone())
    }

    async fn stream_with_system(&self, system: &str, prompt: &str) -> Result<TextStream> {
        self.record(system, prompt)?;

        let chars: Vec<char> = self.response.chars().collect();
        let chunks: Vec<Result<String>> = chars
            .chunks(self.chunk_chars)
            .map(|chunk| Ok(chunk.iter().collect()))
            .collect();

        Ok(Box::new(futures::stream::iter(chunks)))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Scripted reply of a [`StubSource`]
#[derive(Clone)]
pub enum StubReply {
    Text(String),
    Empty,
    Fail,
    /// Replies with the text after sleeping
    Slow(Duration, String),
}

/// Search source with a scripted reply that counts its calls
#[derive(Clone)]
pub struct StubSource {
    id: SourceId,
    reply: StubReply,
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StubSource {
    pub fn new(id: SourceId, reply: StubReply) -> Self {
        Self {
            id,
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn text(id: SourceId, text: &str) -> Self {
        Self::new(id, StubReply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceClient for StubSource {
    fn id(&self) -> SourceId {
        self.id
    }

    async fn lookup(&self, query: &str) -> std::result::Result<Option<String>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        match &self.reply {
            StubReply::Text(text) => Ok(Some(text.clone())),
            StubReply::Empty => Ok(None),
            StubReply::Fail => Err(SourceError::Transport("connection refused".to_string())),
            StubReply::Slow(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(Some(text.clone()))
            }
        }
    }
}

/// Source that answers with its own query, for independence checks
pub struct EchoSource {
    pub id: SourceId,
    pub delay: Duration,
}

#[async_trait]
impl SourceClient for EchoSource {
    fn id(&self) -> SourceId {
        self.id
    }

    async fn lookup(&self, query: &str) -> std::result::Result<Option<String>, SourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(Some(format!("{} says {}", self.id, query)))
    }
}

/// Live data lookup that records `service:argument` for every call
#[derive(Clone, Default)]
pub struct RecordingLiveData {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingLiveData {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, service: &str, arg: &str) -> String {
        let entry = format!("{}:{}", service, arg);
        self.calls.lock().unwrap().push(entry.clone());
        format!("live {}", entry)
    }
}

#[async_trait]
impl LiveDataLookup for RecordingLiveData {
    async fn weather(&self, city: &str) -> String {
        self.record("weather", city)
    }

    async fn news(&self, topic: &str) -> String {
        self.record("news", topic)
    }

    async fn stock(&self, symbol: &str) -> String {
        self.record("stock", symbol)
    }
}

/// Aggregator over two sources with a short per-source timeout
pub fn aggregator(
    instant: Arc<dyn SourceClient>,
    encyclopedia: Arc<dyn SourceClient>,
    summarizer: MockLLMClient,
    timeout: Duration,
) -> SearchAggregator {
    SearchAggregator::new(
        instant,
        encyclopedia,
        Summarizer::new(Arc::new(summarizer)),
        timeout,
    )
}

/// Collaborators behind a test registry, kept for assertions
pub struct TestHarness {
    pub planner_llm: MockLLMClient,
    pub agent_llm: MockLLMClient,
    pub summarizer_llm: MockLLMClient,
    pub live: RecordingLiveData,
    pub instant: StubSource,
    pub encyclopedia: StubSource,
}

impl TestHarness {
    /// Planner answering with `planner_output`, specialists answering "agent reply"
    pub fn new(planner_output: &str) -> Self {
        Self {
            planner_llm: MockLLMClient::new(planner_output),
            agent_llm: MockLLMClient::new("agent reply"),
            summarizer_llm: MockLLMClient::new("Condensed answer."),
            live: RecordingLiveData::default(),
            instant: StubSource::text(SourceId::InstantAnswer, "Instant text."),
            encyclopedia: StubSource::text(SourceId::Encyclopedia, "Encyclopedia text."),
        }
    }

    /// Registry with the standard planner, task, tool, api and search agents
    pub fn registry(&self) -> AgentRegistry {
        let agent_llm: Arc<dyn LLMClient> = Arc::new(self.agent_llm.clone());
        let aggregator = aggregator(
            Arc::new(self.instant.clone()),
            Arc::new(self.encyclopedia.clone()),
            self.summarizer_llm.clone(),
            Duration::from_secs(2),
        );

        AgentRegistry::builder(PLANNER_KEY)
            .register(Arc::new(ConversationalAgent::new(
                PLANNER_KEY,
                "planner",
                "PLANNER PROMPT",
                Arc::new(self.planner_llm.clone()),
            )))
            .register(Arc::new(ConversationalAgent::new(
                "task",
                "tasks",
                "TASK PROMPT",
                agent_llm.clone(),
            )))
            .register(Arc::new(ConversationalAgent::new(
                "tool",
                "tools",
                "TOOL PROMPT",
                agent_llm.clone(),
            )))
            .register(Arc::new(DataLookupAgent::new(
                "api",
                "live data",
                "API PROMPT",
                agent_llm,
                Arc::new(self.live.clone()),
            )))
            .register(Arc::new(SearchAgent::new(
                "search",
                "search",
                Arc::new(aggregator),
            )))
            .build()
            .unwrap()
    }
}
