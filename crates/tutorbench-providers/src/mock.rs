//! Mock tutor and judge model for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tutorbench_core::error::ProviderError;
use tutorbench_core::traits::{CompletionModel, TutorAgent};

/// A mock tutor for exercising the benchmark engine without real API calls.
///
/// Replays a fixed script of answers and records every query it receives.
pub struct MockTutor {
    script: Vec<String>,
    calls: usize,
    started: bool,
    queries: Vec<String>,
}

impl MockTutor {
    /// Create a mock that replays the given answers, repeating the last one.
    pub fn new(script: &[&str]) -> Self {
        Self {
            script: script.iter().map(|s| s.to_string()).collect(),
            calls: 0,
            started: false,
            queries: Vec::new(),
        }
    }

    /// Create a mock that always answers the same thing.
    pub fn with_fixed_answer(answer: &str) -> Self {
        Self::new(&[answer])
    }

    /// Every query received so far, across conversations.
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    fn next_answer(&mut self) -> String {
        let answer = self
            .script
            .get(self.calls)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or_default();
        self.calls += 1;
        answer
    }
}

#[async_trait]
impl TutorAgent for MockTutor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn start(&mut self, query: &str) -> anyhow::Result<String> {
        self.queries.push(query.to_string());
        self.started = true;
        Ok(self.next_answer())
    }

    async fn reply(&mut self, query: &str) -> anyhow::Result<String> {
        if !self.started {
            return Err(ProviderError::NoConversation.into());
        }
        self.queries.push(query.to_string());
        Ok(self.next_answer())
    }

    fn reset(&mut self) {
        self.started = false;
        self.calls = 0;
    }
}

/// A mock completion model with prompt-substring matching.
///
/// Returns the response whose key the prompt contains, or the default
/// response otherwise; set an empty default to make unmatched prompts fail.
pub struct MockModel {
    /// Map of prompt substring → response text.
    responses: HashMap<String, String>,
    default_response: Option<String>,
    call_count: AtomicU32,
    last_prompt: Mutex<Option<String>>,
}

impl MockModel {
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: None,
            call_count: AtomicU32::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            responses: HashMap::new(),
            default_response: Some(response.to_string()),
            call_count: AtomicU32::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Set the response for prompts that match no configured substring.
    pub fn with_default(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Number of calls made to this model.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The most recent prompt received.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        if let Some((_, response)) = self
            .responses
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
        {
            return Ok(response.clone());
        }
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => anyhow::bail!("no mock response configured for prompt"),
        }
    }
}
