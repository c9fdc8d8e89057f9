//! Trait definitions for the tutor agent and the judge model.
//!
//! These async traits are implemented by the `tutorbench-providers` crate;
//! the runner and driver in this crate only ever see the trait objects.

use async_trait::async_trait;

/// A stateful conversational tutor backend.
///
/// Implementations hold the conversation identifier returned by the first
/// call and reuse it for follow-ups. The driver calls [`TutorAgent::reset`]
/// between independent scenario runs.
#[async_trait]
pub trait TutorAgent: Send + Sync {
    /// Human-readable backend name (e.g. "dify").
    fn name(&self) -> &str;

    /// Open a new conversation and return the tutor's answer.
    async fn start(&mut self, query: &str) -> anyhow::Result<String>;

    /// Continue the current conversation and return the tutor's answer.
    ///
    /// Fails with [`crate::error::ProviderError::NoConversation`] if no
    /// conversation has been started.
    async fn reply(&mut self, query: &str) -> anyhow::Result<String>;

    /// Forget the current conversation.
    fn reset(&mut self);
}

/// A single-shot prompt-completion model.
///
/// The same model plays the simulated student and grades the finished
/// conversation; both the simulator and the judge hold one of these.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Human-readable backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Complete a prompt and return the raw response text.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}
