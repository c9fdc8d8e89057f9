//! Error types shared across the tutorbench components.
//!
//! Defined here so the scenario runner and driver can classify failures
//! without string matching on message text.

use thiserror::Error;

/// Errors from the tutor agent or judge model backends.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A conversation was continued before one was started.
    #[error("no active conversation")]
    NoConversation,

    /// The remote API returned a non-success status.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

/// Errors from grading a finished conversation.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// The judge's response contained no fenced `json` block.
    #[error("judge response contains no fenced json block")]
    MissingJsonBlock,

    /// The fenced block did not parse as JSON.
    #[error("judge response contains invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The judge model request itself failed.
    #[error("judge request failed: {0}")]
    Model(anyhow::Error),
}
