//! Dify chat-messages tutor backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tutorbench_core::error::ProviderError;
use tutorbench_core::traits::TutorAgent;

use crate::config::TutorConfig;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Tutor agent served by a Dify application.
///
/// The first request carries an empty `conversation_id`; the identifier
/// returned by the server is stored and reused for every follow-up until
/// [`TutorAgent::reset`] is called.
pub struct DifyTutor {
    api_key: String,
    base_url: String,
    user: String,
    conversation_id: Option<String>,
    client: reqwest::Client,
}

impl DifyTutor {
    pub fn new(config: &TutorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user: config.user.clone(),
            conversation_id: None,
            client,
        }
    }

    /// The stored conversation identifier, if a conversation is open.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    async fn chat(&self, conversation_id: &str, query: &str) -> anyhow::Result<ChatResponse> {
        let body = ChatRequest {
            query,
            response_mode: "blocking",
            user: &self.user,
            conversation_id,
            inputs: serde_json::json!({}),
        };

        let response = self
            .client
            .post(format!("{}/chat-messages", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body }.into());
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        Ok(parsed)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
    response_mode: &'a str,
    user: &'a str,
    conversation_id: &'a str,
    inputs: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    conversation_id: String,
    #[serde(default)]
    answer: String,
}

#[async_trait]
impl TutorAgent for DifyTutor {
    fn name(&self) -> &str {
        "dify"
    }

    #[instrument(skip(self, query))]
    async fn start(&mut self, query: &str) -> anyhow::Result<String> {
        let response = self.chat("", query).await?;
        self.conversation_id = Some(response.conversation_id);
        Ok(response.answer)
    }

    #[instrument(skip(self, query))]
    async fn reply(&mut self, query: &str) -> anyhow::Result<String> {
        let conversation_id = self
            .conversation_id
            .clone()
            .ok_or(ProviderError::NoConversation)?;
        let response = self.chat(&conversation_id, query).await?;
        Ok(response.answer)
    }

    fn reset(&mut self) {
        self.conversation_id = None;
    }
}
