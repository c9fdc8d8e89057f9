//! WolframAlpha math-solving proxy.

const DEFAULT_BASE_URL: &str = "https://www.wolframalpha.com/api/v1/llm-api";
const MAX_CHARS: &str = "1000";
const ERROR_TEXT: &str = "Error: Unable to reach WolframAlpha API.";

/// Forwards problems to the WolframAlpha LLM API.
///
/// Gives only the final answer, not step-by-step working, and does not
/// handle word problems; callers surface whatever text comes back.
pub struct MathSolver {
    app_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl MathSolver {
    pub fn new(app_id: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::new();
        Self {
            app_id: app_id.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }

    /// Solve a problem, returning the raw response text or a fixed error
    /// string when the API cannot be reached.
    pub async fn solve(&self, problem: &str) -> String {
        let input = problem.trim_matches('`');
        let result = self
            .client
            .get(&self.base_url)
            .query(&[
                ("appid", self.app_id.as_str()),
                ("input", input),
                ("maxchars", MAX_CHARS),
            ])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                response.text().await.unwrap_or_else(|e| {
                    tracing::warn!("failed to read WolframAlpha response: {e}");
                    ERROR_TEXT.to_string()
                })
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("WolframAlpha returned {status}: {body}");
                ERROR_TEXT.to_string()
            }
            Err(e) => {
                tracing::warn!("WolframAlpha request failed: {e}");
                ERROR_TEXT.to_string()
            }
        }
    }
}
