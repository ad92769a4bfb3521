/// LLM Client — the single point of entry for all completion API calls in Remedia.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All LLM interactions MUST go through this module. Error classification
/// happens here, at the adapter boundary — callers match on `LlmError`
/// variants and never parse upstream message text themselves.
///
/// Model: gpt-3.5-turbo (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all LLM calls in Remedia.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-3.5-turbo";
/// Output-token bound for a single suggestion.
const MAX_TOKENS: u32 = 150;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication rejected by upstream: {message}")]
    Auth { message: String },

    #[error("Quota exhausted: {message}")]
    Quota { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the assistant text from the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The seam between the resolver and the generative tier.
///
/// Carried as `Option<Arc<dyn CompletionClient>>` so the resolver can be
/// exercised with a fake in tests and runs fallback-only when no credential
/// is configured.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// One chat round-trip: system instruction + user message → completion text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// The single LLM client used by the suggestion service.
/// Wraps the OpenAI chat-completions API with structured error classification.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    /// `timeout_secs` is the bounded wait on the upstream call; reqwest
    /// aborts the in-flight request once it elapses.
    pub fn new(api_key: String, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a single call to the chat-completions API.
    /// No retry: a failed attempt is classified and returned to the caller,
    /// whose policy decides between surfacing and falling back.
    pub async fn call(&self, system: &str, user: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(classify_api_error(status.as_u16(), message));
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let response = self.call(system, user).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.to_string())
    }
}

/// Maps an upstream failure to a structured error variant.
///
/// Status codes are authoritative; message substrings cover upstreams that
/// report quota or key problems under a generic status.
fn classify_api_error(status: u16, message: String) -> LlmError {
    let lower = message.to_lowercase();

    if status == 429 || lower.contains("quota") || lower.contains("exceeded") {
        LlmError::Quota { message }
    } else if status == 401 || lower.contains("invalid api key") || lower.contains("authentication")
    {
        LlmError::Auth { message }
    } else {
        LlmError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_429_as_quota() {
        let err = classify_api_error(429, "Rate limit reached".to_string());
        assert!(matches!(err, LlmError::Quota { .. }));
    }

    #[test]
    fn test_classify_quota_message_as_quota() {
        let err = classify_api_error(400, "You exceeded your current quota".to_string());
        assert!(matches!(err, LlmError::Quota { .. }));
    }

    #[test]
    fn test_classify_401_as_auth() {
        let err = classify_api_error(401, "Incorrect API key provided".to_string());
        assert!(matches!(err, LlmError::Auth { .. }));
    }

    #[test]
    fn test_classify_auth_message_as_auth() {
        let err = classify_api_error(400, "Invalid API key supplied".to_string());
        assert!(matches!(err, LlmError::Auth { .. }));
    }

    #[test]
    fn test_classify_other_status_as_api() {
        let err = classify_api_error(503, "Service overloaded".to_string());
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service overloaded");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_response_text_reads_first_choice() {
        let response = ChatResponse {
            choices: vec![Choice {
                message: AssistantMessage {
                    content: Some("Arnica montana".to_string()),
                },
            }],
            usage: None,
        };
        assert_eq!(response.text(), Some("Arnica montana"));
    }

    #[test]
    fn test_response_text_none_when_no_choices() {
        let response = ChatResponse {
            choices: vec![],
            usage: None,
        };
        assert_eq!(response.text(), None);
    }
}
