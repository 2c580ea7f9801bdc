/// LLM Client — the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// Tools depend on the `TextGenerator` trait; `GroqClient` is the production
/// implementation (OpenAI-compatible chat completions).
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Model used for long-form generation (portfolio, cover letter, resume tools).
pub const LARGE_MODEL: &str = "llama-3.1-8b-instant";
/// Model used for short interactive calls (interview questions and feedback).
pub const STANDARD_MODEL: &str = "llama-3.1-8b-instant";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("AI service not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response failed schema validation: {0}")]
    Schema(String),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// The provider rejected the prompt as exceeding its own limit. Budgeting
    /// estimates tokens, so this can still happen after a passing budget check.
    pub fn is_request_too_large(&self) -> bool {
        match self {
            LlmError::Api { status, message } => {
                *status == 413 || message.contains("Request too large")
            }
            _ => false,
        }
    }

    pub fn is_model_unavailable(&self) -> bool {
        match self {
            LlmError::Api { message, .. } => {
                message.contains("does not exist") || message.contains("do not have access")
            }
            _ => false,
        }
    }
}

/// One completion call: a system instruction, a user prompt and an output cap.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
    /// Ask the provider for a JSON object response.
    pub json_mode: bool,
}

/// Anything that turns a prompt into text. Carried in `AppState` as
/// `Arc<dyn TextGenerator>` so handlers can be exercised without the network.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError>;
}

/// Calls the generator in JSON mode and deserializes the reply.
/// The prompt must instruct the model to return valid JSON.
pub async fn generate_json<T: DeserializeOwned>(
    llm: &dyn TextGenerator,
    request: &CompletionRequest<'_>,
) -> Result<T, LlmError> {
    let request = CompletionRequest {
        json_mode: true,
        ..request.clone()
    };
    let text = llm.generate(&request).await?;
    serde_json::from_str(strip_code_fences(&text)).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the model produced any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Groq chat-completions client with retry on rate limits and server errors.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl GroqClient {
    pub fn new(api_url: String, api_key: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_url,
            api_key,
        })
    }

    /// Makes a raw call to the completions API, returning the full response.
    /// Retries on 429 (rate limit), 5xx and transport errors with exponential backoff.
    pub async fn call(&self, request: &CompletionRequest<'_>) -> Result<ChatResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let body = ChatRequest {
            model: request.model,
            max_tokens: request.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            response_format: request.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.api_url)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let text = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, text);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: provider_message(text),
                });
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: provider_message(text),
                });
            }

            let chat: ChatResponse = response.json().await?;

            if let Some(usage) = &chat.usage {
                debug!(
                    "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                    request.model, usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(chat);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an OpenAI-style error body, or keeps the raw body.
fn provider_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Strips ```json ... ```, ```html ... ``` or bare ``` ... ``` fences from LLM output.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the language tag, if any, up to the first newline.
    let rest = match rest.find('\n') {
        Some(idx) if rest[..idx].chars().all(|c| c.is_ascii_alphanumeric()) => &rest[idx + 1..],
        _ => rest,
    };
    rest.trim_end()
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or_else(|| rest.trim())
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedGenerator;
    use super::*;

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_html() {
        let input = "```html\n<!DOCTYPE html>\n<html></html>\n```";
        assert_eq!(strip_code_fences(input), "<!DOCTYPE html>\n<html></html>");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        let input = "  {\"key\": \"value\"}  ";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_unterminated() {
        assert_eq!(strip_code_fences("```json\n{}"), "{}");
    }

    #[test]
    fn test_request_too_large_by_status() {
        let e = LlmError::Api {
            status: 413,
            message: "payload".to_string(),
        };
        assert!(e.is_request_too_large());
        assert!(!e.is_model_unavailable());
    }

    #[test]
    fn test_request_too_large_by_message() {
        let e = LlmError::Api {
            status: 400,
            message: "Request too large for model".to_string(),
        };
        assert!(e.is_request_too_large());
    }

    #[test]
    fn test_model_unavailable() {
        let e = LlmError::Api {
            status: 404,
            message: "The model `x` does not exist".to_string(),
        };
        assert!(e.is_model_unavailable());
        assert!(!LlmError::EmptyContent.is_model_unavailable());
    }

    #[test]
    fn test_provider_message_extracts_error() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        assert_eq!(provider_message(body.to_string()), "Invalid API Key");
        assert_eq!(provider_message("gateway down".to_string()), "gateway down");
    }

    #[test]
    fn test_chat_response_text() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}],"usage":{"prompt_tokens":5,"completion_tokens":1}}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("hello"));
    }

    #[test]
    fn test_chat_response_blank_text_is_none() {
        let json = r#"{"choices":[{"message":{"content":"  "}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_chat_request_json_mode_serialization() {
        let body = ChatRequest {
            model: LARGE_MODEL,
            max_tokens: 10,
            messages: vec![],
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_fast() {
        let client = GroqClient::new(GROQ_API_URL.to_string(), None).unwrap();
        let request = CompletionRequest {
            model: LARGE_MODEL,
            system: "s",
            prompt: "p",
            max_tokens: 10,
            json_mode: false,
        };
        assert!(matches!(
            client.generate(&request).await,
            Err(LlmError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_generate_json_forces_json_mode_and_strips_fences() {
        #[derive(Deserialize)]
        struct Reply {
            ok: bool,
        }

        let llm = ScriptedGenerator::ok("```json\n{\"ok\": true}\n```");
        let request = CompletionRequest {
            model: LARGE_MODEL,
            system: "s",
            prompt: "p",
            max_tokens: 10,
            json_mode: false,
        };
        let reply: Reply = generate_json(&llm, &request).await.unwrap();
        assert!(reply.ok);
        assert!(llm.last_call().json_mode);
    }
}
