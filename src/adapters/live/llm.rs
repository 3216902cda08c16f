//! Live adapter for the `LlmClient` port using the Anthropic messages API.

use std::env;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::ports::llm::{
    CompletionError, CompletionFuture, CompletionRequest, CompletionResponse, LlmClient,
};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Live LLM client that calls the Anthropic Claude API.
pub struct LiveLlmClient {
    client: Client,
}

impl LiveLlmClient {
    /// Creates a new live LLM client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body sent to the Anthropic messages API.
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

/// A single message in the Anthropic API request.
#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Top-level response from the Anthropic messages API.
#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

/// A content block in the Anthropic response.
#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// Error response from the Anthropic API.
#[derive(Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

/// Detail inside an Anthropic error response.
#[derive(Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

/// Maps an HTTP status plus error body to a completion error category.
fn categorize(status: StatusCode, body: &str) -> CompletionError {
    let msg = serde_json::from_str::<AnthropicError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());
    let msg = format!("Anthropic API ({}): {msg}", status.as_u16());

    match status.as_u16() {
        401 | 403 => CompletionError::Auth(msg),
        429 => CompletionError::RateLimited(msg),
        500..=599 => CompletionError::Server(msg),
        _ => CompletionError::Protocol(msg),
    }
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let model = request.model.clone();
        let system = request.system.clone();
        let prompt = request.prompt.clone();
        let max_tokens = request.max_tokens;

        Box::pin(async move {
            let api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| {
                CompletionError::Auth("ANTHROPIC_API_KEY environment variable not set".to_string())
            })?;

            let body = AnthropicRequest {
                model: &model,
                max_tokens,
                system: &system,
                messages: vec![AnthropicMessage { role: "user", content: &prompt }],
            };

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| CompletionError::Network(format!("request failed: {e}")))?;

            let status = response.status();
            let response_text = response
                .text()
                .await
                .map_err(|e| CompletionError::Network(format!("failed to read response: {e}")))?;

            if !status.is_success() {
                return Err(categorize(status, &response_text));
            }

            let api_response: AnthropicResponse =
                serde_json::from_str(&response_text).map_err(|e| {
                    CompletionError::Protocol(format!("failed to parse response: {e}"))
                })?;

            let text =
                api_response.content.into_iter().map(|block| block.text).collect::<String>();

            Ok(CompletionResponse { text })
        })
    }
}
