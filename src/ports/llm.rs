//! LLM client port for language-model completions.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, CompletionError>> + Send + 'a>>;

/// A request to generate a completion from an LLM.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The model identifier (e.g. `"claude-sonnet-4-20250514"`).
    pub model: String,
    /// System framing string establishing the assistant's role.
    pub system: String,
    /// The user prompt to send.
    pub prompt: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

/// The response from an LLM completion call.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The generated text.
    pub text: String,
}

/// Why a completion call failed, by category.
///
/// Callers branch on the category (rate limits may warrant backoff, auth
/// failures never will); the payload carries the provider's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The API rejected the credential (missing, invalid, or expired key).
    Auth(String),
    /// The API throttled the request.
    RateLimited(String),
    /// The API reported a server-side failure (5xx).
    Server(String),
    /// The request never completed (DNS, connect, read failures).
    Network(String),
    /// The response arrived but could not be understood.
    Protocol(String),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth(msg) => write!(f, "authentication failed: {msg}"),
            Self::RateLimited(msg) => write!(f, "rate limited: {msg}"),
            Self::Server(msg) => write!(f, "server error: {msg}"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Protocol(msg) => write!(f, "protocol error: {msg}"),
        }
    }
}

impl std::error::Error for CompletionError {}

/// Sends completion requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns a [`CompletionError`] categorizing the failure (auth,
    /// rate limit, server, network, protocol).
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_>;
}
