//! Chat-completion client.
//!
//! [`CompletionClient`] is the seam the chat service depends on; [`OpenAiClient`]
//! is the production implementation that talks to an OpenAI-compatible
//! `/chat/completions` endpoint.

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiClient};
pub use error::{CompletionError, Result};

/// Turns a prompt into the model's answer text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
