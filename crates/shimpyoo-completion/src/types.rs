//! Request and response bodies of the `/chat/completions` endpoint.
//!
//! Only the fields this service reads or writes are modelled; everything else
//! in the provider's response is ignored.

use serde::{Deserialize, Serialize};

use crate::error::{CompletionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// A single-turn request carrying the whole prompt as one user message.
    pub fn single(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(prompt)],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseRaw {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Pull `choices[0].message.content` out of a raw response body.
pub fn extract_answer(body: &str) -> Result<String> {
    let raw: ChatResponseRaw =
        serde_json::from_str(body).map_err(|e| CompletionError::Parse(e.to_string()))?;

    raw.choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::Parse("response has no choices".into()))?
        .message
        .content
        .ok_or_else(|| CompletionError::Parse("first choice has no message content".into()))
}
