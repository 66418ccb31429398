use serde::{Deserialize, Serialize};

use crate::models::{Chat, ChatDirection};

// -- JWT Claims --

/// JWT claims issued by the auth service. `sub` carries the caller's login id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

// -- Envelope --

/// Uniform response wrapper returned by every chatbot endpoint.
///
/// `status` mirrors the HTTP status code of the response. `data` is only
/// present on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(status: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn fail(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            data: None,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }
}

// -- Chat rooms --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoomCreated {
    pub chat_room_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModifyChatRoomTitleRequest {
    pub title: String,
}

// -- Chats --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AskForChatRequest {
    pub question: String,
    pub chat_room_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: i64,
    pub chat_room_id: i64,
    pub content: String,
    pub direction: ChatDirection,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            chat_room_id: chat.chat_room_id,
            content: chat.content,
            direction: chat.direction,
            created_at: chat.created_at,
        }
    }
}
