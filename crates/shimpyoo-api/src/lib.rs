pub mod chat;
pub mod error;
pub mod middleware;
pub mod prompt;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post},
};

pub use error::ChatError;
pub use middleware::{Identity, require_auth};
pub use service::ChatService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub chat: ChatService,
    pub jwt_secret: String,
}

/// Chatbot routes. Every route requires a valid bearer token.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chatbot/rooms", post(chat::make_chat_room))
        .route("/chatbot/rooms/{chat_room_id}", patch(chat::modify_chat_room_title))
        .route("/chatbot/rooms/{chat_room_id}/chats", get(chat::get_chats))
        .route("/chatbot/ask", post(chat::ask_for_chat))
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}
