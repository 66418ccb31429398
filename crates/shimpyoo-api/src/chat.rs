use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use shimpyoo_types::api::{ApiResponse, AskForChatRequest, ModifyChatRoomTitleRequest};

use crate::AppState;
use crate::error::ChatError;
use crate::middleware::Identity;

/// Send an envelope with the HTTP status it carries.
fn respond<T: Serialize>(res: ApiResponse<T>) -> impl IntoResponse {
    let status = StatusCode::from_u16(res.status).unwrap_or(StatusCode::OK);
    (status, Json(res))
}

/// POST /chatbot/rooms
pub async fn make_chat_room(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ChatError> {
    let res = state.chat.make_chat_room(&identity).await?;
    Ok(respond(res))
}

/// POST /chatbot/ask
pub async fn ask_for_chat(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<AskForChatRequest>,
) -> Result<impl IntoResponse, ChatError> {
    let res = state
        .chat
        .ask_for_chat(&identity, req.question, req.chat_room_id)
        .await?;
    Ok(respond(res))
}

/// PATCH /chatbot/rooms/{chat_room_id}
pub async fn modify_chat_room_title(
    State(state): State<AppState>,
    Path(chat_room_id): Path<i64>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<ModifyChatRoomTitleRequest>,
) -> Result<impl IntoResponse, ChatError> {
    let res = state
        .chat
        .modify_chat_room_title(&identity, chat_room_id, &req.title)
        .await?;
    Ok(respond(res))
}

/// GET /chatbot/rooms/{chat_room_id}/chats
pub async fn get_chats(
    State(state): State<AppState>,
    Path(chat_room_id): Path<i64>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ChatError> {
    let res = state.chat.get_chats(&identity, chat_room_id).await?;
    Ok(respond(res))
}
