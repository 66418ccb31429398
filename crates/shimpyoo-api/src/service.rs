use std::sync::Arc;

use anyhow::anyhow;
use tracing::{info, warn};

use shimpyoo_completion::CompletionClient;
use shimpyoo_db::{ChatRoomStore, ChatStore, Database, NewChat, UserStore};
use shimpyoo_types::api::{ApiResponse, ChatResponse, ChatRoomCreated};
use shimpyoo_types::models::{ChatRoom, User};

use crate::error::{
    CHAT_ROOM_FORBIDDEN, CHAT_ROOM_NOT_FOUND, ChatError, INVALID_TITLE, USER_NOT_FOUND,
};
use crate::middleware::Identity;
use crate::prompt::build_prompt;

pub const ANSWER_PROVIDED: &str = "answer provided successfully.";
pub const CHAT_ROOM_CREATED: &str = "chat room created.";
pub const TITLE_UPDATED: &str = "chat room title updated.";
pub const CHATS_FOUND: &str = "chats retrieved.";

const MAX_TITLE_CHARS: usize = 100;

/// Chatbot orchestration: ownership checks, the completion round-trip and
/// persistence of both sides of the exchange.
#[derive(Clone)]
pub struct ChatService {
    users: Arc<dyn UserStore>,
    rooms: Arc<dyn ChatRoomStore>,
    chats: Arc<dyn ChatStore>,
    completion: Arc<dyn CompletionClient>,
}

impl ChatService {
    pub fn new(
        users: Arc<dyn UserStore>,
        rooms: Arc<dyn ChatRoomStore>,
        chats: Arc<dyn ChatStore>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            users,
            rooms,
            chats,
            completion,
        }
    }

    /// All three gateways served by one SQLite database.
    pub fn with_database(db: Arc<Database>, completion: Arc<dyn CompletionClient>) -> Self {
        Self::new(db.clone(), db.clone(), db, completion)
    }

    pub async fn make_chat_room(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<ChatRoomCreated>, ChatError> {
        let user = self.resolve_user(actor).await?;

        let rooms = self.rooms.clone();
        let room = run_blocking(move || rooms.create_chat_room(user.id))
            .await
            .map_err(ChatError::storage)?;

        info!(login_id = %actor.login_id, chat_room_id = room.id, "Chat room created");
        Ok(ApiResponse::success(
            201,
            ChatRoomCreated {
                chat_room_id: room.id,
            },
            CHAT_ROOM_CREATED,
        ))
    }

    /// Ask the model a question inside one of the caller's rooms.
    ///
    /// Both the question and the answer are stored once the model has
    /// answered. Nothing is written if any gate or the upstream call fails.
    pub async fn ask_for_chat(
        &self,
        actor: &Identity,
        question: String,
        chat_room_id: i64,
    ) -> Result<ApiResponse<String>, ChatError> {
        let (user, room) = self.resolve_owned_room(actor, chat_room_id).await?;

        let prompt = build_prompt(&question);
        let answer = self.completion.complete(&prompt).await?;

        let exchange = vec![
            NewChat::sent(user.id, room.id, question),
            NewChat::received(user.id, room.id, answer.clone()),
        ];
        let chats = self.chats.clone();
        run_blocking(move || chats.insert_chats(&exchange))
            .await
            .map_err(ChatError::exchange)?;

        info!(login_id = %actor.login_id, chat_room_id, "Answer stored");
        Ok(ApiResponse::success(200, answer, ANSWER_PROVIDED))
    }

    pub async fn modify_chat_room_title(
        &self,
        actor: &Identity,
        chat_room_id: i64,
        title: &str,
    ) -> Result<ApiResponse<()>, ChatError> {
        let (_, room) = self.resolve_owned_room(actor, chat_room_id).await?;

        let title = title.trim().to_string();
        if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
            warn!(login_id = %actor.login_id, chat_room_id, "Rejected chat room title");
            return Err(ChatError::BadRequest(INVALID_TITLE));
        }

        let rooms = self.rooms.clone();
        run_blocking(move || rooms.update_chat_room_title(room.id, &title))
            .await
            .map_err(ChatError::storage)?;

        Ok(ApiResponse::success(200, (), TITLE_UPDATED))
    }

    /// Conversation history of a room, oldest first.
    pub async fn get_chats(
        &self,
        actor: &Identity,
        chat_room_id: i64,
    ) -> Result<ApiResponse<Vec<ChatResponse>>, ChatError> {
        let (_, room) = self.resolve_owned_room(actor, chat_room_id).await?;

        let chats = self.chats.clone();
        let rows = run_blocking(move || chats.list_chats(room.id))
            .await
            .map_err(ChatError::storage)?;

        let chats = rows.into_iter().map(ChatResponse::from).collect();
        Ok(ApiResponse::success(200, chats, CHATS_FOUND))
    }

    async fn resolve_user(&self, actor: &Identity) -> Result<User, ChatError> {
        let users = self.users.clone();
        let login_id = actor.login_id.clone();
        run_blocking(move || users.find_user_by_login_id(&login_id))
            .await
            .map_err(ChatError::storage)?
            .ok_or_else(|| {
                warn!(login_id = %actor.login_id, "Unknown user");
                ChatError::NotFound(USER_NOT_FOUND)
            })
    }

    /// Gates shared by every room-scoped operation: the caller exists, the
    /// room exists, and the room belongs to the caller.
    async fn resolve_owned_room(
        &self,
        actor: &Identity,
        chat_room_id: i64,
    ) -> Result<(User, ChatRoom), ChatError> {
        let user = self.resolve_user(actor).await?;

        let rooms = self.rooms.clone();
        let room = run_blocking(move || rooms.find_chat_room(chat_room_id))
            .await
            .map_err(ChatError::storage)?
            .ok_or_else(|| {
                warn!(login_id = %actor.login_id, chat_room_id, "Unknown chat room");
                ChatError::NotFound(CHAT_ROOM_NOT_FOUND)
            })?;

        if room.user_id != user.id {
            warn!(
                login_id = %actor.login_id,
                chat_room_id,
                owner_id = room.user_id,
                "Chat room owned by another user"
            );
            return Err(ChatError::Forbidden(CHAT_ROOM_FORBIDDEN));
        }

        Ok((user, room))
    }
}

/// Run blocking store work off the async runtime.
async fn run_blocking<F, T>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| anyhow!("spawn_blocking join error: {}", e))?
}
