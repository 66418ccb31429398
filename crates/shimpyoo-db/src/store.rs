//! Narrow persistence gateways used by the chat service.
//!
//! Each trait covers one capability so callers can be tested against
//! in-memory fakes instead of SQLite.

use anyhow::Result;

use shimpyoo_types::models::{Chat, ChatRoom, User};

use crate::Database;
use crate::models::NewChat;

pub trait UserStore: Send + Sync {
    fn find_user_by_login_id(&self, login_id: &str) -> Result<Option<User>>;
}

pub trait ChatRoomStore: Send + Sync {
    fn find_chat_room(&self, id: i64) -> Result<Option<ChatRoom>>;
    fn create_chat_room(&self, user_id: i64) -> Result<ChatRoom>;
    fn update_chat_room_title(&self, id: i64, title: &str) -> Result<()>;
}

pub trait ChatStore: Send + Sync {
    fn insert_chat(&self, chat: &NewChat) -> Result<i64>;

    /// Insert chats in order. Implementations backed by a transactional
    /// store should write all of them or none.
    fn insert_chats(&self, chats: &[NewChat]) -> Result<Vec<i64>> {
        chats.iter().map(|chat| self.insert_chat(chat)).collect()
    }

    /// All chats of a room, oldest first.
    fn list_chats(&self, chat_room_id: i64) -> Result<Vec<Chat>>;
}

impl UserStore for Database {
    fn find_user_by_login_id(&self, login_id: &str) -> Result<Option<User>> {
        Ok(self.get_user_by_login_id(login_id)?.map(User::from))
    }
}

impl ChatRoomStore for Database {
    fn find_chat_room(&self, id: i64) -> Result<Option<ChatRoom>> {
        Ok(self.get_chat_room(id)?.map(ChatRoom::from))
    }

    fn create_chat_room(&self, user_id: i64) -> Result<ChatRoom> {
        Ok(self.insert_chat_room(user_id)?.into())
    }

    fn update_chat_room_title(&self, id: i64, title: &str) -> Result<()> {
        self.set_chat_room_title(id, title)
    }
}

impl ChatStore for Database {
    fn insert_chat(&self, chat: &NewChat) -> Result<i64> {
        Database::insert_chat(self, chat)
    }

    fn insert_chats(&self, chats: &[NewChat]) -> Result<Vec<i64>> {
        Database::insert_chats(self, chats)
    }

    fn list_chats(&self, chat_room_id: i64) -> Result<Vec<Chat>> {
        self.get_chats(chat_room_id)?
            .into_iter()
            .map(Chat::try_from)
            .collect()
    }
}
