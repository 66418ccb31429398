// In-memory fakes for the store and completion seams.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;

use shimpyoo_completion::{CompletionClient, CompletionError};
use shimpyoo_db::{ChatRoomStore, ChatStore, NewChat, UserStore};
use shimpyoo_types::models::{Chat, ChatRoom, User};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    rooms: Mutex<Vec<ChatRoom>>,
    chats: Mutex<Vec<Chat>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, login_id: &str) -> i64 {
        let mut users = self.users.lock().unwrap();
        let id = users.len() as i64 + 1;
        users.push(User {
            id,
            login_id: login_id.to_string(),
            created_at: Utc::now(),
        });
        id
    }

    pub fn add_room(&self, user_id: i64) -> i64 {
        self.create_chat_room(user_id).unwrap().id
    }

    pub fn fail_chat_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn chats(&self) -> Vec<Chat> {
        self.chats.lock().unwrap().clone()
    }

    pub fn chat_count(&self) -> usize {
        self.chats.lock().unwrap().len()
    }

    pub fn room_owner(&self, id: i64) -> Option<i64> {
        self.find_chat_room(id).unwrap().map(|r| r.user_id)
    }

    pub fn room_title(&self, id: i64) -> Option<String> {
        self.find_chat_room(id).unwrap().and_then(|r| r.title)
    }
}

impl UserStore for MemoryStore {
    fn find_user_by_login_id(&self, login_id: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.login_id == login_id).cloned())
    }
}

impl ChatRoomStore for MemoryStore {
    fn find_chat_room(&self, id: i64) -> Result<Option<ChatRoom>> {
        let rooms = self.rooms.lock().unwrap();
        Ok(rooms.iter().find(|r| r.id == id).cloned())
    }

    fn create_chat_room(&self, user_id: i64) -> Result<ChatRoom> {
        let mut rooms = self.rooms.lock().unwrap();
        let room = ChatRoom {
            id: rooms.len() as i64 + 1,
            user_id,
            title: None,
            created_at: Utc::now(),
        };
        rooms.push(room.clone());
        Ok(room)
    }

    fn update_chat_room_title(&self, id: i64, title: &str) -> Result<()> {
        let mut rooms = self.rooms.lock().unwrap();
        let room = rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow!("Chat room not found: {}", id))?;
        room.title = Some(title.to_string());
        Ok(())
    }
}

impl ChatStore for MemoryStore {
    fn insert_chat(&self, chat: &NewChat) -> Result<i64> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("disk full"));
        }
        let mut chats = self.chats.lock().unwrap();
        let id = chats.len() as i64 + 1;
        chats.push(Chat {
            id,
            user_id: chat.user_id,
            chat_room_id: chat.chat_room_id,
            content: chat.content.clone(),
            direction: chat.direction,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn list_chats(&self, chat_room_id: i64) -> Result<Vec<Chat>> {
        let chats = self.chats.lock().unwrap();
        Ok(chats
            .iter()
            .filter(|c| c.chat_room_id == chat_room_id)
            .cloned()
            .collect())
    }
}

/// Completion client with a canned outcome that records every prompt.
pub struct StubCompletion {
    outcome: std::result::Result<String, u16>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn answering(answer: &str) -> Self {
        Self::with_outcome(Ok(answer.to_string()))
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self::with_outcome(Err(status))
    }

    fn with_outcome(outcome: std::result::Result<String, u16>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, prompt: &str) -> shimpyoo_completion::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.outcome {
            Ok(answer) => Ok(answer.clone()),
            Err(status) => Err(CompletionError::Status(*status)),
        }
    }
}
