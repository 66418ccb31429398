//! Database row types. These map directly to SQLite rows.
//! Distinct from shimpyoo-types models to keep the DB layer independent.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use shimpyoo_types::models::{Chat, ChatDirection, ChatRoom, User};

pub struct UserRow {
    pub id: i64,
    pub login_id: String,
    pub created_at: String,
}

pub struct ChatRoomRow {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub created_at: String,
}

pub struct ChatRow {
    pub id: i64,
    pub user_id: i64,
    pub chat_room_id: i64,
    pub content: String,
    pub direction: String,
    pub created_at: String,
}

/// A chat that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChat {
    pub user_id: i64,
    pub chat_room_id: i64,
    pub content: String,
    pub direction: ChatDirection,
}

impl NewChat {
    pub fn sent(user_id: i64, chat_room_id: i64, content: impl Into<String>) -> Self {
        Self {
            user_id,
            chat_room_id,
            content: content.into(),
            direction: ChatDirection::Sent,
        }
    }

    pub fn received(user_id: i64, chat_room_id: i64, content: impl Into<String>) -> Self {
        Self {
            user_id,
            chat_room_id,
            content: content.into(),
            direction: ChatDirection::Received,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            created_at: parse_timestamp(&row.created_at),
            login_id: row.login_id,
        }
    }
}

impl From<ChatRoomRow> for ChatRoom {
    fn from(row: ChatRoomRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            created_at: parse_timestamp(&row.created_at),
            title: row.title,
        }
    }
}

impl TryFrom<ChatRow> for Chat {
    type Error = anyhow::Error;

    fn try_from(row: ChatRow) -> Result<Self> {
        let direction = row.direction.parse::<ChatDirection>()?;
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            chat_room_id: row.chat_room_id,
            created_at: parse_timestamp(&row.created_at),
            content: row.content,
            direction,
        })
    }
}

/// SQLite stores `datetime('now')` as "YYYY-MM-DD HH:MM:SS" without timezone.
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", raw, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parse_sqlite_timestamp() {
        let ts = parse_timestamp("2024-05-01 13:45:10");
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 5);
        assert_eq!(ts.hour(), 13);
        assert_eq!(ts.second(), 10);
    }

    #[test]
    fn corrupt_timestamp_falls_back_to_epoch() {
        assert_eq!(parse_timestamp("yesterday"), DateTime::<Utc>::default());
    }

    #[test]
    fn chat_row_with_unknown_direction_is_rejected() {
        let row = ChatRow {
            id: 1,
            user_id: 1,
            chat_room_id: 1,
            content: "hello".into(),
            direction: "sideways".into(),
            created_at: "2024-05-01 13:45:10".into(),
        };
        assert!(Chat::try_from(row).is_err());
    }
}
