use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login_id: String,
    pub created_at: DateTime<Utc>,
}

/// A conversation container. Owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A single message inside a chat room. Never updated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub user_id: i64,
    pub chat_room_id: i64,
    pub content: String,
    pub direction: ChatDirection,
    pub created_at: DateTime<Utc>,
}

/// Whether a chat was sent by the user or received from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatDirection {
    Sent,
    Received,
}

impl ChatDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }
}

impl fmt::Display for ChatDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chat direction '{0}'")]
pub struct UnknownDirection(pub String);

impl FromStr for ChatDirection {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "received" => Ok(Self::Received),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}
