use crate::Database;
use crate::models::{ChatRoomRow, ChatRow, NewChat, UserRow};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    pub fn create_user(&self, login_id: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute("INSERT INTO users (login_id) VALUES (?1)", [login_id])?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_login_id(&self, login_id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_login_id(conn, login_id))
    }

    // -- Chat rooms --

    pub fn insert_chat_room(&self, user_id: i64) -> Result<ChatRoomRow> {
        self.with_conn(|conn| {
            conn.execute("INSERT INTO chat_rooms (user_id) VALUES (?1)", [user_id])?;
            let id = conn.last_insert_rowid();
            query_chat_room(conn, id)?.ok_or_else(|| anyhow!("Chat room {} vanished after insert", id))
        })
    }

    pub fn get_chat_room(&self, id: i64) -> Result<Option<ChatRoomRow>> {
        self.with_conn(|conn| query_chat_room(conn, id))
    }

    pub fn set_chat_room_title(&self, id: i64, title: &str) -> Result<()> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE chat_rooms SET title = ?1 WHERE id = ?2",
                rusqlite::params![title, id],
            )?;
            if updated == 0 {
                return Err(anyhow!("Chat room not found: {}", id));
            }
            Ok(())
        })
    }

    // -- Chats --

    pub fn insert_chat(&self, chat: &NewChat) -> Result<i64> {
        self.with_conn(|conn| insert_chat_row(conn, chat))
    }

    /// Insert several chats atomically. Either every row lands or none does.
    pub fn insert_chats(&self, chats: &[NewChat]) -> Result<Vec<i64>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let mut ids = Vec::with_capacity(chats.len());
            for chat in chats {
                ids.push(insert_chat_row(&tx, chat)?);
            }
            tx.commit()?;
            Ok(ids)
        })
    }

    pub fn get_chats(&self, chat_room_id: i64) -> Result<Vec<ChatRow>> {
        self.with_conn(|conn| query_chats(conn, chat_room_id))
    }
}

fn query_user_by_login_id(conn: &Connection, login_id: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare("SELECT id, login_id, created_at FROM users WHERE login_id = ?1")?;

    let row = stmt
        .query_row([login_id], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                login_id: row.get(1)?,
                created_at: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_chat_room(conn: &Connection, id: i64) -> Result<Option<ChatRoomRow>> {
    let mut stmt =
        conn.prepare("SELECT id, user_id, title, created_at FROM chat_rooms WHERE id = ?1")?;

    let row = stmt
        .query_row([id], |row| {
            Ok(ChatRoomRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                title: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn insert_chat_row(conn: &Connection, chat: &NewChat) -> Result<i64> {
    conn.execute(
        "INSERT INTO chats (user_id, chat_room_id, content, direction) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![chat.user_id, chat.chat_room_id, chat.content, chat.direction.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

fn query_chats(conn: &Connection, chat_room_id: i64) -> Result<Vec<ChatRow>> {
    // Row id order is insertion order; created_at only has second precision.
    let mut stmt = conn.prepare(
        "SELECT id, user_id, chat_room_id, content, direction, created_at
         FROM chats
         WHERE chat_room_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt
        .query_map([chat_room_id], |row| {
            Ok(ChatRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                chat_room_id: row.get(2)?,
                content: row.get(3)?,
                direction: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let user_id = db.create_user("asthma-kim").unwrap();
        (db, user_id)
    }

    #[test]
    fn user_lookup_by_login_id() {
        let (db, user_id) = seeded();
        let row = db.get_user_by_login_id("asthma-kim").unwrap().unwrap();
        assert_eq!(row.id, user_id);
        assert!(db.get_user_by_login_id("nobody").unwrap().is_none());
    }

    #[test]
    fn duplicate_login_id_is_rejected() {
        let (db, _) = seeded();
        assert!(db.create_user("asthma-kim").is_err());
    }

    #[test]
    fn chat_room_title_update() {
        let (db, user_id) = seeded();
        let room = db.insert_chat_room(user_id).unwrap();
        assert_eq!(room.user_id, user_id);
        assert!(room.title.is_none());

        db.set_chat_room_title(room.id, "inhalers").unwrap();
        let room = db.get_chat_room(room.id).unwrap().unwrap();
        assert_eq!(room.title.as_deref(), Some("inhalers"));

        assert!(db.set_chat_room_title(room.id + 100, "nope").is_err());
    }

    #[test]
    fn chat_room_requires_existing_user() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.insert_chat_room(42).is_err());
    }

    #[test]
    fn insert_chats_keeps_order() {
        let (db, user_id) = seeded();
        let room = db.insert_chat_room(user_id).unwrap();

        let ids = db
            .insert_chats(&[
                NewChat::sent(user_id, room.id, "Is running bad for asthma?"),
                NewChat::received(user_id, room.id, "Warm up first and carry your inhaler."),
            ])
            .unwrap();
        assert_eq!(ids.len(), 2);

        let rows = db.get_chats(room.id).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].direction, "sent");
        assert_eq!(rows[0].content, "Is running bad for asthma?");
        assert_eq!(rows[1].direction, "received");
    }

    #[test]
    fn insert_chats_rolls_back_on_failure() {
        let (db, user_id) = seeded();
        let room = db.insert_chat_room(user_id).unwrap();

        // Second row points at a room that does not exist, violating the FK.
        let result = db.insert_chats(&[
            NewChat::sent(user_id, room.id, "question"),
            NewChat::received(user_id, room.id + 1, "answer"),
        ]);
        assert!(result.is_err());
        assert!(db.get_chats(room.id).unwrap().is_empty());
    }
}
