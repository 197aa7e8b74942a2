//! Contact message table (SQLite).

use std::path::Path;
use std::sync::Mutex;

use folio_core::{new_id, now_rfc3339, ServiceError};
use portfolio::{ContactMessage, StoredMessage};
use rusqlite::{params, Connection};
use tracing::info;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS contact_messages (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL,
    subject    TEXT NOT NULL,
    message    TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

pub struct MessageStore {
    conn: Mutex<Connection>,
}

fn storage_err(e: rusqlite::Error) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

impl MessageStore {
    pub fn open(path: &Path) -> Result<Self, ServiceError> {
        let conn = Connection::open(path).map_err(storage_err)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(storage_err)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, ServiceError> {
        Self::init(Connection::open_in_memory().map_err(storage_err)?)
    }

    fn init(conn: Connection) -> Result<Self, ServiceError> {
        conn.execute_batch(SCHEMA).map_err(storage_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert one row. The caller has already validated the message.
    pub fn insert(&self, msg: &ContactMessage) -> Result<StoredMessage, ServiceError> {
        let stored = StoredMessage {
            id: new_id(),
            name: msg.name.clone(),
            email: msg.email.clone(),
            subject: msg.subject.clone(),
            message: msg.message.clone(),
            created_at: now_rfc3339(),
        };
        let conn = self
            .conn
            .lock()
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        conn.execute(
            "INSERT INTO contact_messages (id, name, email, subject, message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                stored.id,
                stored.name,
                stored.email,
                stored.subject,
                stored.message,
                stored.created_at
            ],
        )
        .map_err(storage_err)?;
        info!(id = %stored.id, "contact message stored");
        Ok(stored)
    }

    #[cfg(test)]
    pub fn count(&self) -> i64 {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM contact_messages", [], |r| r.get(0))
            .unwrap()
    }
}
