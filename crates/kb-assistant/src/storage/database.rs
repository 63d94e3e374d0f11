//! SQLite-backed store for knowledge chunks and chat messages
//!
//! Entities are write-once: inserts use plain `INSERT` so a duplicate key
//! fails, and no update statements exist. Chunks are deleted per file or
//! in bulk; messages only in bulk.

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::knowledge::{ChatMessage, KnowledgeChunk, KnowledgeFile, Role};

/// Handle to the assistant's durable store, constructed once at startup
/// and shared through application state.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create or open the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::storage(format!("Failed to create data directory: {}", e)))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::storage(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::storage(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Create both collections; a no-op when they already exist
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::storage(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS knowledge_chunks (
                id TEXT PRIMARY KEY,
                file_name TEXT NOT NULL,
                content TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_knowledge_chunks_file_name
                ON knowledge_chunks(file_name);
            CREATE INDEX IF NOT EXISTS idx_knowledge_chunks_timestamp
                ON knowledge_chunks(timestamp);

            CREATE TABLE IF NOT EXISTS chat_messages (
                id TEXT PRIMARY KEY,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_chat_messages_timestamp
                ON chat_messages(timestamp);
        "#,
        )
        .map_err(|e| Error::storage(format!("Failed to run migrations: {}", e)))?;

        tracing::debug!("Database migrations complete");
        Ok(())
    }

    // ==================== Knowledge Chunk Operations ====================

    /// Insert a chunk; fails if the key already exists
    pub async fn add_chunk(&self, chunk: &KnowledgeChunk) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO knowledge_chunks (id, file_name, content, timestamp)
             VALUES (?1, ?2, ?3, ?4)",
            params![chunk.id, chunk.file_name, chunk.content, chunk.timestamp],
        )
        .map_err(|e| Error::storage(format!("Failed to insert chunk '{}': {}", chunk.id, e)))?;

        Ok(())
    }

    /// List every stored chunk; no ordering guarantee
    pub async fn list_chunks(&self) -> Result<Vec<KnowledgeChunk>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare("SELECT id, file_name, content, timestamp FROM knowledge_chunks")?;

        let chunks = stmt
            .query_map([], |row| {
                Ok(KnowledgeChunk {
                    id: row.get(0)?,
                    file_name: row.get(1)?,
                    content: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(chunks)
    }

    /// Delete every chunk belonging to a file, returning the count removed
    pub async fn delete_chunks_by_file(&self, file_name: &str) -> Result<usize> {
        let conn = self.conn.lock();

        let deleted = conn
            .execute(
                "DELETE FROM knowledge_chunks WHERE file_name = ?1",
                params![file_name],
            )
            .map_err(|e| Error::storage(format!("Failed to delete chunks: {}", e)))?;

        Ok(deleted)
    }

    /// Remove the entire knowledge collection
    pub async fn clear_chunks(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM knowledge_chunks", [])
            .map_err(|e| Error::storage(format!("Failed to clear chunks: {}", e)))?;
        Ok(())
    }

    /// Per-file summaries of the knowledge base, most recent first
    pub async fn list_files(&self) -> Result<Vec<KnowledgeFile>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT file_name, COUNT(*), MAX(timestamp)
             FROM knowledge_chunks
             GROUP BY file_name
             ORDER BY MAX(timestamp) DESC",
        )?;

        let files = stmt
            .query_map([], |row| {
                Ok(KnowledgeFile {
                    file_name: row.get(0)?,
                    chunk_count: row.get::<_, i64>(1)? as usize,
                    last_ingested: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(files)
    }

    // ==================== Chat Message Operations ====================

    /// Append a chat message; fails if the key already exists
    pub async fn add_message(&self, message: &ChatMessage) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO chat_messages (id, role, content, timestamp)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                message.id,
                message.role.as_str(),
                message.content,
                message.timestamp
            ],
        )
        .map_err(|e| {
            Error::storage(format!("Failed to insert message '{}': {}", message.id, e))
        })?;

        Ok(())
    }

    /// Chat history ordered by timestamp ascending
    pub async fn list_messages(&self) -> Result<Vec<ChatMessage>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT id, role, content, timestamp FROM chat_messages ORDER BY timestamp ASC",
        )?;

        let messages = stmt
            .query_map([], |row| {
                let role_str: String = row.get(1)?;
                Ok(ChatMessage {
                    id: row.get(0)?,
                    role: Role::from_str(&role_str).unwrap_or(Role::Assistant),
                    content: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(messages)
    }

    /// Remove the entire chat history
    pub async fn clear_messages(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM chat_messages", [])
            .map_err(|e| Error::storage(format!("Failed to clear messages: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, file: &str, content: &str, ts: i64) -> KnowledgeChunk {
        KnowledgeChunk {
            id: id.to_string(),
            file_name: file.to_string(),
            content: content.to_string(),
            timestamp: ts,
        }
    }

    #[tokio::test]
    async fn add_and_list_chunks() {
        let db = Database::in_memory().unwrap();

        db.add_chunk(&chunk("a.txt-1-0", "a.txt", "alpha", 1))
            .await
            .unwrap();
        db.add_chunk(&chunk("a.txt-1-1", "a.txt", "beta", 1))
            .await
            .unwrap();

        let all = db.list_chunks().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_chunk_key_is_rejected() {
        let db = Database::in_memory().unwrap();
        let c = chunk("a.txt-1-0", "a.txt", "alpha", 1);

        db.add_chunk(&c).await.unwrap();
        let err = db.add_chunk(&c).await;
        assert!(matches!(err, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn delete_by_file_removes_only_that_file() {
        let db = Database::in_memory().unwrap();

        db.add_chunk(&chunk("a.txt-1-0", "a.txt", "alpha", 1))
            .await
            .unwrap();
        db.add_chunk(&chunk("a.txt-1-1", "a.txt", "beta", 1))
            .await
            .unwrap();
        db.add_chunk(&chunk("b.txt-2-0", "b.txt", "gamma", 2))
            .await
            .unwrap();

        let deleted = db.delete_chunks_by_file("a.txt").await.unwrap();
        assert_eq!(deleted, 2);

        let remaining = db.list_chunks().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].file_name, "b.txt");
    }

    #[tokio::test]
    async fn clear_chunks_empties_the_collection() {
        let db = Database::in_memory().unwrap();
        db.add_chunk(&chunk("a.txt-1-0", "a.txt", "alpha", 1))
            .await
            .unwrap();

        db.clear_chunks().await.unwrap();
        assert!(db.list_chunks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_files_groups_and_counts() {
        let db = Database::in_memory().unwrap();

        db.add_chunk(&chunk("a.txt-1-0", "a.txt", "alpha", 1))
            .await
            .unwrap();
        db.add_chunk(&chunk("a.txt-5-0", "a.txt", "beta", 5))
            .await
            .unwrap();
        db.add_chunk(&chunk("b.txt-3-0", "b.txt", "gamma", 3))
            .await
            .unwrap();

        let files = db.list_files().await.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name, "a.txt");
        assert_eq!(files[0].chunk_count, 2);
        assert_eq!(files[0].last_ingested, 5);
        assert_eq!(files[1].file_name, "b.txt");
    }

    #[tokio::test]
    async fn messages_are_listed_in_timestamp_order() {
        let db = Database::in_memory().unwrap();

        let later = ChatMessage {
            id: "assistant-200".to_string(),
            role: Role::Assistant,
            content: "answer".to_string(),
            timestamp: 200,
        };
        let earlier = ChatMessage {
            id: "user-100".to_string(),
            role: Role::User,
            content: "question".to_string(),
            timestamp: 100,
        };

        db.add_message(&later).await.unwrap();
        db.add_message(&earlier).await.unwrap();

        let history = db.list_messages().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, "user-100");
        assert_eq!(history[1].id, "assistant-200");
    }

    #[tokio::test]
    async fn clear_messages_empties_history() {
        let db = Database::in_memory().unwrap();
        db.add_message(&ChatMessage::user("hello")).await.unwrap();

        db.clear_messages().await.unwrap();
        assert!(db.list_messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn on_disk_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge.db");

        {
            let db = Database::open(&path).unwrap();
            db.add_chunk(&chunk("a.txt-1-0", "a.txt", "alpha", 1))
                .await
                .unwrap();
        }

        let db = Database::open(&path).unwrap();
        let all = db.list_chunks().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "alpha");
    }
}
