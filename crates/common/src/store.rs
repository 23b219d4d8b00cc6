//! SQLite post store

use crate::config::StoreConfig;
use crate::types::{NewPost, Post};
use crate::{Error, Result};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Store wrapper for post persistence
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open or create the store file at path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;

        // Enable WAL mode for better concurrency
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        store.init_schema()?;

        info!("Opened post store at {:?}", path.as_ref());
        Ok(store)
    }

    /// Open an in-memory store (for testing)
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open whatever a `StoreConfig` names.
    pub fn open_config(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        if config.is_memory() {
            Self::open_memory()
        } else {
            Self::open(&config.connection_string)
        }
    }

    /// Initialize the schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at);
            "#,
        )?;

        debug!("Post store schema initialized");
        Ok(())
    }

    /// Insert a new post and return the stored record.
    pub fn insert_post(&self, new_post: NewPost) -> Result<Post> {
        let post = new_post.into_post();
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO posts (id, title, body, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                post.id.to_string(),
                post.title,
                post.body,
                post.created_at
            ],
        )?;
        debug!(post_id = %post.id, "Inserted post");
        Ok(post)
    }

    /// List all posts, newest first.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, title, body, created_at FROM posts ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], row_to_post)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }

    /// Fetch one post by id.
    pub fn get_post(&self, id: Uuid) -> Result<Post> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT id, title, body, created_at FROM posts WHERE id = ?1",
            params![id.to_string()],
            row_to_post,
        )
        .optional()?
        .ok_or_else(|| Error::not_found("post", id.to_string()))
    }

    /// Delete one post by id.
    pub fn delete_post(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock();
        let affected = conn.execute("DELETE FROM posts WHERE id = ?1", params![id.to_string()])?;
        if affected == 0 {
            return Err(Error::not_found("post", id.to_string()));
        }
        Ok(())
    }

    /// Number of stored posts.
    pub fn count_posts(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    let id: String = row.get(0)?;
    Ok(Post {
        id: Uuid::parse_str(&id).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        title: row.get(1)?,
        body: row.get(2)?,
        created_at: row.get(3)?,
    })
}
