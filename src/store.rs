#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::models::{CourseGroup, SavedGroup};

/// Key used when progress is not scoped to a program.
pub const GLOBAL_KEY: &str = "courseProgress";

pub fn progress_key(program: Option<&str>) -> String {
    match program {
        Some(slug) => format!("{GLOBAL_KEY}-{slug}"),
        None => GLOBAL_KEY.to_string(),
    }
}

/// Key-value storage for serialized progress snapshots.
pub trait ProgressStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl ProgressStore for SqliteStore<'_> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let blob = self
            .conn
            .query_row("SELECT blob FROM progress WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(blob)
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO progress (key, blob, updated_at) VALUES (?1, ?2, datetime('now')) \
             ON CONFLICT(key) DO UPDATE SET blob = excluded.blob, updated_at = excluded.updated_at",
            rusqlite::params![key, blob],
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl ProgressStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

pub fn encode_snapshot(groups: &[CourseGroup]) -> Result<String> {
    Ok(serde_json::to_string(groups)?)
}

/// Decode a saved snapshot. A blob that does not decode is logged and dropped.
pub fn decode_snapshot(key: &str, blob: &str) -> Option<Vec<SavedGroup>> {
    match serde_json::from_str(blob) {
        Ok(saved) => Some(saved),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable saved progress");
            None
        }
    }
}
