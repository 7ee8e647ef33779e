use std::path::Path;

use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::session::ImportOutcome;

#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub filename: String,
    pub extracted: i64,
    pub newly_passed: i64,
    pub unmatched: i64,
    pub import_date: String,
}

pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Whether a transcript with this checksum was already imported under `key`.
pub fn seen_before(conn: &Connection, key: &str, checksum: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM imports WHERE progress_key = ?1 AND checksum = ?2")?;
    Ok(stmt.exists(rusqlite::params![key, checksum])?)
}

pub fn record_import(
    conn: &Connection,
    key: &str,
    file_path: &Path,
    checksum: &str,
    outcome: &ImportOutcome,
) -> Result<()> {
    conn.execute(
        "INSERT INTO imports (progress_key, filename, checksum, extracted, newly_passed, unmatched) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            key,
            file_path.file_name().and_then(|n| n.to_str()).unwrap_or(""),
            checksum,
            outcome.extracted as i64,
            outcome.newly_passed as i64,
            outcome.unmatched.len() as i64,
        ],
    )?;
    Ok(())
}

/// Imports recorded under `key`, newest first.
pub fn list_imports(conn: &Connection, key: &str) -> Result<Vec<ImportRecord>> {
    let mut stmt = conn.prepare(
        "SELECT filename, extracted, newly_passed, unmatched, import_date FROM imports \
         WHERE progress_key = ?1 ORDER BY id DESC",
    )?;
    let rows = stmt
        .query_map([key], |row| {
            Ok(ImportRecord {
                filename: row.get(0)?,
                extracted: row.get(1)?,
                newly_passed: row.get(2)?,
                unmatched: row.get(3)?,
                import_date: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
