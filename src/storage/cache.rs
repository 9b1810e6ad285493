//! SQLite translation cache
//!
//! One table, keyed by source text. Readers outside this crate (the game hook,
//! an operator with `sqlite3`) rely only on the table existing and on the
//! primary key: one translation per source, later writes replace earlier ones.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::debug;

use crate::core::WorkerResult;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS translations (
    source TEXT,
    translation TEXT NOT NULL,
    PRIMARY KEY (source)
)";
const UPSERT: &str = "INSERT OR REPLACE INTO translations (source, translation) VALUES (?1, ?2)";
const LOOKUP: &str = "SELECT translation FROM translations WHERE source = ?1";
const COUNT: &str = "SELECT COUNT(*) FROM translations";
const SAMPLE: &str = "SELECT source, translation FROM translations LIMIT ?1";

/// A (source, translation) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    pub source: String,
    pub translation: String,
}

impl TranslationRecord {
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
        }
    }
}

pub struct CacheStore {
    conn: Connection,
}

impl CacheStore {
    /// Opens the store at `path`, creating the file, its directory and the
    /// `translations` table as needed
    pub fn ensure(path: impl AsRef<Path>) -> WorkerResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute(CREATE_TABLE, [])?;
        debug!("Cache store ready at {}", path.display());

        Ok(Self { conn })
    }

    /// Opens an existing store without creating or writing anything
    pub fn open_read_only(path: impl AsRef<Path>) -> WorkerResult<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Writes every record in one transaction, replacing existing sources
    ///
    /// An empty slice touches nothing. Returns the number of records written.
    pub fn upsert_all(&mut self, records: &[TranslationRecord]) -> WorkerResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT)?;
            for record in records {
                stmt.execute(params![record.source, record.translation])?;
            }
        }
        tx.commit()?;

        Ok(records.len())
    }

    pub fn lookup(&self, source: &str) -> WorkerResult<Option<String>> {
        let translation = self
            .conn
            .query_row(LOOKUP, params![source], |row| row.get(0))
            .optional()?;
        Ok(translation)
    }

    pub fn count(&self) -> WorkerResult<u64> {
        let count: i64 = self.conn.query_row(COUNT, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Up to `limit` rows in whatever order SQLite returns them
    pub fn sample(&self, limit: usize) -> WorkerResult<Vec<TranslationRecord>> {
        // Negative LIMIT means unbounded to SQLite
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(SAMPLE)?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(TranslationRecord {
                source: row.get(0)?,
                translation: row.get(1)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
