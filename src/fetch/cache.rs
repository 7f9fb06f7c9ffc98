//! Response cache implementation
//!
//! A SQLite-backed cache of page bodies keyed by request URL, persistent
//! across runs. The fetcher consults it before touching the network; callers
//! see the same contract whether a body is fresh or replayed.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Persistent cache of fetched page bodies
pub struct ResponseCache {
    conn: Connection,
}

impl ResponseCache {
    /// Opens (or creates) the cache database at the given path
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens an in-memory cache, used by tests
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS responses (
                url        TEXT PRIMARY KEY,
                body       TEXT NOT NULL,
                fetched_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Returns the cached body for a URL, if any
    pub fn get(&self, url: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT body FROM responses WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .optional()
    }

    /// Stores (or replaces) the body for a URL
    pub fn put(&self, url: &str, body: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (url, body, fetched_at) VALUES (?1, ?2, ?3)",
            params![url, body, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Wipes the cache, returning the number of entries removed
    pub fn clear(&self) -> Result<usize, rusqlite::Error> {
        self.conn.execute("DELETE FROM responses", [])
    }

    /// Number of cached responses
    pub fn len(&self) -> Result<u64, rusqlite::Error> {
        self.conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))
    }

    pub fn is_empty(&self) -> Result<bool, rusqlite::Error> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let cache = ResponseCache::open_in_memory().unwrap();
        assert_eq!(cache.get("https://example.com/").unwrap(), None);

        cache.put("https://example.com/", "<html></html>").unwrap();
        assert_eq!(
            cache.get("https://example.com/").unwrap(),
            Some("<html></html>".to_string())
        );
    }

    #[test]
    fn test_put_replaces_existing_body() {
        let cache = ResponseCache::open_in_memory().unwrap();
        cache.put("u", "old").unwrap();
        cache.put("u", "new").unwrap();
        assert_eq!(cache.get("u").unwrap(), Some("new".to_string()));
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_clear_reports_removed_count() {
        let cache = ResponseCache::open_in_memory().unwrap();
        cache.put("a", "1").unwrap();
        cache.put("b", "2").unwrap();
        assert!(!cache.is_empty().unwrap());
        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.len().unwrap(), 0);
        assert!(cache.is_empty().unwrap());
    }

    #[test]
    fn test_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");
        {
            let cache = ResponseCache::open(&path).unwrap();
            cache.put("u", "body").unwrap();
        }
        let cache = ResponseCache::open(&path).unwrap();
        assert_eq!(cache.get("u").unwrap(), Some("body".to_string()));
    }
}
