use anyhow::Result;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use r2d2_sqlite::rusqlite::{params, OpenFlags};

use crate::storage::area::StorageArea;

/// SQLite-based local storage, scoped to one origin.
///
/// Several origins may share one database file; each store only sees the rows of its own origin.
pub struct SqliteLocalStore {
    pool: Pool<SqliteConnectionManager>,
    origin: String,
}

impl SqliteLocalStore {
    /// Opens (or creates) the database at `path` and binds the store to `origin`.
    pub fn new(path: &str, origin: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path)
            .with_flags(
                OpenFlags::SQLITE_OPEN_READ_WRITE |
                    OpenFlags::SQLITE_OPEN_CREATE |
                    OpenFlags::SQLITE_OPEN_URI
            )
            .with_init(|c| {
                c.busy_timeout(std::time::Duration::from_millis(500))?;
                c.execute_batch(
                    "CREATE TABLE IF NOT EXISTS local_storage (
                        origin TEXT NOT NULL,
                        key TEXT NOT NULL,
                        value TEXT NOT NULL,
                        updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now')),
                        PRIMARY KEY(origin, key)
                    );"
                )?;
                Ok(())
            });

        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(std::time::Duration::from_secs(5))
            .build(manager)?;

        log::debug!("opened sqlite local store at {} for origin {}", path, origin);

        Ok(Self { pool, origin: origin.to_string() })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

impl StorageArea for SqliteLocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let conn = self.conn().ok()?;
        conn.query_row(
            "SELECT value FROM local_storage WHERE origin=?1 AND key=?2",
            params![self.origin, key],
            |row| row.get::<_, String>(0),
        ).ok()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO local_storage(origin,key,value) VALUES (?1,?2,?3)
             ON CONFLICT(origin,key) DO UPDATE
             SET value=excluded.value, updated_at=strftime('%s','now')",
            params![self.origin, key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM local_storage WHERE origin=?1 AND key=?2",
            params![self.origin, key],
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM local_storage WHERE origin=?1",
            params![self.origin],
        )?;
        Ok(())
    }

    fn len(&self) -> usize {
        let conn = match self.conn() { Ok(c) => c, Err(_) => return 0 };
        conn.query_row::<u32, _, _>(
            "SELECT COUNT(*) FROM local_storage WHERE origin=?1",
            params![self.origin],
            |row| row.get(0),
        ).unwrap_or(0) as usize
    }

    fn keys(&self) -> Vec<String> {
        let conn = match self.conn() { Ok(c) => c, Err(_) => return vec![] };
        let mut stmt = match conn.prepare(
            "SELECT key FROM local_storage WHERE origin=?1 ORDER BY key",
        ) { Ok(s) => s, Err(_) => return vec![] };

        let rows = match stmt.query_map(
            params![self.origin],
            |row| row.get::<_, String>(0),
        ) { Ok(r) => r, Err(_) => return vec![] };

        rows.filter_map(Result::ok).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn data_survives_reopening() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteLocalStore::new(path, "https://example.com").unwrap();
            store.set_item("a", "1").unwrap();
            store.set_item("b", "2").unwrap();
            store.set_item("a", "ONE").unwrap();
        }

        let store = SqliteLocalStore::new(path, "https://example.com").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_item("a").as_deref(), Some("ONE"));
        assert_eq!(store.keys(), vec!["a", "b"]);

        store.remove_item("a").unwrap();
        assert!(store.get_item("a").is_none());
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn origins_are_isolated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.db");
        let path = path.to_str().unwrap();

        let a = SqliteLocalStore::new(path, "https://a.test").unwrap();
        let b = SqliteLocalStore::new(path, "https://b.test").unwrap();

        a.set_item("k", "v").unwrap();
        assert!(b.get_item("k").is_none());
        assert_eq!(b.len(), 0);

        b.clear().unwrap();
        assert_eq!(a.get_item("k").as_deref(), Some("v"));
    }
}
