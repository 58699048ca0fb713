use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection};
use tracing::debug;

use super::{Score, ScoreId, ScoreStore, StoreError};

// AUTOINCREMENT keeps SQLite from handing out the id of a deleted max row again.
const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    score INTEGER NOT NULL
)";

// Tables written by older deployments may hold NULL names and NULL, REAL or
// TEXT scores. Coerce them so a single odd row cannot break every read.
const SELECT_ALL: &str = "SELECT id,
    COALESCE(CAST(name AS TEXT), 'Anon'),
    CAST(COALESCE(score, 0) AS INTEGER) AS points
FROM scores
ORDER BY points DESC, id ASC";

/// SQLite-backed [`ScoreStore`].
///
/// `rusqlite::Connection` is not `Sync`, so the connection sits behind a
/// `Mutex`. Statements are short and the dataset small; one connection is
/// plenty.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path` and ensures the
    /// `scores` table exists. Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Self::init(Connection::open(path)?)
    }

    /// Opens a private database that lives as long as the store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl ScoreStore for SqliteStore {
    fn insert(&self, username: &str, points: i64) -> Result<ScoreId, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO scores (name, score) VALUES (?1, ?2)",
            params![username, points],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, points, "inserted score");
        Ok(id)
    }

    fn select_all(&self) -> Result<Vec<Score>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(SELECT_ALL)?;
        let rows = stmt.query_map([], |row| {
            Ok(Score {
                id: row.get(0)?,
                username: row.get(1)?,
                points: row.get(2)?,
            })
        })?;
        let scores = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(scores)
    }

    fn delete_by_id(&self, id: ScoreId) -> Result<(), StoreError> {
        let removed = self
            .lock()?
            .execute("DELETE FROM scores WHERE id = ?1", params![id])?;
        debug!(id, removed, "deleted score");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_highest_points_first() {
        let store = SqliteStore::open_in_memory().expect("open store");
        store.insert("low", 5).expect("insert");
        store.insert("high", 90).expect("insert");
        store.insert("mid", 40).expect("insert");

        let points: Vec<i64> = store
            .select_all()
            .expect("select")
            .into_iter()
            .map(|s| s.points)
            .collect();
        assert_eq!(points, vec![90, 40, 5]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let store = SqliteStore::open_in_memory().expect("open store");
        let first = store.insert("first", 10).expect("insert");
        let second = store.insert("second", 10).expect("insert");

        let ids: Vec<ScoreId> = store
            .select_all()
            .expect("select")
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn deleting_missing_id_is_a_no_op() {
        let store = SqliteStore::open_in_memory().expect("open store");
        store.insert("alice", 12).expect("insert");

        store.delete_by_id(999).expect("delete missing");

        assert_eq!(store.select_all().expect("select").len(), 1);
    }

    #[test]
    fn coerces_rows_from_legacy_schema() {
        let conn = Connection::open_in_memory().expect("open connection");
        conn.execute_batch(
            "CREATE TABLE scores(id INTEGER PRIMARY KEY, name text, score int);
             INSERT INTO scores(name, score) VALUES ('half', 1.5);
             INSERT INTO scores(name, score) VALUES (NULL, 20);
             INSERT INTO scores(name, score) VALUES ('nothing', NULL);
             INSERT INTO scores(name, score) VALUES ('text', '7');",
        )
        .expect("seed legacy table");
        let store = SqliteStore::init(conn).expect("init store");

        let rows: Vec<(String, i64)> = store
            .select_all()
            .expect("select")
            .into_iter()
            .map(|s| (s.username, s.points))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Anon".to_string(), 20),
                ("text".to_string(), 7),
                ("half".to_string(), 1),
                ("nothing".to_string(), 0),
            ]
        );

        let id = store.insert("fresh", 5).expect("insert after legacy rows");
        assert!(store.select_all().expect("select").iter().any(|s| s.id == id));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = SqliteStore::open_in_memory().expect("open store");
        let first = store.insert("alice", 1).expect("insert");
        store.delete_by_id(first).expect("delete");

        let second = store.insert("bob", 2).expect("insert");
        assert!(second > first);
    }
}
