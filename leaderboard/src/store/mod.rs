//! Persistence for leaderboard rows.
//!
//! The service only talks to the [`ScoreStore`] trait. [`SqliteStore`] is the
//! durable implementation used in production; [`MemoryStore`] keeps rows in
//! process and backs the `--ephemeral` mode and unit tests.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Store-assigned row identifier. Never reused after deletion.
pub type ScoreId = i64;

/// A single stored leaderboard entry.
///
/// Rank is deliberately absent: it is derived on every read by
/// [`crate::rank::rank`] and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub id: ScoreId,
    pub username: String,
    #[serde(rename = "score")]
    pub points: i64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to prepare database directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store lock was poisoned")]
    Poisoned,
}

/// Durable table of `(id, username, points)` rows.
///
/// Every method is a single atomic operation; callers get no multi-statement
/// transactions.
pub trait ScoreStore: Send + Sync {
    /// Appends a row and returns its freshly assigned id.
    fn insert(&self, username: &str, points: i64) -> Result<ScoreId, StoreError>;

    /// Returns every row sorted by points, highest first. Rows with equal
    /// points keep ascending id order.
    fn select_all(&self) -> Result<Vec<Score>, StoreError>;

    /// Removes the row with `id`. Missing ids are not an error.
    fn delete_by_id(&self, id: ScoreId) -> Result<(), StoreError>;
}
