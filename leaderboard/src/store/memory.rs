//! In-process score storage.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{Score, ScoreId, ScoreStore, StoreError};

/// [`ScoreStore`] that keeps rows in a `BTreeMap` keyed by id.
///
/// Nothing survives a restart. The map iterates in id order, which gives
/// ties the same ascending-id ordering as the SQLite store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Rows>,
}

#[derive(Default)]
struct Rows {
    by_id: BTreeMap<ScoreId, (String, i64)>,
    // Highest id ever handed out; deletions never lower it.
    last_id: ScoreId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Rows>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl ScoreStore for MemoryStore {
    fn insert(&self, username: &str, points: i64) -> Result<ScoreId, StoreError> {
        let mut rows = self.lock()?;
        rows.last_id += 1;
        let id = rows.last_id;
        rows.by_id.insert(id, (username.to_string(), points));
        Ok(id)
    }

    fn select_all(&self) -> Result<Vec<Score>, StoreError> {
        let rows = self.lock()?;
        let mut scores: Vec<Score> = rows
            .by_id
            .iter()
            .map(|(&id, (username, points))| Score {
                id,
                username: username.clone(),
                points: *points,
            })
            .collect();
        drop(rows);

        // Stable sort: equal points stay in id order.
        scores.sort_by(|a, b| b.points.cmp(&a.points));
        Ok(scores)
    }

    fn delete_by_id(&self, id: ScoreId) -> Result<(), StoreError> {
        self.lock()?.by_id.remove(&id);
        Ok(())
    }
}
