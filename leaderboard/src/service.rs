//! Leaderboard operations built on top of a [`ScoreStore`].
//!
//! Reads always rank the full table before applying a limit, so positions
//! reflect the whole leaderboard and not just the visible slice.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::rank::{rank, RankedScore};
use crate::store::{ScoreId, ScoreStore, StoreError};

/// Username recorded when a submission leaves it blank.
pub const DEFAULT_USERNAME: &str = "Anon";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The insert succeeded but the follow-up read could not find the row,
    /// e.g. because a concurrent delete removed it in between.
    #[error("score {id} vanished right after it was inserted")]
    Vanished { id: ScoreId },
}

/// Handle to the leaderboard. Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct Leaderboard {
    store: Arc<dyn ScoreStore>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Returns the ranked leaderboard, truncated to `limit` entries when one
    /// is given.
    pub fn list_scores(&self, limit: Option<usize>) -> Result<Vec<RankedScore>, ServiceError> {
        let mut ranked = rank(self.store.select_all()?);
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        Ok(ranked)
    }

    /// Looks up one entry with its current rank.
    ///
    /// This ranks the whole table and scans it, which is fine for the small
    /// boards this service is meant for.
    pub fn get_score(&self, id: ScoreId) -> Result<Option<RankedScore>, ServiceError> {
        Ok(self
            .list_scores(None)?
            .into_iter()
            .find(|entry| entry.score.id == id))
    }

    /// Records a new score and returns it with the rank it landed on.
    ///
    /// # Errors
    /// - Any store failure during the insert or the follow-up read
    /// - [`ServiceError::Vanished`] if the new row is gone by the time it is
    ///   read back
    pub fn submit_score(&self, username: &str, points: i64) -> Result<RankedScore, ServiceError> {
        let username = match username.trim() {
            "" => DEFAULT_USERNAME,
            name => name,
        };
        let id = self.store.insert(username, points)?;
        let entry = self.get_score(id)?.ok_or(ServiceError::Vanished { id })?;
        info!(id, username, points, position = entry.rank, "score submitted");
        Ok(entry)
    }

    /// Deletes an entry. Unknown ids are silently ignored.
    pub fn remove_score(&self, id: ScoreId) -> Result<(), ServiceError> {
        self.store.delete_by_id(id)?;
        Ok(())
    }
}

/// Maps a listing amount to a limit: negative amounts mean "everything".
pub fn limit_from_amount(amount: i64) -> Option<usize> {
    usize::try_from(amount).ok()
}
