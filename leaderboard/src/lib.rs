//! Minimal leaderboard service.
//!
//! Players submit `(username, score)` pairs through a small JSON API; anyone
//! can read the ranked listing either as JSON or as a rendered HTML page.
//! Mutating routes are guarded by a single shared bearer token.
//!
//! Each module focuses on a concrete responsibility:
//!
//! - [`store`] persists score rows, in SQLite or in memory.
//! - [`rank`] turns points-descending rows into dense competition ranks.
//! - [`service`] composes the store and the ranking into leaderboard operations.
//! - [`api`] exposes the operations over HTTP and enforces authorization.
//! - [`views`] renders the HTML leaderboard and error pages.
//! - [`cli`] parses the command line and environment configuration.
//!
//! Integration tests drive [`api::router`] directly with `tower::ServiceExt`.

pub mod api;
pub mod cli;
pub mod rank;
pub mod service;
pub mod store;
pub mod views;
