//! Async, read-only access to the Seinfeld transcript database.
//!
//! The database holds three tables: `episode`, `utterance` (one speaker's
//! turn of dialogue) and `sentence`. On connect a temporary `quote` view
//! joins each utterance's sentences into a single text, and every quote
//! lookup reads from it.
//!
//! # Architecture
//! - [`Database`] owns the read-only connection pool and the `quote` view.
//! - [`Seinfeld`] is the query engine. It caches the [`Speakers`] and
//!   [`Seasons`] collections for the lifetime of the connection; episodes,
//!   quotes and passages are queried fresh on every call.
//! - Entities are plain value snapshots. A [`Season`] refers back to its
//!   episodes through a deferred handle, so loading an [`Episode`] never
//!   loads its siblings unless they are awaited.
//!
//! Lookups that find nothing return `Ok(None)`. Unknown speakers are
//! synthesized rather than rejected, but a quote whose episode is missing
//! is an [`ErrorKind::Integrity`](error::ErrorKind::Integrity) error.

mod db;
mod engine;
pub mod error;
mod models;
mod names;
mod repo;
mod search;
#[cfg(test)]
mod testing;

pub use crate::db::Database;
pub use crate::engine::Seinfeld;
pub use crate::models::{Episode, Episodes, Passage, Quote, Season, Seasons, Speaker, Speakers};
pub use crate::search::{Order, Search, SpeakerFilter};
pub use seinfeld_config::{Config, DatabaseConfig, QueryConfig};
