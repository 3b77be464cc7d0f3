//! Row-level queries against the transcript tables.
//!
//! Every method here issues exactly one query and performs no caching;
//! memoization and cross-entity resolution live in [`Seinfeld`](crate::Seinfeld).

use exn::ResultExt;
use seinfeld_asyncutils::Deferred;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{Episode, EpisodeRow, Episodes, QuoteRow, Season};
use crate::search::QuoteFilter;

#[derive(Debug, Clone)]
pub(crate) struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self::new(db.pool().clone())
    }
}
impl Repository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A fresh season value whose episode list is queried only when awaited.
    pub(crate) fn season(&self, number: u32) -> Season {
        let repo = self.clone();
        let episodes = Deferred::new(move || {
            let repo = repo.clone();
            async move { repo.episodes(Some(number)).await }
        });
        Season::new(number, episodes)
    }

    // =========================================================================
    // Speakers & Seasons
    // =========================================================================

    /// Every distinct speaker id, as stored.
    pub(crate) async fn speaker_ids(&self) -> Result<Vec<String>> {
        sqlx::query_scalar(include_str!("../queries/list_speakers.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)
    }

    /// Every distinct season number, ascending.
    pub(crate) async fn season_numbers(&self) -> Result<Vec<u32>> {
        let numbers: Vec<i64> = sqlx::query_scalar(include_str!("../queries/list_season_numbers.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        numbers
            .into_iter()
            .map(|n| u32::try_from(n).or_raise(|| ErrorKind::InvalidData("season number")))
            .collect()
    }

    // =========================================================================
    // Episodes
    // =========================================================================

    /// List episodes ordered by season then episode number, optionally
    /// restricted to one season.
    #[instrument(level = "debug", skip(self))]
    pub(crate) async fn episodes(&self, season: Option<u32>) -> Result<Episodes> {
        let rows: Vec<EpisodeRow> = match season {
            Some(number) => sqlx::query_as::<_, EpisodeRow>(include_str!("../queries/list_episodes_for_season.sql"))
                .bind(i64::from(number))
                .fetch_all(&self.pool)
                .await,
            None => {
                sqlx::query_as::<_, EpisodeRow>(include_str!("../queries/list_episodes.sql")).fetch_all(&self.pool).await
            },
        }
        .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(|row| row.into_episode(self)).collect()
    }

    #[instrument(level = "debug", skip(self))]
    pub(crate) async fn episode(&self, id: u64) -> Result<Option<Episode>> {
        // Ids beyond SQLite's integer range cannot be stored, so they never match.
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        let row: Option<EpisodeRow> = sqlx::query_as(include_str!("../queries/get_episode.sql"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(|row| row.into_episode(self)).transpose()
    }

    // =========================================================================
    // Quotes
    // =========================================================================

    pub(crate) async fn quote(&self, id: u64) -> Result<Option<QuoteRow>> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        sqlx::query_as(include_str!("../queries/get_quote.sql"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)
    }

    /// Quotes of one episode with utterance numbers in `start..=end`, in order.
    pub(crate) async fn quotes_in_range(&self, episode_id: u64, start: u32, end: u32) -> Result<Vec<QuoteRow>> {
        let episode_id = i64::try_from(episode_id).or_raise(|| ErrorKind::InvalidData("episode id"))?;
        sqlx::query_as(include_str!("../queries/list_quotes_in_range.sql"))
            .bind(episode_id)
            .bind(i64::from(start))
            .bind(i64::from(end))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)
    }

    pub(crate) async fn search(&self, filter: &QuoteFilter) -> Result<Vec<QuoteRow>> {
        let mut query = filter.query();
        query
            .build_query_as::<QuoteRow>()
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)
    }
}
