//! The query engine: entity lookups, passages and searches over one
//! database, with the speaker and season collections cached per connection.

use seinfeld_asyncutils::Cached;
use seinfeld_config::{Config, QueryConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, instrument, trace};

use crate::Database;
use crate::error::{Error, ErrorKind, Result};
use crate::models::{Episode, Episodes, Passage, Quote, QuoteRow, Season, Seasons, Speaker, Speakers};
use crate::names::canonical;
use crate::repo::Repository;
use crate::search::{QuoteFilter, Search, SpeakerFilter};

/// Read-only access to a transcript database.
///
/// Cloning is cheap; clones share the connection pool and the cached
/// speaker and season collections.
///
/// ```no_run
/// # async fn run() -> seinfeld::error::Result<()> {
/// use seinfeld::{Search, Seinfeld};
///
/// let count = Seinfeld::scope("seinfeld.db", async |seinfeld: &Seinfeld| {
///     let jerry = seinfeld.speaker("jerry").await?;
///     Ok(seinfeld.search(Search::new().speaker(jerry).unlimited()).await?.len())
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Seinfeld {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    db: Database,
    repo: Repository,
    speakers: Cached<Speakers, Error>,
    seasons: Cached<Seasons, Error>,
    defaults: QueryConfig,
}

impl Seinfeld {
    /// Wrap an open database, using `defaults` for queries that don't
    /// specify a passage length or search limit.
    pub fn new(db: Database, defaults: QueryConfig) -> Self {
        let repo = Repository::from(&db);
        let speakers = {
            let repo = repo.clone();
            Cached::new(move || {
                let repo = repo.clone();
                async move { load_speakers(&repo).await }
            })
        };
        let seasons = {
            let repo = repo.clone();
            Cached::new(move || {
                let repo = repo.clone();
                async move { load_seasons(&repo).await }
            })
        };
        Self { inner: Arc::new(Inner { db, repo, speakers, seasons, defaults }) }
    }

    /// Open the database at `path` with default settings.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Database::open(path).await?, QueryConfig::default()))
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Database::connect(&config.database).await?, config.query.clone()))
    }

    /// Open the database at `path`, run `body`, then close the database
    /// whether or not `body` succeeded.
    ///
    /// If the returned future is dropped before completing, the database is
    /// still closed: handles that escaped `body` (clones, episodes and their
    /// season handles) fail with [`ErrorKind::Database`] from then on.
    pub async fn scope<R>(path: impl AsRef<Path>, body: impl AsyncFnOnce(&Seinfeld) -> Result<R>) -> Result<R> {
        let seinfeld = Self::open(path).await?;
        let _guard = seinfeld.inner.db.close_on_drop();
        let result = body(&seinfeld).await;
        seinfeld.close().await;
        result
    }

    pub fn database(&self) -> &Database {
        &self.inner.db
    }

    /// Close the underlying database; later queries on any clone fail.
    pub async fn close(&self) {
        self.inner.db.close().await;
    }

    // =========================================================================
    // Speakers
    // =========================================================================

    /// Every speaker, keyed by canonical (lower-cased) id.
    pub async fn speakers(&self) -> Result<&Speakers> {
        self.inner.speakers.get().await
    }

    /// Look up a speaker case-insensitively.
    ///
    /// Unknown names are not an error: a speaker is synthesized from the
    /// name as given.
    #[instrument(level = "debug", skip(self))]
    pub async fn speaker(&self, name: &str) -> Result<Speaker> {
        if let Some(speaker) = self.speakers().await?.get(&canonical(name)) {
            return Ok(speaker.clone());
        }
        trace!("unknown speaker, synthesizing");
        Ok(Speaker::from_id(name))
    }

    // =========================================================================
    // Seasons & Episodes
    // =========================================================================

    /// Every season, ascending. Each season's episodes load on first await.
    pub async fn seasons(&self) -> Result<&Seasons> {
        self.inner.seasons.get().await
    }

    pub async fn season(&self, number: u32) -> Result<Option<&Season>> {
        Ok(self.seasons().await?.get(&number))
    }

    /// Episodes ordered by season and episode number, optionally restricted
    /// to a single season. A season without episodes yields an empty list.
    pub async fn episodes(&self, season: Option<u32>) -> Result<Episodes> {
        self.inner.repo.episodes(season).await
    }

    pub async fn episode(&self, id: u64) -> Result<Option<Episode>> {
        self.inner.repo.episode(id).await
    }

    // =========================================================================
    // Quotes
    // =========================================================================

    /// Look up a quote by id.
    ///
    /// Fails with [`ErrorKind::Integrity`] if the quote exists but its
    /// episode does not.
    #[instrument(level = "debug", skip(self))]
    pub async fn quote(&self, id: u64) -> Result<Option<Quote>> {
        match self.inner.repo.quote(id).await? {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    /// The quotes surrounding `quote` in its episode.
    ///
    /// The window holds `length` utterances (the configured default when
    /// `None`) starting `length / 2` before the seed, clamped to the start
    /// of the episode. Near the end of an episode the window is shorter.
    #[instrument(level = "debug", skip_all, fields(quote = quote.id))]
    pub async fn passage(&self, quote: &Quote, length: impl Into<Option<u32>>) -> Result<Passage> {
        let length = length.into().unwrap_or(self.inner.defaults.passage_length);
        let mut quotes = Vec::new();
        if let Some((start, end)) = window(quote.number, length) {
            for row in self.inner.repo.quotes_in_range(quote.episode.id, start, end).await? {
                let speaker = self.speaker(&row.speaker).await?;
                quotes.push(row.into_quote(quote.episode.clone(), speaker)?);
            }
        }
        Ok(Passage { id: quote.id, episode: quote.episode.clone(), quotes })
    }

    /// Find quotes matching every filter set on `search`.
    #[instrument(level = "debug", skip(self))]
    pub async fn search(&self, search: Search) -> Result<Vec<Quote>> {
        let order = search.order();
        let speaker_id = match search.speaker {
            Some(SpeakerFilter::Speaker(speaker)) => Some(speaker.id),
            Some(SpeakerFilter::Name(name)) if !name.is_empty() => Some(self.speaker(&name).await?.id),
            _ => None,
        };
        let limit = search.limit.unwrap_or(self.inner.defaults.search_limit);
        let filter = QuoteFilter {
            speaker_id,
            subject: search.subject.filter(|subject| !subject.is_empty()),
            order,
            limit: (limit > 0).then_some(limit),
        };
        let rows = self.inner.repo.search(&filter).await?;
        debug!(results = rows.len(), "search complete");
        let mut quotes = Vec::with_capacity(rows.len());
        for row in rows {
            quotes.push(self.assemble(row).await?);
        }
        Ok(quotes)
    }

    /// A single random quote matching `search`, if any.
    ///
    /// Any limit or ordering set on `search` is overridden.
    pub async fn random(&self, search: Search) -> Result<Option<Quote>> {
        Ok(self.search(search.limit(1).random(true)).await?.into_iter().next())
    }

    /// Resolve a quote row's episode and speaker.
    async fn assemble(&self, row: QuoteRow) -> Result<Quote> {
        let episode_id = row.episode_id()?;
        let Some(episode) = self.inner.repo.episode(episode_id).await? else {
            let quote = row.quote_id()?;
            error!(quote, episode = episode_id, "quote references a missing episode");
            exn::bail!(ErrorKind::Integrity { quote, episode: episode_id });
        };
        let speaker = self.speaker(&row.speaker).await?;
        row.into_quote(episode, speaker)
    }
}

async fn load_speakers(repo: &Repository) -> Result<Speakers> {
    let speakers = repo
        .speaker_ids()
        .await?
        .into_iter()
        .map(|id| (canonical(&id), Speaker::from_id(id)))
        .collect::<Speakers>();
    debug!(count = speakers.len(), "speakers cached");
    Ok(speakers)
}

async fn load_seasons(repo: &Repository) -> Result<Seasons> {
    let seasons = repo
        .season_numbers()
        .await?
        .into_iter()
        .map(|number| (number, repo.season(number)))
        .collect::<Seasons>();
    debug!(count = seasons.len(), "seasons cached");
    Ok(seasons)
}

/// Inclusive range of utterance numbers for a passage of `length` around `middle`.
fn window(middle: u32, length: u32) -> Option<(u32, u32)> {
    if length == 0 {
        return None;
    }
    let start = middle.saturating_sub(length / 2).max(1);
    Some((start, start.saturating_add(length - 1)))
}
