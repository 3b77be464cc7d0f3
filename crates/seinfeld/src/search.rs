//! Quote search filters.

use sqlx::{QueryBuilder, Sqlite};

use crate::models::Speaker;

/// Who a search is restricted to.
///
/// A [`Speaker`] is matched by its id as-is; a plain name is first resolved
/// case-insensitively against the known speakers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakerFilter {
    Speaker(Speaker),
    Name(String),
}

impl From<Speaker> for SpeakerFilter {
    fn from(speaker: Speaker) -> Self {
        Self::Speaker(speaker)
    }
}
impl From<&Speaker> for SpeakerFilter {
    fn from(speaker: &Speaker) -> Self {
        Self::Speaker(speaker.clone())
    }
}
impl From<String> for SpeakerFilter {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
impl From<&str> for SpeakerFilter {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// By episode, then utterance number.
    Ascending,
    /// By episode, then utterance number, both descending.
    Descending,
    /// A different arbitrary order on every call.
    Random,
}

/// A quote search, built up with chained setters.
///
/// ```no_run
/// # use seinfeld::{Search, Seinfeld};
/// # async fn run(seinfeld: &Seinfeld) -> seinfeld::error::Result<()> {
/// let quotes = seinfeld.search(Search::new().speaker("jerry").subject("parking").limit(3)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Search {
    pub(crate) speaker: Option<SpeakerFilter>,
    pub(crate) subject: Option<String>,
    pub(crate) limit: Option<i64>,
    reverse: bool,
    random: bool,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only match quotes by this speaker.
    pub fn speaker(mut self, speaker: impl Into<SpeakerFilter>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    /// Only match quotes containing this text (case-sensitive).
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Cap the number of results. Zero or a negative number removes the cap.
    ///
    /// When never called, the connection's default limit applies.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return every match.
    pub fn unlimited(self) -> Self {
        self.limit(0)
    }

    /// Order newest-first. Ignored when [`random`](Self::random) is set.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Order randomly, taking precedence over [`reverse`](Self::reverse).
    pub fn random(mut self, random: bool) -> Self {
        self.random = random;
        self
    }

    pub fn order(&self) -> Order {
        match (self.random, self.reverse) {
            (true, _) => Order::Random,
            (false, true) => Order::Descending,
            (false, false) => Order::Ascending,
        }
    }
}

/// A search with its speaker resolved to a stored id and its limit settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuoteFilter {
    pub(crate) speaker_id: Option<String>,
    pub(crate) subject: Option<String>,
    pub(crate) order: Order,
    /// `None` returns every match.
    pub(crate) limit: Option<i64>,
}

impl QuoteFilter {
    pub(crate) fn query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut query = QueryBuilder::new(include_str!("../queries/search_quotes.sql"));
        if self.speaker_id.is_some() || self.subject.is_some() {
            query.push("WHERE ");
            {
                let mut conditions = query.separated(" AND ");
                if let Some(speaker_id) = &self.speaker_id {
                    conditions.push("speaker = ").push_bind_unseparated(speaker_id.clone());
                }
                // instr() rather than LIKE: case-sensitive, and no wildcard characters to escape.
                if let Some(subject) = &self.subject {
                    conditions.push("instr(text, ").push_bind_unseparated(subject.clone()).push_unseparated(") > 0");
                }
            }
            query.push("\n");
        }
        query.push(match self.order {
            Order::Random => "ORDER BY random()",
            Order::Descending => "ORDER BY episode_id DESC, utterance_number DESC",
            Order::Ascending => "ORDER BY episode_id ASC, utterance_number ASC",
        });
        if let Some(limit) = self.limit {
            query.push("\nLIMIT ").push_bind(limit);
        }
        query
    }
}
