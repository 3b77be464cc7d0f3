use derive_more::Display;
use exn::ResultExt;

use crate::error::{ErrorKind, Result};
use crate::models::{Episode, Speaker};

/// One or more sentences from a single speaker in a single episode.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
#[display("{speaker}: {text}")]
pub struct Quote {
    /// Id of the underlying utterance.
    pub id: u64,
    pub episode: Episode,
    /// Sequence number of the utterance within its episode.
    pub number: u32,
    pub speaker: Speaker,
    pub text: String,
}

/// A row of the `quote` view.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct QuoteRow {
    pub(crate) id: i64,
    pub(crate) episode_id: i64,
    pub(crate) utterance_number: i64,
    pub(crate) speaker: String,
    pub(crate) text: String,
}

impl QuoteRow {
    pub(crate) fn episode_id(&self) -> Result<u64> {
        u64::try_from(self.episode_id).or_raise(|| ErrorKind::InvalidData("episode id"))
    }

    pub(crate) fn quote_id(&self) -> Result<u64> {
        u64::try_from(self.id).or_raise(|| ErrorKind::InvalidData("quote id"))
    }

    /// Assemble the quote from its already-resolved episode and speaker.
    pub(crate) fn into_quote(self, episode: Episode, speaker: Speaker) -> Result<Quote> {
        Ok(Quote {
            id: self.quote_id()?,
            episode,
            number: u32::try_from(self.utterance_number).or_raise(|| ErrorKind::InvalidData("utterance number"))?,
            speaker,
            text: self.text,
        })
    }
}
