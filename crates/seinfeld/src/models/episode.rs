use derive_more::Display;
use exn::ResultExt;
use time::Date;

use crate::error::{ErrorKind, Result};
use crate::models::Season;
use crate::names::{capitalize, parse_date, split_names};
use crate::repo::Repository;

/// Episodes in query order (by default season, then episode number).
pub type Episodes = Vec<Episode>;

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
#[display("S{:02}E{:02}: {title}", season.number, number)]
pub struct Episode {
    pub id: u64,
    /// The season this episode belongs to. Each episode carries its own
    /// season handle, so loading the sibling episodes is opt-in per episode.
    pub season: Season,
    /// Position within the season, starting at 1.
    pub number: u32,
    pub title: String,
    /// Original air date.
    pub date: Date,
    pub writers: Vec<String>,
    pub director: String,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EpisodeRow {
    pub(crate) id: i64,
    pub(crate) season_number: i64,
    pub(crate) episode_number: i64,
    pub(crate) title: String,
    pub(crate) the_date: String,
    pub(crate) writer: String,
    pub(crate) director: String,
}

impl EpisodeRow {
    /// Assemble the episode, giving it a fresh (unresolved) season handle.
    pub(crate) fn into_episode(self, repo: &Repository) -> Result<Episode> {
        let season = u32::try_from(self.season_number).or_raise(|| ErrorKind::InvalidData("season number"))?;
        Ok(Episode {
            id: u64::try_from(self.id).or_raise(|| ErrorKind::InvalidData("episode id"))?,
            season: repo.season(season),
            number: u32::try_from(self.episode_number).or_raise(|| ErrorKind::InvalidData("episode number"))?,
            title: self.title,
            date: parse_date(&self.the_date)?,
            writers: split_names(&self.writer),
            director: capitalize(self.director.trim()),
        })
    }
}
