use derive_more::Display;
use seinfeld_asyncutils::Deferred;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::models::Episodes;

/// Seasons keyed by season number, in ascending order.
pub type Seasons = BTreeMap<u32, Season>;

/// A season, with a lazily loaded list of its episodes.
///
/// Only the number identifies a season: equality and hashing ignore whether
/// the episode list has been loaded.
#[derive(Debug, Display, Clone)]
#[display("Season {number}")]
pub struct Season {
    pub number: u32,
    /// Every episode of this season, queried the first time it is awaited.
    pub episodes: Deferred<Episodes, Error>,
}

impl Season {
    pub fn new(number: u32, episodes: Deferred<Episodes, Error>) -> Self {
        Self { number, episodes }
    }

    /// Load (once) and return the episodes of this season.
    pub async fn episodes(&self) -> Result<&Episodes> {
        self.episodes.get().await
    }
}

impl PartialEq for Season {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Season {}

impl Hash for Season {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}
