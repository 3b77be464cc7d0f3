use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::models::{Episode, Quote};

/// One or more consecutive quotes from a single episode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Passage {
    /// Id of the quote the passage was built around.
    pub id: u64,
    pub episode: Episode,
    /// Quotes in utterance order.
    pub quotes: Vec<Quote>,
}

impl Passage {
    /// The quote the passage was built around, if it is part of the window.
    pub fn seed(&self) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.id == self.id)
    }
}

impl Display for Passage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, quote) in self.quotes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{quote}")?;
        }
        Ok(())
    }
}
