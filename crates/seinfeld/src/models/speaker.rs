use derive_more::Display;
use std::collections::HashMap;

use crate::names::capitalize;

/// Speakers keyed by their canonical (lower-cased) id.
pub type Speakers = HashMap<String, Speaker>;

/// Someone with at least one line of dialogue.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
#[display("{name}")]
pub struct Speaker {
    /// The speaker as written in the transcript.
    pub id: String,
    /// Display form of the id.
    pub name: String,
}

impl Speaker {
    /// Build a speaker from its stored id, deriving the display name.
    pub(crate) fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self { name: capitalize(&id), id }
    }
}
