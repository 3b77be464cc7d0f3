//! Normalization of the free-text name and date columns.

use exn::ResultExt;
use time::Date;
use time::macros::format_description;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Upper-case the first character and lower-case the rest.
///
/// Only the very first character is upper-cased, so `"LARRY DAVID"` becomes
/// `"Larry david"`.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Canonical lookup key for a speaker name.
pub(crate) fn canonical(name: &str) -> String {
    name.to_lowercase()
}

/// Split a comma-separated list of names, capitalizing each one.
pub(crate) fn split_names(raw: &str) -> Vec<String> {
    raw.split(',').map(|name| capitalize(name.trim())).collect()
}

/// Parse an air date, stored either as `1989-07-05` or as `July 5, 1989`.
#[instrument(level = "trace")]
pub(crate) fn parse_date(raw: &str) -> Result<Date> {
    let raw = raw.trim();
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .or_else(|_| Date::parse(raw, format_description!("[month repr:long] [day padding:none], [year]")))
        .or_raise(|| ErrorKind::InvalidData("episode date"))
}
