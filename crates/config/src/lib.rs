//! Configuration for opening and querying a transcript database.
//!
//! Values are merged from several sources, lowest to highest precedence:
//! 1. Built-in defaults ([`Config::default`]).
//! 2. `config.toml` in the per-user configuration directory, if present.
//! 3. An explicitly supplied TOML or YAML file, if any.
//! 4. Environment variables prefixed with `SEINFELD_`, using `__` to reach
//!    nested keys (e.g. `SEINFELD_DATABASE__PATH=/srv/seinfeld.db`).

pub mod error;
mod loader;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::loader::ENV_PREFIX;

const DATABASE_FILENAME: &str = "seinfeld.db";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 1;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 1500;
pub const DEFAULT_PASSAGE_LENGTH: u32 = 5;
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Location of the (already populated) SQLite database file.
    pub path: PathBuf,
    /// Size of the connection pool. Queries are independent reads, but one
    /// connection keeps every query on a single serialized flow.
    pub max_connections: u32,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: project_dirs()
                .map(|dirs| dirs.data_dir().join(DATABASE_FILENAME))
                .unwrap_or_else(|| PathBuf::from(DATABASE_FILENAME)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// Defaults applied to queries that don't specify their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Number of quotes in a passage.
    pub passage_length: u32,
    /// Maximum number of search results; zero or negative means unlimited.
    pub search_limit: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { passage_length: DEFAULT_PASSAGE_LENGTH, search_limit: DEFAULT_SEARCH_LIMIT }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "seinfeld")
}

/// The per-user configuration file, if the platform has a home directory.
pub fn user_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}
