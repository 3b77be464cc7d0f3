use crate::Config;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use std::path::Path;
use tracing::{debug, instrument};

/// Prefix of environment variables that override file-based configuration.
pub const ENV_PREFIX: &str = "SEINFELD_";

impl Config {
    /// Load configuration from the defaults, the per-user config file and
    /// the environment.
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment(None))
    }

    /// Like [`load`](Self::load), with an explicit file layered between the
    /// per-user config file and the environment.
    ///
    /// Unlike the per-user file, an explicit file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::MissingFile(path.to_path_buf()));
        }
        Self::from_figment(Self::figment(Some(path)))
    }

    /// Assemble every configuration source, without extracting it.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = defaults();
        if let Some(user_file) = crate::user_config_file() {
            figment = merge_file(figment, &user_file);
        }
        if let Some(file) = file {
            figment = merge_file(figment, file);
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate a configuration from any figment.
    #[instrument(level = "debug", skip(figment))]
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        debug!(database = %config.database.path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("database.path"));
        }
        if self.database.max_connections == 0 {
            exn::bail!(ErrorKind::Invalid("database.max_connections"));
        }
        if self.query.passage_length == 0 {
            exn::bail!(ErrorKind::Invalid("query.passage_length"));
        }
        Ok(())
    }
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}
