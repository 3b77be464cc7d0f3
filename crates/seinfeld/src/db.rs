//! Database connection and pool management.

use exn::ResultExt;
use seinfeld_config::DatabaseConfig;
use sqlx::SqliteConnection;
use sqlx::pool::PoolConnectionMetadata;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{ErrorKind, Result};

/// Read-only connection pool over an existing transcript database.
///
/// The database is never written to: opening it does not create the file,
/// and the only schema object this crate adds is the per-connection
/// temporary `quote` view.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database at the given path with default connection settings.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let config = DatabaseConfig { path: path.as_ref().to_path_buf(), ..DatabaseConfig::default() };
        Self::connect(&config).await
    }

    /// Open the database described by `config`.
    ///
    /// Fails with [`ErrorKind::Configuration`] before touching SQLite if the
    /// path is not an existing file.
    #[instrument(level = "debug", skip_all, fields(path = %config.path.display()))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let path = config.path.as_path();
        if !path.is_file() {
            exn::bail!(ErrorKind::Configuration(path.to_path_buf()));
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));
        let pool = SqlitePoolOptions::new()
            // TEMP views only exist on the connection that created them, so
            // every pooled connection needs its own.
            .after_connect(|conn, meta| Box::pin(async move { Self::create_views(conn, meta).await }))
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)?;
        debug!(max_connections = config.max_connections, "database opened");
        Ok(Self { pool })
    }

    /// Create the `quote` view: one row per utterance, with its sentences
    /// joined by single spaces in sentence order.
    async fn create_views(conn: &mut SqliteConnection, _meta: PoolConnectionMetadata) -> sqlx::Result<()> {
        sqlx::query(include_str!("../queries/create_quote_view.sql")).execute(conn).await?;
        Ok(())
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Close the connection pool.
    ///
    /// Waits for checked-out connections to be returned, then closes them.
    /// Any query issued afterwards (including by clones of this handle)
    /// fails with [`ErrorKind::Database`].
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("database closed");
    }

    /// A guard that closes the pool when dropped, even if the owning future
    /// is cancelled before it can await [`close`](Self::close).
    pub(crate) fn close_on_drop(&self) -> CloseOnDrop {
        CloseOnDrop { pool: self.pool.clone() }
    }
}

/// Closes a pool on drop.
///
/// The pool is marked closed synchronously, so every handle sharing it
/// (including repositories captured by deferred season handles) rejects new
/// queries immediately. Idle connections are released once the last pool
/// handle is dropped.
#[derive(Debug)]
pub(crate) struct CloseOnDrop {
    pool: SqlitePool,
}

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            let _ = self.pool.close();
            debug!("database closed on drop");
        }
    }
}
