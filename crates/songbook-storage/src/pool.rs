use diesel::prelude::*;
use diesel::r2d2::{Builder, ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::StorageConfig;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("connection error: {0}")]
  Connection(#[from] diesel::ConnectionError),
  #[error("connection pool error: {0}")]
  Pool(#[from] PoolError),
  #[error("migration error: {0}")]
  Migration(String),
}

/// Sets `statement_timeout` on every connection the pool hands out, so the
/// server aborts a statement whose request has already given up on it.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout {
  millis: u64,
}

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
  fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
    diesel::sql_query(format!("SET statement_timeout = {}", self.millis))
      .execute(conn)
      .map(|_| ())
      .map_err(diesel::r2d2::Error::QueryError)
  }
}

fn builder(cfg: &StorageConfig) -> Builder<ConnectionManager<PgConnection>> {
  let mut builder = Pool::builder()
    .max_size(cfg.max_connections)
    .min_idle(cfg.min_idle)
    .connection_timeout(cfg.connection_timeout())
    .idle_timeout(cfg.idle_timeout())
    .max_lifetime(cfg.max_lifetime());

  if let Some(millis) = cfg.statement_timeout_ms {
    builder = builder.connection_customizer(Box::new(StatementTimeout { millis }));
  }
  builder
}

/// Builds the pool and checks that the database answers.
pub fn connect(cfg: &StorageConfig) -> Result<PgPool, StorageError> {
  let manager = ConnectionManager::<PgConnection>::new(&cfg.database_url);
  let pool = builder(cfg).build(manager)?;

  // `build` only waits for `min_idle` connections; make sure at least one works.
  pool.get()?;

  info!(
    url = %cfg.redacted_url(),
    max_connections = cfg.max_connections,
    idle_timeout = ?cfg.idle_timeout(),
    max_lifetime = ?cfg.max_lifetime(),
    "connected to postgres pool"
  );
  Ok(pool)
}

/// A pool that opens connections on first use only.
pub fn connect_lazy(cfg: &StorageConfig) -> PgPool {
  builder(cfg).build_unchecked(ConnectionManager::<PgConnection>::new(&cfg.database_url))
}

/// Applies pending embedded migrations over a dedicated connection.
///
/// Each migration runs in its own transaction, so a failing one leaves the
/// schema at the last good version. Returns the versions applied.
pub fn run_migrations(cfg: &StorageConfig) -> Result<Vec<String>, StorageError> {
  let mut conn = PgConnection::establish(&cfg.database_url)?;

  let applied: Vec<String> = conn
    .run_pending_migrations(MIGRATIONS)
    .map_err(|e| StorageError::Migration(e.to_string()))?
    .into_iter()
    .map(|v| v.to_string())
    .collect();

  if applied.is_empty() {
    debug!("no migrations to apply");
  } else {
    info!(versions = ?applied, "migrations applied");
  }
  Ok(applied)
}
