mod config;
pub mod http;
mod logger;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use songbook_config::{SongbookPaths, TomlConfigBackend};
use songbook_core::services::SongService;
use songbook_metadata::{HttpMetadataProvider, MetadataConfig};
use songbook_storage::{PgSongRepository, StorageConfig, connect, run_migrations};

pub use config::ServerConfig;
use http::AppState;

/// Loads configuration, prepares the database and serves the catalog API
/// until Ctrl-C or SIGTERM.
pub async fn run() -> anyhow::Result<()> {
  // .env is optional
  dotenvy::dotenv().ok();

  // --- Configuration ---
  let paths = SongbookPaths::detect().context("resolving config directories")?;
  let backend = TomlConfigBackend::new(paths);

  let server_cfg = ServerConfig::load(&backend).context("loading [server] config")?;
  logger::init(&server_cfg.log_level)?;
  info!(file = %backend.paths().config_file().display(), "configuration loaded");

  let storage_cfg = StorageConfig::load(&backend).context("loading [storage] config")?;
  let metadata_cfg = MetadataConfig::load(&backend).context("loading [metadata] config")?;

  // --- Persistence ---
  // Migrations go first; a schema that cannot be brought up to date aborts startup.
  let migrate_cfg = storage_cfg.clone();
  tokio::task::spawn_blocking(move || run_migrations(&migrate_cfg))
    .await?
    .context("running database migrations")?;

  let pool_cfg = storage_cfg.clone();
  let pool = tokio::task::spawn_blocking(move || connect(&pool_cfg))
    .await?
    .with_context(|| format!("connecting to {}", storage_cfg.redacted_url()))?;
  let repo = PgSongRepository::new(pool);

  // --- Metadata provider ---
  let provider = HttpMetadataProvider::new(&metadata_cfg)?;
  info!(base_url = provider.base_url(), timeout = ?metadata_cfg.timeout(), "metadata provider ready");

  // --- Service + HTTP ---
  let service = SongService::new(provider, repo);
  let app = http::router(AppState::new(service, server_cfg.request_timeout()), &server_cfg.base_path);

  let listener =
    TcpListener::bind(server_cfg.addr()).await.with_context(|| format!("binding {}", server_cfg.addr()))?;
  info!(
    addr = %listener.local_addr()?,
    base_path = %server_cfg.base_path,
    request_timeout = ?server_cfg.request_timeout(),
    "songbook listening"
  );

  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

  info!("songbook stopped");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "cannot listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "cannot listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  info!("shutdown signal received, draining connections");
}
