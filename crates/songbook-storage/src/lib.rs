pub mod config;
pub mod models;
pub mod pool;
pub mod query;
pub mod repository;
pub mod schema;

pub use config::StorageConfig;
pub use pool::{MIGRATIONS, PgPool, StorageError, connect, connect_lazy, run_migrations};
pub use repository::PgSongRepository;
