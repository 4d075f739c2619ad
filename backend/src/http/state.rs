use std::sync::Arc;
use std::time::Duration;

use songbook_core::ports::{MetadataProvider, SongRepository};
use songbook_core::services::SongService;

/// Shared by every handler. Cloning only bumps the service's refcount.
pub struct AppState<M, R>
where
  M: MetadataProvider,
  R: SongRepository,
{
  pub songs: Arc<SongService<M, R>>,
  pub request_timeout: Duration,
}

impl<M, R> AppState<M, R>
where
  M: MetadataProvider,
  R: SongRepository,
{
  pub fn new(songs: SongService<M, R>, request_timeout: Duration) -> Self {
    Self { songs: Arc::new(songs), request_timeout }
  }
}

// derive(Clone) would demand M: Clone and R: Clone.
impl<M, R> Clone for AppState<M, R>
where
  M: MetadataProvider,
  R: SongRepository,
{
  fn clone(&self) -> Self {
    Self { songs: Arc::clone(&self.songs), request_timeout: self.request_timeout }
  }
}
