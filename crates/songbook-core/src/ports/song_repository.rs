use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewSong, PageRequest, Song, SongFilter, SongId, SongPatch};
use crate::errors::CoreError;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RepoError {
  #[error("song not found")]
  NotFound,
  #[error("song has no text")]
  NoText,
  #[error("patch has no fields set")]
  NothingToUpdate,
  #[error("invalid filter: {0}")]
  InvalidFilter(String),
  #[error("storage error: {0}")]
  Storage(String),
}

impl From<RepoError> for CoreError {
  fn from(err: RepoError) -> Self {
    match err {
      RepoError::NotFound => CoreError::SongNotFound,
      RepoError::NoText => CoreError::NoTextFound,
      RepoError::NothingToUpdate => CoreError::NothingToUpdate,
      RepoError::InvalidFilter(msg) => CoreError::InvalidInput(msg),
      RepoError::Storage(msg) => CoreError::Store(msg),
    }
  }
}

/// Storage port of the catalog. Implementations only persist; enrichment
/// happens before a record reaches `add_song`.
#[async_trait]
pub trait SongRepository: Send + Sync {
  /// Matching songs for one page. An empty result is not an error.
  async fn list_songs(&self, filter: &SongFilter, page: PageRequest) -> Result<Vec<Song>, RepoError>;

  /// Raw stored lyrics. `NotFound` when the id matches nothing, `NoText`
  /// when the row exists but its text is unset or empty.
  async fn get_text(&self, id: SongId) -> Result<String, RepoError>;

  async fn add_song(&self, song: &NewSong) -> Result<SongId, RepoError>;

  /// Applies only the fields set in `patch`. An empty patch fails with
  /// `NothingToUpdate` without touching the store.
  async fn update_song(&self, id: SongId, patch: &SongPatch) -> Result<(), RepoError>;

  async fn delete_song(&self, id: SongId) -> Result<(), RepoError>;
}

#[async_trait]
impl<T: SongRepository + ?Sized> SongRepository for Arc<T> {
  async fn list_songs(&self, filter: &SongFilter, page: PageRequest) -> Result<Vec<Song>, RepoError> {
    (**self).list_songs(filter, page).await
  }

  async fn get_text(&self, id: SongId) -> Result<String, RepoError> {
    (**self).get_text(id).await
  }

  async fn add_song(&self, song: &NewSong) -> Result<SongId, RepoError> {
    (**self).add_song(song).await
  }

  async fn update_song(&self, id: SongId, patch: &SongPatch) -> Result<(), RepoError> {
    (**self).update_song(id, patch).await
  }

  async fn delete_song(&self, id: SongId) -> Result<(), RepoError> {
    (**self).delete_song(id).await
  }
}
