use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::SongDetails;
use crate::errors::CoreError;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
  #[error("network error: {0}")]
  Network(String),

  #[error("provider answered with status {0}")]
  Status(u16),

  #[error("undecodable response: {0}")]
  Decode(String),

  #[error("corrupt metadata: {0}")]
  Corrupt(String),
}

impl From<MetadataError> for CoreError {
  fn from(err: MetadataError) -> Self {
    CoreError::Provider(err.to_string())
  }
}

/// Port que abstrae la consulta de metadatos de una canción.
///
/// Given the caller's group and title, returns release date, lyrics and a
/// reference link, or fails. Implementations do not retry.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
  async fn song_details(&self, group: &str, title: &str) -> Result<SongDetails, MetadataError>;
}

#[async_trait]
impl<T: MetadataProvider + ?Sized> MetadataProvider for Arc<T> {
  async fn song_details(&self, group: &str, title: &str) -> Result<SongDetails, MetadataError> {
    (**self).song_details(group, title).await
  }
}
