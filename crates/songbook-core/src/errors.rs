// crates/songbook-core/src/errors.rs
use thiserror::Error;

/// Error del núcleo del catálogo.
///
/// The first group are domain outcomes the boundary reports as information
/// rather than failure; the rest are faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
  #[error("song not found")]
  SongNotFound,

  #[error("no text found")]
  NoTextFound,

  #[error("nothing to update")]
  NothingToUpdate,

  #[error("invalid page number")]
  InvalidPage,

  #[error("page out of range")]
  PageOutOfRange,

  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("metadata provider error: {0}")]
  Provider(String),

  #[error("store error: {0}")]
  Store(String),

  #[error("deadline exceeded")]
  DeadlineExceeded,
}

impl CoreError {
  /// Domain outcomes that are not server faults.
  pub fn is_informational(&self) -> bool {
    matches!(
      self,
      CoreError::SongNotFound
        | CoreError::NoTextFound
        | CoreError::NothingToUpdate
        | CoreError::InvalidPage
        | CoreError::PageOutOfRange
    )
  }
}
