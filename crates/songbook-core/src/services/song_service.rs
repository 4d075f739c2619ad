use tracing::{info, warn};

use crate::domain::{AddSong, NewSong, PageRequest, Song, SongFilter, SongId, SongPatch};
use crate::errors::CoreError;
use crate::lyrics::{join_verses, paginate_verses, split_into_verses};
use crate::ports::{MetadataProvider, SongRepository};

/// Orquesta el catálogo: repository calls plus the enrichment step on add.
pub struct SongService<M, R>
where
  M: MetadataProvider,
  R: SongRepository,
{
  metadata: M,
  repo: R,
}

impl<M, R> SongService<M, R>
where
  M: MetadataProvider,
  R: SongRepository,
{
  pub fn new(metadata: M, repo: R) -> Self {
    Self { metadata, repo }
  }

  // -------- QUERY (read) --------

  pub async fn list_songs(&self, filter: &SongFilter, page: PageRequest) -> Result<Vec<Song>, CoreError> {
    Ok(self.repo.list_songs(filter, page).await?)
  }

  /// One page of verses of the song's lyrics, joined back into text.
  pub async fn get_song_text(&self, id: &str, page: &str) -> Result<String, CoreError> {
    let id = parse_id(id)?;
    let text = self.repo.get_text(id).await?;

    let verses = split_into_verses(&text);
    let paged = paginate_verses(&verses, page)?;

    Ok(join_verses(paged))
  }

  // -------- COMMAND (write) --------

  /// Asks the provider for metadata, merges it with the caller's group and
  /// title and persists the result. A provider failure aborts before anything
  /// is written.
  pub async fn add_song(&self, request: AddSong) -> Result<SongId, CoreError> {
    if request.group.trim().is_empty() || request.title.trim().is_empty() {
      return Err(CoreError::InvalidInput("group and song are required".to_string()));
    }

    let details = self.metadata.song_details(&request.group, &request.title).await.map_err(|e| {
      warn!(group = %request.group, title = %request.title, error = %e, "metadata lookup failed");
      CoreError::from(e)
    })?;

    let song = NewSong::enriched(request, details);
    let id = self.repo.add_song(&song).await?;

    info!(%id, group = %song.group, title = %song.title, "song added");
    Ok(id)
  }

  pub async fn update_song(&self, id: &str, patch: &SongPatch) -> Result<(), CoreError> {
    let id = parse_id(id)?;
    Ok(self.repo.update_song(id, patch).await?)
  }

  pub async fn delete_song(&self, id: &str) -> Result<(), CoreError> {
    let id = parse_id(id)?;
    Ok(self.repo.delete_song(id).await?)
  }
}

/// A string that is not a song id cannot name a stored song.
fn parse_id(raw: &str) -> Result<SongId, CoreError> {
  raw.parse().map_err(|_| {
    warn!(id = raw, "malformed song id");
    CoreError::SongNotFound
  })
}
