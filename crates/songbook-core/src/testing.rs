//! In-memory port implementations for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{
  NewSong, PageRequest, Song, SongDetails, SongFilter, SongId, SongPatch, parse_release_date,
};
use crate::ports::{MetadataError, MetadataProvider, RepoError, SongRepository};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
  m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Vec-backed repository that mimics the SQL adapter's semantics and counts
/// every statement it would have sent to a database.
#[derive(Default)]
pub struct InMemorySongRepository {
  songs: Mutex<Vec<Song>>,
  statements: AtomicUsize,
}

impl InMemorySongRepository {
  pub fn insert(&self, song: Song) {
    lock(&self.songs).push(song);
  }

  pub fn find(&self, id: SongId) -> Option<Song> {
    lock(&self.songs).iter().find(|s| s.id == id).cloned()
  }

  pub fn len(&self) -> usize {
    lock(&self.songs).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Statements issued so far.
  pub fn statements(&self) -> usize {
    self.statements.load(Ordering::SeqCst)
  }

  fn statement(&self) {
    self.statements.fetch_add(1, Ordering::SeqCst);
  }
}

fn contains_ci(haystack: &Option<String>, needle: &str) -> bool {
  haystack.as_deref().is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

#[async_trait]
impl SongRepository for InMemorySongRepository {
  async fn list_songs(&self, filter: &SongFilter, page: PageRequest) -> Result<Vec<Song>, RepoError> {
    let release_date = match filter.release_date() {
      Some(raw) => Some(
        parse_release_date(raw).ok_or_else(|| RepoError::InvalidFilter(format!("release_date {raw:?}")))?,
      ),
      None => None,
    };
    self.statement();

    let songs = lock(&self.songs);
    let matching = songs
      .iter()
      .filter(|s| filter.group().is_none_or(|g| contains_ci(&s.group, g)))
      .filter(|s| filter.title().is_none_or(|t| contains_ci(&s.title, t)))
      .filter(|s| release_date.is_none_or(|d| s.release_date == Some(d)))
      .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX));

    let page_songs = if page.limit > 0 {
      matching.take(page.limit as usize).cloned().collect()
    } else {
      matching.cloned().collect()
    };
    Ok(page_songs)
  }

  async fn get_text(&self, id: SongId) -> Result<String, RepoError> {
    self.statement();
    let song = self.find(id).ok_or(RepoError::NotFound)?;
    song.text.filter(|t| !t.is_empty()).ok_or(RepoError::NoText)
  }

  async fn add_song(&self, song: &NewSong) -> Result<SongId, RepoError> {
    self.statement();
    let id = SongId::new();
    self.insert(Song {
      id,
      group: Some(song.group.clone()),
      title: Some(song.title.clone()),
      release_date: song.release_date,
      text: song.text.clone(),
      link: song.link.clone(),
    });
    Ok(id)
  }

  async fn update_song(&self, id: SongId, patch: &SongPatch) -> Result<(), RepoError> {
    if patch.is_empty() {
      return Err(RepoError::NothingToUpdate);
    }
    self.statement();

    let mut songs = lock(&self.songs);
    let song = songs.iter_mut().find(|s| s.id == id).ok_or(RepoError::NotFound)?;
    if let Some(group) = &patch.group {
      song.group = Some(group.clone());
    }
    if let Some(title) = &patch.title {
      song.title = Some(title.clone());
    }
    if let Some(date) = patch.release_date {
      song.release_date = Some(date);
    }
    if let Some(text) = &patch.text {
      song.text = Some(text.clone());
    }
    if let Some(link) = &patch.link {
      song.link = Some(link.clone());
    }
    Ok(())
  }

  async fn delete_song(&self, id: SongId) -> Result<(), RepoError> {
    self.statement();
    let mut songs = lock(&self.songs);
    let pos = songs.iter().position(|s| s.id == id).ok_or(RepoError::NotFound)?;
    songs.remove(pos);
    Ok(())
  }
}

/// Provider that always answers the same way and records what it was asked.
pub struct StaticMetadataProvider {
  answer: Result<SongDetails, MetadataError>,
  calls: Mutex<Vec<(String, String)>>,
}

impl StaticMetadataProvider {
  pub fn returning(details: SongDetails) -> Self {
    Self { answer: Ok(details), calls: Mutex::new(Vec::new()) }
  }

  pub fn failing(error: MetadataError) -> Self {
    Self { answer: Err(error), calls: Mutex::new(Vec::new()) }
  }

  pub fn calls(&self) -> Vec<(String, String)> {
    lock(&self.calls).clone()
  }
}

#[async_trait]
impl MetadataProvider for StaticMetadataProvider {
  async fn song_details(&self, group: &str, title: &str) -> Result<SongDetails, MetadataError> {
    lock(&self.calls).push((group.to_string(), title.to_string()));
    self.answer.clone()
  }
}
