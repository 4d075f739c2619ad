//! Repository tests against a live PostgreSQL.
//!
//! Enabled with `--features integration_test`; the database named by
//! `DATABASE_URL` gets migrated and receives a few throwaway rows.
#![cfg(feature = "integration_test")]

use chrono::NaiveDate;
use songbook_core::domain::{NewSong, PageRequest, SongFilter, SongId, SongPatch};
use songbook_core::ports::{RepoError, SongRepository};
use songbook_storage::{PgSongRepository, StorageConfig, connect, run_migrations};

fn setup() -> Option<PgSongRepository> {
  dotenvy::dotenv().ok();
  let Ok(url) = std::env::var("DATABASE_URL") else {
    println!("Skipping integration test: DATABASE_URL not set");
    return None;
  };
  let cfg = StorageConfig { database_url: url, ..StorageConfig::default() };

  run_migrations(&cfg).unwrap();
  Some(PgSongRepository::new(connect(&cfg).unwrap()))
}

fn unique(prefix: &str) -> String {
  format!("{prefix}-{}", SongId::new())
}

#[tokio::test]
async fn add_then_read_text_round_trips() {
  let Some(repo) = setup() else { return };

  let mut song = NewSong::bare(unique("group"), "Round Trip");
  song.text = Some("one\n\ntwo".into());
  song.release_date = NaiveDate::from_ymd_opt(2006, 7, 16);
  let id = repo.add_song(&song).await.unwrap();

  assert_eq!(repo.get_text(id).await.unwrap(), "one\n\ntwo");
  repo.delete_song(id).await.unwrap();
}

#[tokio::test]
async fn text_errors_distinguish_missing_row_from_missing_text() {
  let Some(repo) = setup() else { return };

  let id = repo.add_song(&NewSong::bare(unique("group"), "No Text")).await.unwrap();

  assert_eq!(repo.get_text(id).await, Err(RepoError::NoText));
  repo.delete_song(id).await.unwrap();
  assert_eq!(repo.get_text(id).await, Err(RepoError::NotFound));
}

#[tokio::test]
async fn delete_removes_only_that_row() {
  let Some(repo) = setup() else { return };
  let group = unique("group");

  let keep = repo.add_song(&NewSong::bare(group.clone(), "Keep")).await.unwrap();
  let gone = repo.add_song(&NewSong::bare(group.clone(), "Gone")).await.unwrap();

  repo.delete_song(gone).await.unwrap();
  assert_eq!(repo.delete_song(gone).await, Err(RepoError::NotFound));

  let filter = SongFilter { group: Some(group), ..SongFilter::default() };
  let left = repo.list_songs(&filter, PageRequest::all()).await.unwrap();
  assert_eq!(left.len(), 1);
  assert_eq!(left[0].id, keep);

  repo.delete_song(keep).await.unwrap();
}

#[tokio::test]
async fn sparse_update_and_filtered_paging() {
  let Some(repo) = setup() else { return };
  let group = unique("paging");

  let mut ids = Vec::new();
  for title in ["A", "B", "C"] {
    ids.push(repo.add_song(&NewSong::bare(group.clone(), title)).await.unwrap());
  }

  let patch = SongPatch { link: Some("https://example.com".into()), ..SongPatch::default() };
  repo.update_song(ids[1], &patch).await.unwrap();
  assert_eq!(repo.update_song(SongId::new(), &patch).await, Err(RepoError::NotFound));

  let filter = SongFilter { group: Some(group.to_uppercase()), ..SongFilter::default() };
  let second = repo.list_songs(&filter, PageRequest::new(2, 1)).await.unwrap();
  assert_eq!(second.len(), 1);
  assert_eq!(second[0].title.as_deref(), Some("B"));
  assert_eq!(second[0].link.as_deref(), Some("https://example.com"));
  assert_eq!(second[0].group.as_deref(), Some(group.as_str()));

  for id in ids {
    repo.delete_song(id).await.unwrap();
  }
}
