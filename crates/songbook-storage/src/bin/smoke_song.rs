use songbook_core::domain::{NewSong, PageRequest, SongFilter, SongPatch};
use songbook_core::ports::SongRepository;
use songbook_storage::{PgSongRepository, StorageConfig, connect, run_migrations};

#[tokio::main]
async fn main() {
  // Apunta a la misma base que el servidor: DATABASE_URL o el valor por defecto.
  dotenvy::dotenv().ok();
  let mut cfg = StorageConfig::default();
  if let Ok(url) = std::env::var("DATABASE_URL") {
    cfg.database_url = url;
  }

  let applied = run_migrations(&cfg).expect("failed to migrate");
  println!("Applied migrations: {applied:?}");

  let repo = PgSongRepository::new(connect(&cfg).expect("failed to connect"));

  let mut song = NewSong::bare("Smoke Test", "Test Song");
  song.text = Some("first verse\n\nsecond verse".to_string());
  let id = repo.add_song(&song).await.expect("failed to save song");
  println!("Saved song with id = {id}");

  let text = repo.get_text(id).await.expect("failed to load text");
  println!("Loaded text: {text:?}");

  let patch = SongPatch { link: Some("https://example.com/smoke".to_string()), ..SongPatch::default() };
  repo.update_song(id, &patch).await.expect("failed to update song");

  let filter = SongFilter { group: Some("smoke".to_string()), ..SongFilter::default() };
  let listed = repo.list_songs(&filter, PageRequest::default()).await.expect("failed to list songs");
  println!("Listed: {listed:?}");

  repo.delete_song(id).await.expect("failed to delete song");
  println!("Deleted {id}");
}
