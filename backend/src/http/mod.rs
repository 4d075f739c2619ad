mod error;
mod songs;
mod state;

use axum::Router;
use axum::routing::{get, patch};

use songbook_core::ports::{MetadataProvider, SongRepository};

pub use error::ApiError;
pub use state::AppState;

/// Every catalog route, mounted under `base_path`.
pub fn router<M, R>(state: AppState<M, R>, base_path: &str) -> Router
where
  M: MetadataProvider + 'static,
  R: SongRepository + 'static,
{
  let routes = Router::new()
    .route("/songs", get(songs::list_songs::<M, R>).post(songs::add_song::<M, R>))
    .route("/songs/{id}", patch(songs::update_song::<M, R>).delete(songs::delete_song::<M, R>))
    .route("/songs/{id}/text", get(songs::get_song_text::<M, R>))
    .with_state(state);

  // axum no acepta nest en la raíz
  match base_path.trim_matches('/') {
    "" => routes,
    prefix => Router::new().nest(&format!("/{prefix}"), routes),
  }
}
