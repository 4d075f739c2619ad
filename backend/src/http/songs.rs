use std::future::Future;
use std::time::Duration;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use songbook_core::CoreError;
use songbook_core::domain::page::{DEFAULT_LIMIT, DEFAULT_PAGE};
use songbook_core::domain::{AddSong, PageRequest, Song, SongFilter, SongPatch};
use songbook_core::ports::{MetadataProvider, SongRepository};

use super::error::ApiError;
use super::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
  group: Option<String>,
  song: Option<String>,
  release_date: Option<String>,
  page: Option<String>,
  limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextParams {
  page: Option<String>,
}

/// Runs one service call under the request budget. Dropping the call on
/// timeout drops whatever store or provider future it was awaiting.
async fn within<T>(limit: Duration, call: impl Future<Output = Result<T, CoreError>>) -> Result<T, CoreError> {
  tokio::time::timeout(limit, call).await.map_err(|_| CoreError::DeadlineExceeded)?
}

/// Empty or missing means `default`.
fn parse_bound(raw: Option<&str>, default: u32, name: &str) -> Result<u32, CoreError> {
  match raw.map(str::trim).filter(|v| !v.is_empty()) {
    None => Ok(default),
    Some(v) => v
      .parse()
      .map_err(|_| CoreError::InvalidInput(format!("{name} must be a non-negative integer, got {v:?}"))),
  }
}

fn page_request(page: Option<&str>, limit: Option<&str>) -> Result<PageRequest, CoreError> {
  let page = parse_bound(page, DEFAULT_PAGE, "page")?;
  if page == 0 {
    return Err(CoreError::InvalidInput("page starts at 1".to_string()));
  }
  let limit = parse_bound(limit, DEFAULT_LIMIT, "limit")?;
  Ok(PageRequest::new(page, limit))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, CoreError> {
  payload.map(|Json(value)| value).map_err(|e| CoreError::InvalidInput(e.body_text()))
}

pub async fn list_songs<M, R>(
  State(state): State<AppState<M, R>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Song>>, ApiError>
where
  M: MetadataProvider + 'static,
  R: SongRepository + 'static,
{
  let filter = SongFilter { group: params.group, title: params.song, release_date: params.release_date };
  let fail = |error| {
    ApiError::new("list_songs", error)
      .with_context(format!("filter={filter:?} page={:?} limit={:?}", params.page, params.limit))
  };

  let page = page_request(params.page.as_deref(), params.limit.as_deref()).map_err(&fail)?;
  let songs = within(state.request_timeout, state.songs.list_songs(&filter, page)).await.map_err(&fail)?;
  Ok(Json(songs))
}

pub async fn get_song_text<M, R>(
  State(state): State<AppState<M, R>>,
  Path(id): Path<String>,
  Query(params): Query<TextParams>,
) -> Result<Json<String>, ApiError>
where
  M: MetadataProvider + 'static,
  R: SongRepository + 'static,
{
  let page = params.page.as_deref().unwrap_or("1");

  let verse = within(state.request_timeout, state.songs.get_song_text(&id, page))
    .await
    .map_err(|e| ApiError::new("get_song_text", e).with_id(&id).with_context(format!("page={page:?}")))?;
  Ok(Json(verse))
}

pub async fn add_song<M, R>(
  State(state): State<AppState<M, R>>,
  payload: Result<Json<AddSong>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError>
where
  M: MetadataProvider + 'static,
  R: SongRepository + 'static,
{
  let request = body(payload).map_err(|e| ApiError::new("add_song", e))?;
  let context = format!("group={:?} song={:?}", request.group, request.title);

  let id = within(state.request_timeout, state.songs.add_song(request))
    .await
    .map_err(|e| ApiError::new("add_song", e).with_context(context))?;
  Ok((StatusCode::CREATED, Json(json!({ "message": "song added", "id": id }))))
}

pub async fn update_song<M, R>(
  State(state): State<AppState<M, R>>,
  Path(id): Path<String>,
  payload: Result<Json<SongPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
  M: MetadataProvider + 'static,
  R: SongRepository + 'static,
{
  let patch = body(payload).map_err(|e| ApiError::new("update_song", e).with_id(&id))?;

  within(state.request_timeout, state.songs.update_song(&id, &patch))
    .await
    .map_err(|e| ApiError::new("update_song", e).with_id(&id).with_context(format!("{patch:?}")))?;
  Ok(Json(json!({ "message": "song updated", "id": id })))
}

pub async fn delete_song<M, R>(
  State(state): State<AppState<M, R>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  M: MetadataProvider + 'static,
  R: SongRepository + 'static,
{
  within(state.request_timeout, state.songs.delete_song(&id))
    .await
    .map_err(|e| ApiError::new("delete_song", e).with_id(&id))?;
  Ok(Json(json!({ "message": "song deleted", "id": id })))
}
