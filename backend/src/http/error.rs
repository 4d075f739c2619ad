use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, info, warn};

use songbook_core::CoreError;

/// A failed service call on its way out of the HTTP layer.
///
/// Domain outcomes (not found, nothing to update, bad page) are answered with
/// 200 and a message; everything else is a fault with an `error` body.
#[derive(Debug)]
pub struct ApiError {
  pub error: CoreError,
  /// Service operation that failed.
  pub op: &'static str,
  /// The song the request was about, echoed back for informational answers.
  pub id: Option<String>,
  /// Request details worth logging, such as listing filters. Never sent back.
  pub context: Option<String>,
}

impl ApiError {
  pub fn new(op: &'static str, error: CoreError) -> Self {
    ApiError { error, op, id: None, context: None }
  }

  pub fn with_id(mut self, id: &str) -> Self {
    self.id = Some(id.to_string());
    self
  }

  pub fn with_context(mut self, context: String) -> Self {
    self.context = Some(context);
    self
  }

  pub fn status(&self) -> StatusCode {
    match &self.error {
      e if e.is_informational() => StatusCode::OK,
      CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
      CoreError::Provider(_) => StatusCode::BAD_GATEWAY,
      CoreError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = self.error.to_string();
    let (op, id, context) = (self.op, self.id.as_deref(), self.context.as_deref());

    let body = if self.error.is_informational() {
      info!(op, id, context, outcome = %message, "request answered with a domain outcome");
      match self.id {
        Some(id) => json!({ "message": message, "id": id }),
        None => json!({ "message": message }),
      }
    } else {
      if status.is_server_error() {
        error!(op, id, context, status = status.as_u16(), error = %message, "request failed");
      } else {
        warn!(op, id, context, status = status.as_u16(), error = %message, "request rejected");
      }
      json!({ "error": message })
    };

    (status, Json(body)).into_response()
  }
}
