// services/shop/src/web/error_response.rs

//! The only place `AppError` turns into HTTP.

use crate::errors::AppError;
use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde_json::json;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Unauthorized(_) | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::EmailExists | AppError::ItemNotFound { .. } | AppError::InsufficientStock { .. } => StatusCode::CONFLICT,
      AppError::Store(_)
      | AppError::Directory(_)
      | AppError::Workflow { .. }
      | AppError::Config(_)
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let message = match self {
      AppError::Validation(m) | AppError::Unauthorized(m) | AppError::NotFound(m) => m.clone(),
      AppError::InvalidCredentials => "invalid email or password".to_string(),
      AppError::EmailExists => "email already exists".to_string(),
      AppError::ItemNotFound { .. } => "one or more items not found".to_string(),
      AppError::InsufficientStock { .. } => "stock for an item is not sufficient".to_string(),
      _ => INTERNAL_MESSAGE.to_string(),
    };

    if self.is_internal() {
      tracing::error!(application_error = %self, details = ?self, "Responding with internal error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }
    HttpResponse::build(self.status_code()).json(json!({ "error": message }))
  }
}

/// Malformed or mistyped JSON bodies answer 400 in the common error shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  tracing::debug!(error = %err, "Rejected request body.");
  InternalError::from_response(err, bad_request("Invalid request body")).into()
}

/// Path segments that do not parse (e.g. a non-UUID id) answer 400.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
  tracing::debug!(error = %err, "Rejected path parameter.");
  InternalError::from_response(err, bad_request("Invalid item ID")).into()
}

fn bad_request(message: &str) -> HttpResponse {
  HttpResponse::BadRequest().json(json!({ "error": message }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::repositories::StoreError;
  use uuid::Uuid;

  #[test]
  fn conflicts_map_to_409() {
    let item_id = Uuid::new_v4();
    assert_eq!(AppError::EmailExists.status_code(), StatusCode::CONFLICT);
    assert_eq!(AppError::ItemNotFound { item_id }.status_code(), StatusCode::CONFLICT);
    assert_eq!(AppError::InsufficientStock { item_id }.status_code(), StatusCode::CONFLICT);
  }

  #[test]
  fn internal_failures_hide_details() {
    let err = AppError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn auth_failures_map_to_401() {
    assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
      AppError::Unauthorized("Missing or malformed JWT".into()).status_code(),
      StatusCode::UNAUTHORIZED
    );
  }
}
