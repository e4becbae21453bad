// services/shop/src/web/extractors.rs

use crate::errors::AppError;
use crate::services::auth_service::TokenService;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;
use uuid::Uuid;

/// Identity of the caller, taken from a verified `Authorization: Bearer`
/// token. Requires `web::Data<TokenService>` in the app.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
  pub name: String,
  pub email: String,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(authenticate(req))
  }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
  let tokens = req
    .app_data::<web::Data<TokenService>>()
    .ok_or_else(|| AppError::Internal("TokenService is not registered as app data.".to_string()))?;

  let token = bearer_token(req).ok_or_else(|| {
    warn!("AuthenticatedUser extractor: missing or malformed Authorization header.");
    AppError::Unauthorized("Missing or malformed JWT".to_string())
  })?;

  let claims = tokens.verify(token)?;
  Ok(AuthenticatedUser {
    user_id: claims.sub,
    name: claims.name,
    email: claims.email,
  })
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
  let (scheme, token) = header.trim().split_once(' ')?;
  let token = token.trim();
  if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
    return None;
  }
  Some(token)
}
