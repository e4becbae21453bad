// services/shop/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::user::{LoginRequest, RegisterRequest};
use crate::models::validate_payload;
use crate::state::UserServiceState;

#[instrument(
    name = "handler::register",
    skip(state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn register_handler(
  state: web::Data<UserServiceState>,
  req_payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
  let request = req_payload.into_inner();
  validate_payload(&request)?;

  let user = state.accounts.register(request).await?;
  info!(user_id = %user.id, "User registered.");
  Ok(HttpResponse::Created().json(user))
}

#[instrument(
    name = "handler::login",
    skip(state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn login_handler(
  state: web::Data<UserServiceState>,
  req_payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
  let request = req_payload.into_inner();
  validate_payload(&request)?;

  let token = state.accounts.login(request).await?;
  Ok(HttpResponse::Ok().json(token))
}
