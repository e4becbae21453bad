// services/shop/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Insert payload; the hash is computed before it reaches a store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name: String,
  pub email: String,
  pub password_hash: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(min = 1, message = "name is required"))]
  pub name: String,
  #[validate(email(message = "email must be a valid address"))]
  pub email: String,
  #[validate(length(min = 8, message = "password must be at least 8 characters"))]
  pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(email(message = "email must be a valid address"))]
  pub email: String,
  #[validate(length(min = 1, message = "password is required"))]
  pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
}
