// services/shop/src/services/auth_service.rs

//! Password hashing and bearer-token issuance/verification.

use crate::errors::AppError;
use crate::models::user::User;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Algorithm, Argon2, Params, Version,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Argon2id hashing with configurable cost.
///
/// Holds a hash of a throwaway password so that sign-in for an unknown email
/// spends the same time verifying as for a known one.
pub struct PasswordService {
  params: Params,
  dummy_hash: String,
}

impl PasswordService {
  /// `None` keeps the argon2 crate default for that parameter.
  pub fn new(memory_kib: Option<u32>, iterations: Option<u32>) -> Result<Self, AppError> {
    let params = Params::new(
      memory_kib.unwrap_or(Params::DEFAULT_M_COST),
      iterations.unwrap_or(Params::DEFAULT_T_COST),
      Params::DEFAULT_P_COST,
      None,
    )
    .map_err(|e| AppError::Config(format!("Invalid Argon2 parameters: {}", e)))?;

    let mut service = Self {
      params,
      dummy_hash: String::new(),
    };
    service.dummy_hash = service.hash_password("not-a-real-password")?;
    Ok(service)
  }

  fn hasher(&self) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
  }

  #[instrument(name = "auth_service::hash_password", skip(self, password), err(Display))]
  pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
    if password.is_empty() {
      return Err(AppError::Validation("Password cannot be empty for hashing.".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    match self.hasher().hash_password(password.as_bytes(), &salt) {
      Ok(hash) => {
        debug!("Password hashed successfully.");
        Ok(hash.to_string())
      }
      Err(argon_err) => {
        error!(error = %argon_err, "Argon2 password hashing failed.");
        Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
      }
    }
  }

  /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
  #[instrument(name = "auth_service::verify_password", skip_all, err(Display))]
  pub fn verify_password(&self, stored_hash: &str, provided_password: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(stored_hash).map_err(|parse_err| {
      error!(error = %parse_err, "Failed to parse stored password hash string.");
      AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
    })?;

    // Cost parameters come from the stored hash, not from `self.params`.
    match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => {
        debug!("Password verification failed: passwords do not match.");
        Ok(false)
      }
      Err(other) => {
        error!(error = %other, "Argon2 password verification encountered an error.");
        Err(AppError::Internal(format!("Password verification process failed: {}", other)))
      }
    }
  }

  /// Burns one verification against the dummy hash. Always `false`.
  pub fn verify_against_dummy(&self, provided_password: &str) -> bool {
    if let Err(dummy_err) = self.verify_password(&self.dummy_hash, provided_password) {
      debug!(error = %dummy_err, "Dummy hash verification failed.");
    }
    false
  }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
  pub sub: Uuid,
  pub name: String,
  pub email: String,
  pub iat: i64,
  pub exp: i64,
}

/// HS256 access tokens signed with a shared secret.
pub struct TokenService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  ttl: chrono::Duration,
}

impl TokenService {
  pub fn new(secret: &str, ttl_hours: i64) -> Self {
    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      ttl: chrono::Duration::hours(ttl_hours),
    }
  }

  #[instrument(name = "auth_service::issue_token", skip(self, user), fields(user_id = %user.id), err(Display))]
  pub fn issue(&self, user: &User) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
      sub: user.id,
      name: user.name.clone(),
      email: user.email.clone(),
      iat: now.timestamp(),
      exp: (now + self.ttl).timestamp(),
    };
    encode(&Header::new(jsonwebtoken::Algorithm::HS256), &claims, &self.encoding_key)
      .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
  }

  /// Accepts only HS256 tokens with a valid signature that have not expired.
  pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);
    decode::<Claims>(token, &self.decoding_key, &validation)
      .map(|data| data.claims)
      .map_err(|e| {
        debug!(error = %e, "Rejected access token.");
        AppError::Unauthorized("Invalid or expired JWT".to_string())
      })
  }
}
