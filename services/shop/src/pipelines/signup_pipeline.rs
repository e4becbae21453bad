// services/shop/src/pipelines/signup_pipeline.rs

use crate::errors::AppError;
use crate::models::user::NewUser;
use crate::pipelines::contexts::SignupCtxData;
use shopflow::{ContextData, Pipeline, StepControl};
use tracing::{event, info, warn, Level};
use validator::ValidateEmail;

pub const SIGNUP_PIPELINE: &str = "signup";

/// Builds the user sign-up pipeline.
pub fn build_signup_pipeline() -> Pipeline<SignupCtxData, AppError> {
  let mut signup_p = Pipeline::<SignupCtxData, AppError>::new(
    SIGNUP_PIPELINE,
    &["validate_signup_input", "check_existing_email", "create_user_record"],
  );

  // Step 1: Validate input. The HTTP layer validates too; this pipeline does
  // not rely on it.
  signup_p.on("validate_signup_input", |ctx_data: ContextData<SignupCtxData>| {
    Box::pin(async move {
      let (name_is_blank, email_val, password_len) = {
        let guard = ctx_data.read();
        (guard.name.trim().is_empty(), guard.email.clone(), guard.password.chars().count())
      };

      event!(Level::DEBUG, email = %email_val, "Validating signup input.");
      if name_is_blank {
        return Err(AppError::Validation("name: name is required".to_string()));
      }
      if !email_val.validate_email() {
        warn!("Invalid email format provided for signup.");
        return Err(AppError::Validation("email: email must be a valid address".to_string()));
      }
      if password_len < 8 {
        warn!("Password too short for signup ({} chars).", password_len);
        return Err(AppError::Validation(
          "password: password must be at least 8 characters".to_string(),
        ));
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  // Step 2: Reject emails already on file.
  signup_p.on("check_existing_email", |ctx_data: ContextData<SignupCtxData>| {
    Box::pin(async move {
      let (email_val, users) = {
        let guard = ctx_data.read();
        (guard.email.clone(), guard.deps.users.clone())
      };

      if users.email_exists(&email_val).await? {
        warn!("Attempt to sign up with existing email: {}", email_val);
        return Err(AppError::EmailExists);
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  // Step 3: Hash the password and persist. A concurrent sign-up with the same
  // email surfaces here as `EmailExists` through the unique constraint.
  signup_p.on("create_user_record", |ctx_data: ContextData<SignupCtxData>| {
    Box::pin(async move {
      let (name_val, email_val, password_val, deps) = {
        let guard = ctx_data.read();
        (
          guard.name.trim().to_string(),
          guard.email.clone(),
          guard.password.clone(),
          guard.deps.clone(),
        )
      };

      let passwords = deps.passwords.clone();
      let password_hash = tokio::task::spawn_blocking(move || passwords.hash_password(&password_val))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;

      let new_user = deps
        .users
        .insert_user(NewUser {
          name: name_val,
          email: email_val,
          password_hash,
        })
        .await?;

      info!("User created successfully: ID={}, Email={}", new_user.id, new_user.email);
      ctx_data.write().created_user = Some(new_user);
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  signup_p
}
