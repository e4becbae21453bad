// services/shop/src/pipelines/signin_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::SigninCtxData;
use shopflow::{ContextData, Pipeline, StepControl};
use tracing::{event, info, warn, Level};

pub const SIGNIN_PIPELINE: &str = "signin";

/// Builds the user sign-in pipeline.
///
/// Unknown email and wrong password fail identically with
/// `AppError::InvalidCredentials`, after the same amount of hashing work.
pub fn build_signin_pipeline() -> Pipeline<SigninCtxData, AppError> {
  let mut signin_p = Pipeline::<SigninCtxData, AppError>::new(
    SIGNIN_PIPELINE,
    &["load_account", "verify_credentials", "issue_access_token"],
  );

  signin_p.on("load_account", |ctx_data: ContextData<SigninCtxData>| {
    Box::pin(async move {
      let (email_val, users) = {
        let guard = ctx_data.read();
        (guard.email.clone(), guard.deps.users.clone())
      };

      event!(Level::DEBUG, email = %email_val, "Fetching user by email for signin.");
      let account = users.find_by_email(&email_val).await?;
      if account.is_none() {
        event!(Level::DEBUG, "No account for this email; verifying against dummy hash.");
      }
      ctx_data.write().account = account;
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  signin_p.on("verify_credentials", |ctx_data: ContextData<SigninCtxData>| {
    Box::pin(async move {
      let (stored_hash, password_val, passwords) = {
        let guard = ctx_data.read();
        (
          guard.account.as_ref().map(|u| u.password_hash.clone()),
          guard.password.clone(),
          guard.deps.passwords.clone(),
        )
      };

      let matches = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => passwords.verify_password(&hash, &password_val),
        None => Ok(passwords.verify_against_dummy(&password_val)),
      })
      .await
      .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))??;

      if !matches {
        warn!("Sign-in rejected: invalid email or password.");
        return Err(AppError::InvalidCredentials);
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  signin_p.on("issue_access_token", |ctx_data: ContextData<SigninCtxData>| {
    Box::pin(async move {
      let token = {
        let guard = ctx_data.read();
        let user = guard.account.as_ref().ok_or_else(|| {
          AppError::Internal("Credentials verified without a loaded account.".to_string())
        })?;
        let token = guard.deps.tokens.issue(user)?;
        info!(user_id = %user.id, "Sign-in successful.");
        token
      };
      ctx_data.write().access_token = Some(token);
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  signin_p
}
