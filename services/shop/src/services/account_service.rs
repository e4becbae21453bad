// services/shop/src/services/account_service.rs

//! Registration and login, each run through its pipeline.

use crate::errors::{AppError, Result};
use crate::models::user::{LoginRequest, RegisterRequest, TokenResponse, User};
use crate::pipelines::contexts::{AccountDeps, SigninCtxData, SignupCtxData};
use crate::pipelines::signin_pipeline::build_signin_pipeline;
use crate::pipelines::signup_pipeline::build_signup_pipeline;
use crate::repositories::UserStore;
use crate::services::auth_service::{PasswordService, TokenService};
use shopflow::{Pipeline, PipelineOutcome};
use std::sync::Arc;
use tracing::{instrument, warn};

pub struct AccountService {
  deps: AccountDeps,
  signup: Pipeline<SignupCtxData, AppError>,
  signin: Pipeline<SigninCtxData, AppError>,
}

impl AccountService {
  pub fn new(users: Arc<dyn UserStore>, passwords: Arc<PasswordService>, tokens: Arc<TokenService>) -> Self {
    let signup = build_signup_pipeline();
    let signin = build_signin_pipeline();
    tracing::info!(
      signup_steps = ?signup.step_names(),
      signin_steps = ?signin.step_names(),
      "Account pipelines built."
    );
    Self {
      deps: AccountDeps {
        users,
        passwords,
        tokens,
      },
      signup,
      signin,
    }
  }

  #[instrument(name = "account_service::register", skip(self, request), fields(email = %request.email))]
  pub async fn register(&self, request: RegisterRequest) -> Result<User> {
    let ctx = SignupCtxData {
      deps: self.deps.clone(),
      name: request.name,
      email: request.email,
      password: request.password,
      created_user: None,
    };

    let (outcome, ctx) = self.signup.run_owned(ctx).await?;
    if let PipelineOutcome::Stopped { step } = outcome {
      warn!(%step, "Signup pipeline stopped before creating a user.");
      return Err(AppError::Internal(format!("Signup halted at step '{}'", step)));
    }
    ctx
      .created_user
      .ok_or_else(|| AppError::Internal("Signup completed without creating a user.".to_string()))
  }

  #[instrument(name = "account_service::login", skip(self, request), fields(email = %request.email))]
  pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse> {
    let ctx = SigninCtxData {
      deps: self.deps.clone(),
      email: request.email,
      password: request.password,
      account: None,
      access_token: None,
    };

    let (outcome, ctx) = self.signin.run_owned(ctx).await?;
    if let PipelineOutcome::Stopped { step } = outcome {
      warn!(%step, "Signin pipeline stopped before issuing a token.");
      return Err(AppError::InvalidCredentials);
    }
    let access_token = ctx
      .access_token
      .ok_or_else(|| AppError::Internal("Signin completed without issuing a token.".to_string()))?;
    Ok(TokenResponse { access_token })
  }
}
