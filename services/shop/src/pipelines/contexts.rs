// services/shop/src/pipelines/contexts.rs

//! Context data for the pipelines. Handlers receive these wrapped in
//! `shopflow::ContextData`.

use crate::clients::item_client::ItemDirectory;
use crate::models::purchase::{PurchaseRecord, RequestedItem};
use crate::models::user::User;
use crate::repositories::{PurchaseStore, UserStore};
use crate::services::auth_service::{PasswordService, TokenService};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

// --- Account workflows ---

/// Collaborators shared by the sign-up and sign-in pipelines.
#[derive(Clone)]
pub struct AccountDeps {
  pub users: Arc<dyn UserStore>,
  pub passwords: Arc<PasswordService>,
  pub tokens: Arc<TokenService>,
}

pub struct SignupCtxData {
  pub deps: AccountDeps,
  pub name: String,
  pub email: String,
  pub password: String,
  pub created_user: Option<User>,
}

pub struct SigninCtxData {
  pub deps: AccountDeps,
  pub email: String,
  pub password: String,
  /// `None` when no account has this email; verification still runs.
  pub account: Option<User>,
  pub access_token: Option<String>,
}

// --- Purchase workflow ---

#[derive(Clone)]
pub struct PurchaseDeps {
  pub directory: Arc<dyn ItemDirectory>,
  pub store: Arc<dyn PurchaseStore>,
}

/// A requested line priced from the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
  pub item_id: Uuid,
  pub name: String,
  pub quantity: i32,
  pub unit_price: Decimal,
}

pub struct PurchaseCtxData {
  pub deps: PurchaseDeps,
  pub user_id: Uuid,
  pub requested: Vec<RequestedItem>,
  pub priced_lines: Vec<PricedLine>,
  pub total_amount: Decimal,
  pub recorded: Option<PurchaseRecord>,
}

impl PurchaseCtxData {
  pub fn new(deps: PurchaseDeps, user_id: Uuid, requested: Vec<RequestedItem>) -> Self {
    Self {
      deps,
      user_id,
      requested,
      priced_lines: Vec::new(),
      total_amount: Decimal::ZERO,
      recorded: None,
    }
  }
}
