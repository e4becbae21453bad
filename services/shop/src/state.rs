// services/shop/src/state.rs

use crate::repositories::ItemStore;
use crate::services::{AccountService, PurchaseOrchestrator};
use std::sync::Arc;

// Each service registers its own state as `web::Data`, alongside a shared
// `web::Data<TokenService>` used by the `AuthenticatedUser` extractor.

#[derive(Clone)]
pub struct UserServiceState {
  pub accounts: Arc<AccountService>,
}

#[derive(Clone)]
pub struct ItemServiceState {
  pub items: Arc<dyn ItemStore>,
}

#[derive(Clone)]
pub struct PurchaseServiceState {
  pub purchases: Arc<PurchaseOrchestrator>,
}
