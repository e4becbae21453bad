// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use shop_services::clients::{DirectoryError, DirectoryItem, ItemDirectory};
use shop_services::models::item::{Item, ItemRequest};
use shop_services::models::user::User;
use shop_services::repositories::memory::InMemoryStore;
use shop_services::repositories::ItemStore;
use shop_services::services::{AccountService, PasswordService, PurchaseOrchestrator, TokenService};
use shop_services::state::{ItemServiceState, PurchaseServiceState, UserServiceState};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// All three services wired over one in-memory store.
pub struct TestShop {
  pub store: Arc<InMemoryStore>,
  pub tokens: Arc<TokenService>,
  pub accounts: Arc<AccountService>,
  pub purchases: Arc<PurchaseOrchestrator>,
}

impl TestShop {
  pub fn new() -> Self {
    setup_tracing();
    let store = Arc::new(InMemoryStore::new());
    let tokens = Arc::new(TokenService::new(TEST_SECRET, 72));
    // Cheap Argon2 cost keeps the suite fast.
    let passwords = Arc::new(PasswordService::new(Some(1024), Some(1)).expect("argon2 params"));
    let accounts = Arc::new(AccountService::new(store.clone(), passwords, tokens.clone()));
    let purchases = Arc::new(PurchaseOrchestrator::new(store.clone(), store.clone()));
    Self {
      store,
      tokens,
      accounts,
      purchases,
    }
  }

  /// Orchestrator that prices from `directory` but writes to this shop's store.
  pub fn orchestrator_with(&self, directory: Arc<dyn ItemDirectory>) -> PurchaseOrchestrator {
    PurchaseOrchestrator::new(directory, self.store.clone())
  }

  pub fn user_state(&self) -> UserServiceState {
    UserServiceState {
      accounts: self.accounts.clone(),
    }
  }

  pub fn item_state(&self) -> ItemServiceState {
    ItemServiceState {
      items: self.store.clone(),
    }
  }

  pub fn purchase_state(&self) -> PurchaseServiceState {
    PurchaseServiceState {
      purchases: self.purchases.clone(),
    }
  }

  pub async fn seed_item(&self, name: &str, price: Decimal, stock: i32) -> Item {
    self
      .store
      .create_item(ItemRequest {
        name: name.to_string(),
        description: format!("{} for tests", name),
        price,
        stock,
      })
      .await
      .expect("seed item")
  }

  pub fn stock_of(&self, item_id: Uuid) -> i32 {
    self.store.stock_of(item_id).expect("item exists")
  }

  /// A bearer token for a user that does not need to exist in the store.
  pub fn bearer_for(&self, name: &str) -> (Uuid, String) {
    let now = chrono::Utc::now();
    let user = User {
      id: Uuid::new_v4(),
      name: name.to_string(),
      email: format!("{}@example.com", name.to_lowercase()),
      password_hash: String::new(),
      created_at: now,
      updated_at: now,
    };
    let token = self.tokens.issue(&user).expect("issue token");
    (user.id, format!("Bearer {}", token))
  }
}

pub fn money(cents: i64) -> Decimal {
  Decimal::new(cents, 2)
}

/// Reports whatever stock it was built with, regardless of the store.
pub struct StaleDirectory {
  pub items: Vec<DirectoryItem>,
}

#[async_trait]
impl ItemDirectory for StaleDirectory {
  async fn fetch_item(&self, item_id: Uuid) -> Result<DirectoryItem, DirectoryError> {
    self
      .items
      .iter()
      .find(|i| i.id == item_id)
      .cloned()
      .ok_or(DirectoryError::NotFound { item_id })
  }
}

/// Every lookup times out.
pub struct UnreachableDirectory;

#[async_trait]
impl ItemDirectory for UnreachableDirectory {
  async fn fetch_item(&self, _item_id: Uuid) -> Result<DirectoryItem, DirectoryError> {
    Err(DirectoryError::Timeout)
  }
}

#[macro_export]
macro_rules! user_app {
  ($shop:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($shop.user_state()))
        .app_data(actix_web::web::Data::from($shop.tokens.clone()))
        .configure(shop_services::web::configure_user_service),
    )
    .await
  };
}

#[macro_export]
macro_rules! item_app {
  ($shop:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($shop.item_state()))
        .app_data(actix_web::web::Data::from($shop.tokens.clone()))
        .configure(shop_services::web::configure_item_service),
    )
    .await
  };
}

#[macro_export]
macro_rules! purchase_app {
  ($shop:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($shop.purchase_state()))
        .app_data(actix_web::web::Data::from($shop.tokens.clone()))
        .configure(shop_services::web::configure_purchase_service),
    )
    .await
  };
}
