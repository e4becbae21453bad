// services/shop/src/repositories/mod.rs

//! Storage capabilities used by the services, one trait per collaborator.
//!
//! Handles are constructed explicitly and injected; there is no global pool.
//! `postgres` holds the sqlx implementations, `memory` an in-process one
//! used by tests and local runs.

pub mod memory;
pub mod postgres;

use crate::models::item::{Item, ItemRequest};
use crate::models::purchase::{NewPurchase, PurchaseRecord};
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("{entity} not found")]
  NotFound { entity: &'static str },

  /// The conditional stock decrement matched no row.
  #[error("insufficient stock for item {item_id}")]
  InsufficientStock { item_id: Uuid },

  #[error("email already registered")]
  DuplicateEmail,
}

#[async_trait]
pub trait UserStore: Send + Sync {
  async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

  /// Fails with `DuplicateEmail` when the unique constraint on email trips.
  async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError>;

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait ItemStore: Send + Sync {
  async fn create_item(&self, input: ItemRequest) -> Result<Item, StoreError>;

  /// Newest first.
  async fn list_items(&self) -> Result<Vec<Item>, StoreError>;

  async fn find_item(&self, id: Uuid) -> Result<Option<Item>, StoreError>;

  async fn update_item(&self, id: Uuid, input: ItemRequest) -> Result<Item, StoreError>;

  async fn delete_item(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait PurchaseStore: Send + Sync {
  /// Writes the purchase, its lines and every stock decrement in one
  /// transaction. Any line whose decrement cannot be applied aborts the whole
  /// write with `InsufficientStock`.
  async fn record_purchase(&self, purchase: NewPurchase) -> Result<PurchaseRecord, StoreError>;

  /// Newest first.
  async fn purchases_for_user(&self, user_id: Uuid) -> Result<Vec<PurchaseRecord>, StoreError>;
}
