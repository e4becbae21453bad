// services/shop/src/repositories/memory.rs

//! In-process implementation of every store plus the item directory, behind
//! `parking_lot` mutexes. Backs the HTTP tests and lets the services run
//! without PostgreSQL.

use crate::clients::item_client::{DirectoryError, DirectoryItem, ItemDirectory};
use crate::models::item::{Item, ItemRequest};
use crate::models::purchase::{NewPurchase, PurchaseLine, PurchaseRecord, PurchaseRow};
use crate::models::user::{NewUser, User};
use crate::repositories::{ItemStore, PurchaseStore, StoreError, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStore {
  users: Mutex<Vec<User>>,
  items: Mutex<HashMap<Uuid, Item>>,
  // Lock order: `items` before `purchases`.
  purchases: Mutex<Vec<PurchaseRecord>>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Current stock of an item, `None` if it does not exist.
  pub fn stock_of(&self, item_id: Uuid) -> Option<i32> {
    self.items.lock().get(&item_id).map(|i| i.stock)
  }

  pub fn purchase_count(&self) -> usize {
    self.purchases.lock().len()
  }
}

#[async_trait]
impl UserStore for InMemoryStore {
  async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
    Ok(self.users.lock().iter().any(|u| u.email == email))
  }

  async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
    let mut users = self.users.lock();
    if users.iter().any(|u| u.email == new_user.email) {
      return Err(StoreError::DuplicateEmail);
    }
    let now = Utc::now();
    let user = User {
      id: Uuid::new_v4(),
      name: new_user.name,
      email: new_user.email,
      password_hash: new_user.password_hash,
      created_at: now,
      updated_at: now,
    };
    users.push(user.clone());
    Ok(user)
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
    Ok(self.users.lock().iter().find(|u| u.email == email).cloned())
  }
}

#[async_trait]
impl ItemStore for InMemoryStore {
  async fn create_item(&self, input: ItemRequest) -> Result<Item, StoreError> {
    let now = Utc::now();
    let item = Item {
      id: Uuid::new_v4(),
      name: input.name,
      description: input.description,
      price: input.price,
      stock: input.stock,
      created_at: now,
      updated_at: now,
    };
    self.items.lock().insert(item.id, item.clone());
    Ok(item)
  }

  async fn list_items(&self) -> Result<Vec<Item>, StoreError> {
    let mut items: Vec<Item> = self.items.lock().values().cloned().collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(items)
  }

  async fn find_item(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
    Ok(self.items.lock().get(&id).cloned())
  }

  async fn update_item(&self, id: Uuid, input: ItemRequest) -> Result<Item, StoreError> {
    let mut items = self.items.lock();
    let item = items.get_mut(&id).ok_or(StoreError::NotFound { entity: "Item" })?;
    item.name = input.name;
    item.description = input.description;
    item.price = input.price;
    item.stock = input.stock;
    item.updated_at = Utc::now();
    Ok(item.clone())
  }

  async fn delete_item(&self, id: Uuid) -> Result<(), StoreError> {
    match self.items.lock().remove(&id) {
      Some(_) => Ok(()),
      None => Err(StoreError::NotFound { entity: "Item" }),
    }
  }
}

#[async_trait]
impl PurchaseStore for InMemoryStore {
  async fn record_purchase(&self, purchase: NewPurchase) -> Result<PurchaseRecord, StoreError> {
    let mut items = self.items.lock();

    // Apply every decrement to a scratch copy first; nothing is written
    // unless all of them fit.
    let mut remaining: HashMap<Uuid, i32> = HashMap::new();
    let mut ordered: Vec<(Uuid, i32)> = purchase.lines.iter().map(|l| (l.item_id, l.quantity)).collect();
    ordered.sort_by_key(|(item_id, _)| *item_id);
    for (item_id, quantity) in ordered {
      let current = match remaining.get(&item_id) {
        Some(stock) => *stock,
        None => match items.get(&item_id) {
          Some(item) => item.stock,
          None => return Err(StoreError::InsufficientStock { item_id }),
        },
      };
      if current < quantity {
        return Err(StoreError::InsufficientStock { item_id });
      }
      remaining.insert(item_id, current - quantity);
    }

    let now = Utc::now();
    for (item_id, stock) in remaining {
      if let Some(item) = items.get_mut(&item_id) {
        item.stock = stock;
        item.updated_at = now;
      }
    }

    let record = PurchaseRecord {
      header: PurchaseRow {
        id: purchase.id,
        user_id: purchase.user_id,
        total_amount: purchase.total_amount,
        created_at: purchase.created_at,
      },
      lines: purchase
        .lines
        .iter()
        .map(|l| PurchaseLine {
          id: Uuid::new_v4(),
          purchase_id: purchase.id,
          item_id: l.item_id,
          quantity: l.quantity,
          price_at_purchase: l.price_at_purchase,
        })
        .collect(),
    };
    self.purchases.lock().push(record.clone());
    Ok(record)
  }

  async fn purchases_for_user(&self, user_id: Uuid) -> Result<Vec<PurchaseRecord>, StoreError> {
    let mut records: Vec<PurchaseRecord> = self
      .purchases
      .lock()
      .iter()
      .filter(|r| r.header.user_id == user_id)
      .cloned()
      .collect();
    // Stable sort keeps insertion order for equal timestamps; reverse it so
    // the latest write still comes first.
    records.reverse();
    records.sort_by(|a, b| b.header.created_at.cmp(&a.header.created_at));
    Ok(records)
  }
}

#[async_trait]
impl ItemDirectory for InMemoryStore {
  async fn fetch_item(&self, item_id: Uuid) -> Result<DirectoryItem, DirectoryError> {
    self
      .items
      .lock()
      .get(&item_id)
      .map(|item| DirectoryItem {
        id: item.id,
        name: item.name.clone(),
        price: item.price,
        stock: item.stock,
      })
      .ok_or(DirectoryError::NotFound { item_id })
  }
}
