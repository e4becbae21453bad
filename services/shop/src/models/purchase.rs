// services/shop/src/models/purchase.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// --- API payloads ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePurchaseRequest {
  #[validate(length(min = 1, message = "at least one item is required"), nested)]
  pub items: Vec<RequestedItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RequestedItem {
  pub item_id: Uuid,
  #[validate(range(min = 1, message = "quantity must be greater than zero"))]
  pub quantity: i32,
}

/// Largest total the `NUMERIC(14, 2)` purchase column holds.
pub fn max_purchase_total() -> Decimal {
  Decimal::new(99_999_999_999_999, 2)
}

/// A purchase as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
  pub id: Uuid,
  pub user_id: Uuid,
  pub total_amount: Decimal,
  pub created_at: DateTime<Utc>,
  pub items: Vec<PurchaseItemView>,
}

/// Display form of a line item. `price` is the snapshot taken at purchase
/// time; `name` is looked up live and is `None` once the item is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItemView {
  pub item_id: Uuid,
  pub quantity: i32,
  pub name: Option<String>,
  pub price: Decimal,
}

// --- Store records ---

#[derive(Debug, Clone, FromRow)]
pub struct PurchaseRow {
  pub id: Uuid,
  pub user_id: Uuid,
  pub total_amount: Decimal,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PurchaseLine {
  pub id: Uuid,
  pub purchase_id: Uuid,
  pub item_id: Uuid,
  pub quantity: i32,
  pub price_at_purchase: Decimal,
}

/// A stored purchase with its lines, in the order they were requested.
#[derive(Debug, Clone)]
pub struct PurchaseRecord {
  pub header: PurchaseRow,
  pub lines: Vec<PurchaseLine>,
}

#[derive(Debug, Clone)]
pub struct NewPurchase {
  pub id: Uuid,
  pub user_id: Uuid,
  pub total_amount: Decimal,
  pub created_at: DateTime<Utc>,
  pub lines: Vec<NewPurchaseLine>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewPurchaseLine {
  pub item_id: Uuid,
  pub quantity: i32,
  pub price_at_purchase: Decimal,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::validate_payload;

  #[test]
  fn empty_purchase_is_rejected() {
    let err = validate_payload(&CreatePurchaseRequest { items: vec![] }).unwrap_err();
    assert!(err.to_string().contains("at least one item"));
  }

  #[test]
  fn zero_quantity_line_is_rejected() {
    let req = CreatePurchaseRequest {
      items: vec![
        RequestedItem { item_id: Uuid::new_v4(), quantity: 2 },
        RequestedItem { item_id: Uuid::new_v4(), quantity: 0 },
      ],
    };
    let err = validate_payload(&req).unwrap_err().to_string();
    assert!(err.contains("quantity must be greater than zero"), "{}", err);
  }
}
