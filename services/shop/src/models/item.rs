// services/shop/src/models/item.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub price: Decimal,
  pub stock: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Body of both `POST /items` and `PUT /items/{id}`; an update replaces all
/// four fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ItemRequest {
  #[validate(length(min = 3, message = "name must be at least 3 characters"))]
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[validate(custom(function = "storable_price"))]
  pub price: Decimal,
  #[validate(range(min = 0, message = "stock must not be negative"))]
  pub stock: i32,
}

/// Largest price the `NUMERIC(12, 2)` column holds.
pub fn max_item_price() -> Decimal {
  Decimal::new(999_999_999_999, 2)
}

fn storable_price(price: &Decimal) -> Result<(), ValidationError> {
  let (code, message) = if *price < Decimal::ZERO {
    ("non_negative", "price must not be negative")
  } else if *price > max_item_price() {
    ("max_price", "price must not exceed 9999999999.99")
  } else if price.scale() > 2 {
    ("price_scale", "price must have at most 2 decimal places")
  } else {
    return Ok(());
  };
  let mut err = ValidationError::new(code);
  err.message = Some(message.into());
  Err(err)
}
