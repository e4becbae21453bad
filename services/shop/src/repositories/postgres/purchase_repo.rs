// services/shop/src/repositories/postgres/purchase_repo.rs

use crate::models::purchase::{NewPurchase, PurchaseLine, PurchaseRecord, PurchaseRow};
use crate::repositories::{PurchaseStore, StoreError};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{event, instrument, Level};
use uuid::Uuid;

#[derive(Clone)]
pub struct PgPurchaseStore {
  pool: PgPool,
}

impl PgPurchaseStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl PurchaseStore for PgPurchaseStore {
  #[instrument(
    name = "purchase_repo::record_purchase",
    skip(self, purchase),
    fields(purchase_id = %purchase.id, user_id = %purchase.user_id, lines = purchase.lines.len())
  )]
  async fn record_purchase(&self, purchase: NewPurchase) -> Result<PurchaseRecord, StoreError> {
    // Dropping `tx` without commit rolls everything back, including on
    // early return and on request cancellation.
    let mut tx = self.pool.begin().await?;

    let header = sqlx::query_as::<_, PurchaseRow>(
      "INSERT INTO purchases (id, user_id, total_amount, created_at) VALUES ($1, $2, $3, $4) \
       RETURNING id, user_id, total_amount, created_at",
    )
    .bind(purchase.id)
    .bind(purchase.user_id)
    .bind(purchase.total_amount)
    .bind(purchase.created_at)
    .fetch_one(&mut *tx)
    .await?;

    let mut lines = Vec::with_capacity(purchase.lines.len());
    for (line_no, line) in purchase.lines.iter().enumerate() {
      let stored = sqlx::query_as::<_, PurchaseLine>(
        "INSERT INTO purchase_items (id, purchase_id, item_id, quantity, price_at_purchase, line_no) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, purchase_id, item_id, quantity, price_at_purchase",
      )
      .bind(Uuid::new_v4())
      .bind(purchase.id)
      .bind(line.item_id)
      .bind(line.quantity)
      .bind(line.price_at_purchase)
      .bind(line_no as i32)
      .fetch_one(&mut *tx)
      .await?;
      lines.push(stored);
    }

    // Row locks are taken in ascending item id order so that two multi-item
    // purchases cannot deadlock on each other.
    let mut decrements: Vec<(Uuid, i32)> = purchase.lines.iter().map(|l| (l.item_id, l.quantity)).collect();
    decrements.sort_by_key(|(item_id, _)| *item_id);

    for (item_id, quantity) in decrements {
      let result = sqlx::query(
        "UPDATE items SET stock = stock - $1, updated_at = NOW() WHERE id = $2 AND stock >= $1",
      )
      .bind(quantity)
      .bind(item_id)
      .execute(&mut *tx)
      .await?;

      if result.rows_affected() == 0 {
        event!(Level::WARN, %item_id, quantity, "Conditional stock decrement matched no row; rolling back.");
        tx.rollback().await?;
        return Err(StoreError::InsufficientStock { item_id });
      }
    }

    tx.commit().await?;
    event!(Level::INFO, purchase_id = %header.id, "Purchase committed.");
    Ok(PurchaseRecord { header, lines })
  }

  #[instrument(name = "purchase_repo::purchases_for_user", skip(self))]
  async fn purchases_for_user(&self, user_id: Uuid) -> Result<Vec<PurchaseRecord>, StoreError> {
    let headers = sqlx::query_as::<_, PurchaseRow>(
      "SELECT id, user_id, total_amount, created_at FROM purchases \
       WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    if headers.is_empty() {
      return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
    let all_lines = sqlx::query_as::<_, PurchaseLine>(
      "SELECT id, purchase_id, item_id, quantity, price_at_purchase FROM purchase_items \
       WHERE purchase_id = ANY($1) ORDER BY purchase_id, line_no",
    )
    .bind(&ids)
    .fetch_all(&self.pool)
    .await?;

    let mut by_purchase: HashMap<Uuid, Vec<PurchaseLine>> = HashMap::new();
    for line in all_lines {
      by_purchase.entry(line.purchase_id).or_default().push(line);
    }

    Ok(
      headers
        .into_iter()
        .map(|header| {
          let lines = by_purchase.remove(&header.id).unwrap_or_default();
          PurchaseRecord { header, lines }
        })
        .collect(),
    )
  }
}
