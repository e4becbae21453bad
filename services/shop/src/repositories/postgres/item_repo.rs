// services/shop/src/repositories/postgres/item_repo.rs

use crate::models::item::{Item, ItemRequest};
use crate::repositories::{ItemStore, StoreError};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

const ITEM_COLUMNS: &str = "id, name, description, price, stock, created_at, updated_at";

#[derive(Clone)]
pub struct PgItemStore {
  pool: PgPool,
}

impl PgItemStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ItemStore for PgItemStore {
  #[instrument(name = "item_repo::create_item", skip(self, input), fields(name = %input.name))]
  async fn create_item(&self, input: ItemRequest) -> Result<Item, StoreError> {
    let query = format!(
      "INSERT INTO items (id, name, description, price, stock) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
      ITEM_COLUMNS
    );
    let item = sqlx::query_as::<_, Item>(&query)
      .bind(Uuid::new_v4())
      .bind(&input.name)
      .bind(&input.description)
      .bind(input.price)
      .bind(input.stock)
      .fetch_one(&self.pool)
      .await?;
    Ok(item)
  }

  #[instrument(name = "item_repo::list_items", skip(self))]
  async fn list_items(&self) -> Result<Vec<Item>, StoreError> {
    let query = format!("SELECT {} FROM items ORDER BY created_at DESC", ITEM_COLUMNS);
    let items = sqlx::query_as::<_, Item>(&query).fetch_all(&self.pool).await?;
    Ok(items)
  }

  #[instrument(name = "item_repo::find_item", skip(self))]
  async fn find_item(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
    let query = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);
    let item = sqlx::query_as::<_, Item>(&query)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(item)
  }

  #[instrument(name = "item_repo::update_item", skip(self, input))]
  async fn update_item(&self, id: Uuid, input: ItemRequest) -> Result<Item, StoreError> {
    let query = format!(
      "UPDATE items SET name = $1, description = $2, price = $3, stock = $4, updated_at = NOW() \
       WHERE id = $5 RETURNING {}",
      ITEM_COLUMNS
    );
    sqlx::query_as::<_, Item>(&query)
      .bind(&input.name)
      .bind(&input.description)
      .bind(input.price)
      .bind(input.stock)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?
      .ok_or(StoreError::NotFound { entity: "Item" })
  }

  #[instrument(name = "item_repo::delete_item", skip(self))]
  async fn delete_item(&self, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM items WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      return Err(StoreError::NotFound { entity: "Item" });
    }
    Ok(())
  }
}
