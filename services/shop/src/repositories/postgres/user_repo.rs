// services/shop/src/repositories/postgres/user_repo.rs

use crate::models::user::{NewUser, User};
use crate::repositories::{StoreError, UserStore};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{event, instrument, Level};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
  pool: PgPool,
}

impl PgUserStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserStore for PgUserStore {
  #[instrument(name = "user_repo::email_exists", skip(self))]
  async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
      .bind(email)
      .fetch_one(&self.pool)
      .await?;
    Ok(exists)
  }

  #[instrument(name = "user_repo::insert_user", skip(self, new_user), fields(email = %new_user.email))]
  async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
    let query = format!(
      "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING {}",
      USER_COLUMNS
    );
    sqlx::query_as::<_, User>(&query)
      .bind(Uuid::new_v4())
      .bind(&new_user.name)
      .bind(&new_user.email)
      .bind(&new_user.password_hash)
      .fetch_one(&self.pool)
      .await
      .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
          event!(Level::WARN, "Unique constraint on users.email tripped.");
          StoreError::DuplicateEmail
        }
        _ => StoreError::Database(e),
      })
  }

  #[instrument(name = "user_repo::find_by_email", skip(self))]
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
    let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&query)
      .bind(email)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }
}
