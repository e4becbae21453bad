// services/shop/src/errors.rs

use crate::clients::item_client::DirectoryError;
use crate::repositories::StoreError;
use shopflow::FlowError;
use thiserror::Error;
use uuid::Uuid;

/// Application-level error shared by the three services.
///
/// Lower layers keep their own typed errors (`StoreError`, `DirectoryError`,
/// `FlowError`); the `From` impls below classify them into caller-facing
/// conflicts or opaque internal failures. HTTP mapping lives in
/// `web::error_response`.
#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  #[error("invalid email or password")]
  InvalidCredentials,

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("email already exists")]
  EmailExists,

  #[error("item {item_id} not found")]
  ItemNotFound { item_id: Uuid },

  #[error("stock for item {item_id} is not sufficient")]
  InsufficientStock { item_id: Uuid },

  #[error("Store Error: {0}")]
  Store(#[source] StoreError),

  #[error("Item Directory Error: {0}")]
  Directory(#[source] DirectoryError),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// True for failures whose details must stay out of responses.
  pub fn is_internal(&self) -> bool {
    matches!(
      self,
      AppError::Store(_) | AppError::Directory(_) | AppError::Workflow { .. } | AppError::Config(_) | AppError::Internal(_)
    )
  }
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::DuplicateEmail => AppError::EmailExists,
      StoreError::InsufficientStock { item_id } => AppError::InsufficientStock { item_id },
      StoreError::NotFound { entity } => AppError::NotFound(format!("{} not found", entity)),
      other => AppError::Store(other),
    }
  }
}

impl From<DirectoryError> for AppError {
  fn from(err: DirectoryError) -> Self {
    match err {
      DirectoryError::NotFound { item_id } => AppError::ItemNotFound { item_id },
      other => AppError::Directory(other),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn store_conflicts_become_caller_facing_errors() {
    let item_id = Uuid::new_v4();
    assert!(matches!(AppError::from(StoreError::DuplicateEmail), AppError::EmailExists));
    assert!(matches!(
      AppError::from(StoreError::InsufficientStock { item_id }),
      AppError::InsufficientStock { item_id: id } if id == item_id
    ));
    match AppError::from(StoreError::NotFound { entity: "Item" }) {
      AppError::NotFound(msg) => assert_eq!(msg, "Item not found"),
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn directory_failures_other_than_not_found_stay_internal() {
    let item_id = Uuid::new_v4();
    assert!(matches!(
      AppError::from(DirectoryError::NotFound { item_id }),
      AppError::ItemNotFound { .. }
    ));
    let timeout = AppError::from(DirectoryError::Timeout);
    assert!(timeout.is_internal());
    assert!(!AppError::InvalidCredentials.is_internal());
  }
}
