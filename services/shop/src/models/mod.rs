// services/shop/src/models/mod.rs

pub mod item;
pub mod purchase;
pub mod user;

use crate::errors::AppError;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Runs the DTO's `validator` rules and folds failures into one
/// `AppError::Validation` message (`field: code` pairs, sorted).
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
  payload.validate().map_err(|errors| AppError::Validation(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
  let mut parts: Vec<String> = errors
    .errors()
    .iter()
    .map(|(field, kind)| match kind {
      ValidationErrorsKind::Field(field_errors) => {
        let reasons: Vec<String> = field_errors
          .iter()
          .map(|e| match &e.message {
            Some(message) => message.to_string(),
            None => e.code.to_string(),
          })
          .collect();
        format!("{}: {}", field, reasons.join(", "))
      }
      ValidationErrorsKind::Struct(inner) => format!("{}.{}", field, describe(inner)),
      ValidationErrorsKind::List(entries) => {
        let inner: Vec<String> = entries
          .iter()
          .map(|(idx, e)| format!("{}[{}].{}", field, idx, describe(e)))
          .collect();
        inner.join("; ")
      }
    })
    .collect();
  parts.sort();
  parts.join("; ")
}
