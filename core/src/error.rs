// src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures raised by the engine itself rather than by workflow handlers.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Pipeline '{pipeline}' has no step named '{step}'")]
  StepNotFound { pipeline: String, step: String },

  #[error("Pipeline '{pipeline}' has no handler for step '{step}'")]
  HandlerMissing { pipeline: String, step: String },

  #[error("Handler failed: {source}")]
  Handler {
    #[source]
    source: AnyhowError,
  },

  #[error("Context for pipeline '{pipeline}' is still shared after the run")]
  ContextStillShared { pipeline: String },
}

impl From<AnyhowError> for FlowError {
  fn from(source: AnyhowError) -> Self {
    FlowError::Handler { source }
  }
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;
