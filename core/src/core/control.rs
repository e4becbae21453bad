// src/core/control.rs

//! Flow-control signals returned by handlers and the outcome of a run.

/// Returned by a handler to say whether the pipeline goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  /// Run the remaining handlers of this step, then the next step.
  Continue,
  /// Halt the pipeline right after this handler.
  Stop,
}

/// How a pipeline run ended when no handler failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
  /// Every step ran and every handler returned `Continue`.
  Completed,
  /// A handler of `step` returned `Stop`.
  Stopped { step: String },
}

impl PipelineOutcome {
  pub fn is_completed(&self) -> bool {
    matches!(self, PipelineOutcome::Completed)
  }
}
