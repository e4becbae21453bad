// src/pipeline/definition.rs

use crate::core::context_data::ContextData;
use crate::core::control::StepControl;
use crate::core::step::StepDef;
use crate::error::FlowError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// A type-erased step handler. It owns a clone of the run's `ContextData<T>`
/// and resolves to a control signal or the pipeline's error type.
pub type Handler<T, E> =
  Box<dyn Fn(ContextData<T>) -> Pin<Box<dyn Future<Output = Result<StepControl, E>> + Send>> + Send + Sync>;

/// An ordered list of named steps over context data `T`, failing with `E`.
///
/// `E` must be constructible from [`FlowError`] so that engine-level failures
/// (for instance a step without a handler) come out of `run` as the caller's
/// own error type.
pub struct Pipeline<T, E>
where
  T: Send + Sync + 'static,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef>,
  pub(crate) handlers: HashMap<String, Vec<Handler<T, E>>>,
}

impl<T, E> Pipeline<T, E>
where
  T: Send + Sync + 'static,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Declares a pipeline and its steps, in execution order.
  ///
  /// # Panics
  /// If a step name is declared twice.
  pub fn new(name: impl Into<String>, step_names: &[&str]) -> Self {
    let name = name.into();
    let mut steps: Vec<StepDef> = Vec::with_capacity(step_names.len());
    for step in step_names {
      if steps.iter().any(|s| s.name == *step) {
        panic!("shopflow setup error: step '{}' declared twice in pipeline '{}'", step, name);
      }
      steps.push(StepDef::new(*step));
    }
    Self {
      name,
      steps,
      handlers: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn has_step(&self, step: &str) -> bool {
    self.steps.iter().any(|s| s.name == step)
  }

  /// Typos in step names are programming errors, caught when the pipeline is built.
  pub(crate) fn ensure_step_exists(&self, step: &str) {
    if !self.has_step(step) {
      panic!(
        "shopflow setup error: {}",
        FlowError::StepNotFound {
          pipeline: self.name.clone(),
          step: step.to_string(),
        }
      );
    }
  }
}
