// src/pipeline/hooks.rs

//! Handler registration.

use crate::core::context_data::ContextData;
use crate::core::control::StepControl;
use crate::error::FlowError;
use crate::pipeline::definition::{Handler, Pipeline};
use std::future::Future;
use tracing::{event, Level};

impl<T, E> Pipeline<T, E>
where
  T: Send + Sync + 'static,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Registers a handler for `step`. Handlers of one step run in the order
  /// they were registered.
  ///
  /// The handler may fail with any error convertible into the pipeline's `E`.
  ///
  /// # Panics
  /// If `step` was not declared in [`Pipeline::new`].
  pub fn on<F, HandlerErr>(&mut self, step: &str, handler_fn: impl Fn(ContextData<T>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<E> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step);
    let handler: Handler<T, E> = Box::new(move |ctx_data| {
      let fut = handler_fn(ctx_data);
      Box::pin(async move { fut.await.map_err(Into::into) })
    });
    self.handlers.entry(step.to_string()).or_default().push(handler);
    event!(Level::TRACE, pipeline = %self.name, %step, "Handler registered.");
  }
}
