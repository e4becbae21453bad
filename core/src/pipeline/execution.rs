// src/pipeline/execution.rs

//! `Pipeline::run` and friends.

use crate::core::context_data::ContextData;
use crate::core::control::{PipelineOutcome, StepControl};
use crate::error::FlowError;
use crate::pipeline::definition::Pipeline;
use std::time::Instant;
use tracing::{event, info_span, Instrument, Level};

impl<T, E> Pipeline<T, E>
where
  T: Send + Sync + 'static,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// The first handler error aborts the run and is returned as is. A step
  /// without any handler fails the run with [`FlowError::HandlerMissing`].
  pub async fn run(&self, ctx_data: ContextData<T>) -> Result<PipelineOutcome, E> {
    event!(Level::DEBUG, pipeline = %self.name, num_steps = self.steps.len(), "Pipeline run starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step = step_def.name.as_str();
      let handlers = match self.handlers.get(step) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ => {
          event!(Level::ERROR, pipeline = %self.name, %step, "Step has no handler.");
          return Err(E::from(FlowError::HandlerMissing {
            pipeline: self.name.clone(),
            step: step.to_string(),
          }));
        }
      };

      let span = info_span!("pipeline_step", pipeline = %self.name, step, step_index = step_idx);
      let started = Instant::now();
      for handler in handlers {
        match handler(ctx_data.clone()).instrument(span.clone()).await {
          Ok(StepControl::Continue) => {}
          Ok(StepControl::Stop) => {
            event!(Level::INFO, pipeline = %self.name, %step, "Pipeline stopped by handler.");
            return Ok(PipelineOutcome::Stopped { step: step.to_string() });
          }
          Err(e) => {
            event!(Level::DEBUG, pipeline = %self.name, %step, error = %e, "Step failed.");
            return Err(e);
          }
        }
      }
      event!(
        Level::DEBUG,
        pipeline = %self.name,
        %step,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Step finished."
      );
    }

    event!(Level::DEBUG, pipeline = %self.name, "Pipeline run completed.");
    Ok(PipelineOutcome::Completed)
  }

  /// Runs the pipeline on `data` and hands the final context back.
  ///
  /// Fails with [`FlowError::ContextStillShared`] if a handler kept a clone of
  /// the context alive past the run.
  pub async fn run_owned(&self, data: T) -> Result<(PipelineOutcome, T), E> {
    let ctx_data = ContextData::new(data);
    let outcome = self.run(ctx_data.clone()).await?;
    let data = ctx_data.try_into_inner().map_err(|_| {
      E::from(FlowError::ContextStillShared {
        pipeline: self.name.clone(),
      })
    })?;
    Ok((outcome, data))
  }
}
