// tests/common/mod.rs
#![allow(dead_code)]

use once_cell::sync::Lazy;
use shopflow::{ContextData, FlowError, StepControl};
use std::future::Future;
use std::pin::Pin;
use tracing::Level;

pub type StepFuture = Pin<Box<dyn Future<Output = Result<StepControl, TestError>> + Send>>;

/// Context used by most engine tests: a running basket total and a trail of
/// the steps that ran.
#[derive(Clone, Debug, Default)]
pub struct BasketContext {
  pub total_cents: i64,
  pub lines_priced: u32,
  pub trail: Vec<String>,
  pub stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("engine error: {0}")]
  Flow(String),

  #[error("handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(err: FlowError) -> Self {
    TestError::Flow(format!("{:?}", err))
  }
}

/// Adds `cents` to the basket and records `step` in the trail.
pub fn add_line_handler(
  step: &'static str,
  cents: i64,
) -> impl Fn(ContextData<BasketContext>) -> StepFuture + Send + Sync + 'static {
  move |ctx: ContextData<BasketContext>| -> StepFuture {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.total_cents += cents;
      guard.lines_priced += 1;
      guard.trail.push(step.to_string());
      if guard.stop_at.as_deref() == Some(step) {
        return Ok(StepControl::Stop);
      }
      Ok(StepControl::Continue)
    })
  }
}

pub fn failing_handler(
  step: &'static str,
  message: &'static str,
) -> impl Fn(ContextData<BasketContext>) -> StepFuture + Send + Sync + 'static {
  move |ctx: ContextData<BasketContext>| -> StepFuture {
    Box::pin(async move {
      ctx.write().trail.push(step.to_string());
      Err(TestError::Handler(message.to_string()))
    })
  }
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
