// src/lib.rs

//! shopflow: the async step engine behind the shop services' workflows.
//!
//! A workflow is a [`Pipeline`] of named steps. Each step has one or more
//! asynchronous handlers operating on a shared [`ContextData`]. A handler either
//! lets the pipeline continue, stops it early, or fails it with the pipeline's
//! error type.
//!
//! ```ignore
//! let mut p = Pipeline::<SignupCtx, AppError>::new("signup", &["validate", "persist"]);
//! p.on("validate", |ctx: ContextData<SignupCtx>| Box::pin(async move { ... }));
//! p.on("persist", |ctx: ContextData<SignupCtx>| Box::pin(async move { ... }));
//! let outcome = p.run(ContextData::new(signup_ctx)).await?;
//! ```

pub mod core;
pub mod error;
pub mod pipeline;

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineOutcome, StepControl};
pub use crate::core::step::StepDef;
pub use crate::error::{FlowError, FlowResult};
pub use crate::pipeline::{Handler, Pipeline};
