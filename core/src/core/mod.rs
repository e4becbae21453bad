pub mod context_data;
pub mod control;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineOutcome, StepControl};
pub use step::StepDef;
