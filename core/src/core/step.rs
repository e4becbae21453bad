// src/core/step.rs

/// A declared step of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
}

impl StepDef {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }
}
