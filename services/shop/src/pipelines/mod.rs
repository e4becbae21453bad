// services/shop/src/pipelines/mod.rs

//! The multi-step workflows of the shop, each a `shopflow::Pipeline`.
//!
//! Pipelines are built once at startup by the service that owns them and run
//! once per request on a fresh context.

pub mod contexts;
pub mod purchase_pipeline;
pub mod signin_pipeline;
pub mod signup_pipeline;
