// services/shop/src/lib.rs

//! The shop's three HTTP services (user, item, purchase) sharing one library:
//! models, stores, the item-directory client, the workflows and the web layer.
//! Each binary under `src/bin/` wires one service.

pub mod clients;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod repositories;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod web;

pub use errors::{AppError, Result};
