// services/shop/src/services/mod.rs

pub mod account_service;
pub mod auth_service;
pub mod purchase_service;

pub use account_service::AccountService;
pub use auth_service::{Claims, PasswordService, TokenService};
pub use purchase_service::PurchaseOrchestrator;
