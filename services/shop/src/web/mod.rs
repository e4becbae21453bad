// services/shop/src/web/mod.rs

pub mod error_response;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AuthenticatedUser;
pub use routes::{configure_item_service, configure_purchase_service, configure_user_service, API_PREFIX};
