// services/shop/src/web/handlers/mod.rs

pub mod item_handlers;
pub mod purchase_handlers;
pub mod user_handlers;
