// services/shop/src/repositories/postgres/mod.rs

pub mod item_repo;
pub mod purchase_repo;
pub mod user_repo;

pub use item_repo::PgItemStore;
pub use purchase_repo::PgPurchaseStore;
pub use user_repo::PgUserStore;
