// services/shop/src/clients/mod.rs

pub mod item_client;

pub use item_client::{DirectoryError, DirectoryItem, HttpItemDirectory, ItemDirectory};
