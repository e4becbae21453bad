// services/shop/src/web/routes.rs

use crate::web::error_response::{json_error_handler, path_error_handler};
use crate::web::handlers::{item_handlers, purchase_handlers, user_handlers};
use actix_web::web;

pub const API_PREFIX: &str = "/api/v1";

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Body and path extraction failures answer in the `{ "error": ... }` shape.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler));
}

pub fn configure_user_service(cfg: &mut web::ServiceConfig) {
  configure_extractors(cfg);
  cfg.service(
    web::scope(API_PREFIX)
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/users")
          .route("/register", web::post().to(user_handlers::register_handler))
          .route("/login", web::post().to(user_handlers::login_handler)),
      ),
  );
}

pub fn configure_item_service(cfg: &mut web::ServiceConfig) {
  configure_extractors(cfg);
  cfg.service(
    web::scope(API_PREFIX)
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/items")
          .route("", web::get().to(item_handlers::list_items_handler))
          .route("", web::post().to(item_handlers::create_item_handler))
          .route("/{item_id}", web::get().to(item_handlers::get_item_handler))
          .route("/{item_id}", web::put().to(item_handlers::update_item_handler))
          .route("/{item_id}", web::delete().to(item_handlers::delete_item_handler)),
      ),
  );
}

pub fn configure_purchase_service(cfg: &mut web::ServiceConfig) {
  configure_extractors(cfg);
  cfg.service(
    web::scope(API_PREFIX)
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/purchases")
          .route("", web::post().to(purchase_handlers::create_purchase_handler))
          .route("", web::get().to(purchase_handlers::purchase_history_handler)),
      ),
  );
}
