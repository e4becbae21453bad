// services/shop/src/bin/item_service.rs

use actix_web::{web, App, HttpServer};
use shop_services::config::{AppConfig, LogFormat, ServiceKind};
use shop_services::repositories::postgres::PgItemStore;
use shop_services::services::TokenService;
use shop_services::state::ItemServiceState;
use shop_services::{db, telemetry, web as shop_web};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  telemetry::init_tracing(LogFormat::from_env());
  tracing::info!("Starting item service...");

  let config = AppConfig::from_env(ServiceKind::Item)?;
  let pool = db::connect(&config).await?;
  if config.run_migrations {
    db::run_migrations(&pool).await?;
  }

  let state = ItemServiceState {
    items: Arc::new(PgItemStore::new(pool)),
  };
  let token_data = web::Data::new(TokenService::new(&config.jwt_secret, config.token_ttl_hours));

  let server_address = format!("{}:{}", config.server_host, config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(state.clone()))
      .app_data(token_data.clone())
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(shop_web::configure_item_service)
  })
  .bind(&server_address)?
  .run()
  .await?;

  tracing::info!("Item service stopped.");
  Ok(())
}
