// services/shop/src/bin/purchase_service.rs

use actix_web::{web, App, HttpServer};
use shop_services::clients::{HttpItemDirectory, ItemDirectory};
use shop_services::config::{AppConfig, LogFormat, ServiceKind};
use shop_services::repositories::postgres::PgPurchaseStore;
use shop_services::repositories::PurchaseStore;
use shop_services::services::{PurchaseOrchestrator, TokenService};
use shop_services::state::PurchaseServiceState;
use shop_services::{db, telemetry, web as shop_web};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  telemetry::init_tracing(LogFormat::from_env());
  tracing::info!("Starting purchase service...");

  let config = AppConfig::from_env(ServiceKind::Purchase)?;
  let pool = db::connect(&config).await?;
  if config.run_migrations {
    db::run_migrations(&pool).await?;
  }

  let directory: Arc<dyn ItemDirectory> =
    Arc::new(HttpItemDirectory::new(config.item_service_url.clone(), config.item_client_timeout)?);
  let store: Arc<dyn PurchaseStore> = Arc::new(PgPurchaseStore::new(pool));
  tracing::info!(
    item_service_url = %config.item_service_url,
    timeout_secs = config.item_client_timeout.as_secs(),
    "Item directory client configured."
  );

  let state = PurchaseServiceState {
    purchases: Arc::new(PurchaseOrchestrator::new(directory, store)),
  };
  let token_data = web::Data::new(TokenService::new(&config.jwt_secret, config.token_ttl_hours));

  let server_address = format!("{}:{}", config.server_host, config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(state.clone()))
      .app_data(token_data.clone())
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(shop_web::configure_purchase_service)
  })
  .bind(&server_address)?
  .run()
  .await?;

  tracing::info!("Purchase service stopped.");
  Ok(())
}
