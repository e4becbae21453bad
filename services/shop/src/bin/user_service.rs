// services/shop/src/bin/user_service.rs

use actix_web::{web, App, HttpServer};
use shop_services::config::{AppConfig, LogFormat, ServiceKind};
use shop_services::repositories::postgres::PgUserStore;
use shop_services::repositories::UserStore;
use shop_services::services::{AccountService, PasswordService, TokenService};
use shop_services::state::UserServiceState;
use shop_services::{db, telemetry, web as shop_web};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  telemetry::init_tracing(LogFormat::from_env());
  tracing::info!("Starting user service...");

  let config = AppConfig::from_env(ServiceKind::User)?;
  let pool = db::connect(&config).await?;
  if config.run_migrations {
    db::run_migrations(&pool).await?;
  }

  let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
  let passwords = Arc::new(PasswordService::new(config.argon2_memory_kib, config.argon2_iterations)?);
  let tokens = Arc::new(TokenService::new(&config.jwt_secret, config.token_ttl_hours));
  let state = UserServiceState {
    accounts: Arc::new(AccountService::new(users, passwords, tokens.clone())),
  };
  let token_data = web::Data::from(tokens);

  let server_address = format!("{}:{}", config.server_host, config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(state.clone()))
      .app_data(token_data.clone())
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(shop_web::configure_user_service)
  })
  .bind(&server_address)?
  .run()
  .await?;

  tracing::info!("User service stopped.");
  Ok(())
}
