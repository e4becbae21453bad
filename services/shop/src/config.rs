// services/shop/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which of the three services is starting. Only affects defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
  User,
  Item,
  Purchase,
}

impl ServiceKind {
  pub fn default_port(self) -> u16 {
    match self {
      ServiceKind::User => 5000,
      ServiceKind::Item => 5001,
      ServiceKind::Purchase => 5002,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      ServiceKind::User => "user-service",
      ServiceKind::Item => "item-service",
      ServiceKind::Purchase => "purchase-service",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl LogFormat {
  /// Reads `LOG_FORMAT`; anything but `json` means pretty output.
  pub fn from_env() -> Self {
    match env::var("LOG_FORMAT") {
      Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
      _ => LogFormat::Pretty,
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub service: ServiceKind,
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  pub db_max_connections: u32,
  pub db_min_connections: u32,
  pub run_migrations: bool,

  pub jwt_secret: String,
  pub token_ttl_hours: i64,

  /// Base URL of the item service API, e.g. `http://127.0.0.1:5001/api/v1`.
  pub item_service_url: String,
  pub item_client_timeout: Duration,

  // None keeps the argon2 crate defaults.
  pub argon2_memory_kib: Option<u32>,
  pub argon2_iterations: Option<u32>,

  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env(service: ServiceKind) -> Result<Self> {
    dotenv().ok();

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let server_port = parse_or("PORT", service.default_port())?;
    let database_url = get_env("DATABASE_URL")?;

    let db_max_connections = parse_or("DB_MAX_CONNECTIONS", 10u32)?;
    let db_min_connections = parse_or("DB_MIN_CONNECTIONS", 2u32)?;
    if db_min_connections > db_max_connections {
      return Err(AppError::Config(format!(
        "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
        db_min_connections, db_max_connections
      )));
    }
    let run_migrations = parse_or("RUN_MIGRATIONS", false)?;

    let jwt_secret = get_env("JWT_SECRET")?;
    if jwt_secret.trim().is_empty() {
      return Err(AppError::Config("JWT_SECRET must not be empty".to_string()));
    }
    let token_ttl_hours = parse_or("TOKEN_TTL_HOURS", 72i64)?;

    let item_service_url = get_env("ITEM_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:5001/api/v1".to_string());
    let item_client_timeout = Duration::from_secs(parse_or("ITEM_CLIENT_TIMEOUT_SECS", 5u64)?);

    let argon2_memory_kib = parse_optional("ARGON2_MEMORY_KIB")?;
    let argon2_iterations = parse_optional("ARGON2_ITERATIONS")?;

    let log_format = LogFormat::from_env();

    tracing::info!(service = service.name(), "Application configuration loaded successfully.");

    Ok(Self {
      service,
      server_host,
      server_port,
      database_url,
      db_max_connections,
      db_min_connections,
      run_migrations,
      jwt_secret,
      token_ttl_hours,
      item_service_url,
      item_client_timeout,
      argon2_memory_kib,
      argon2_iterations,
      log_format,
    })
  }
}

fn parse_or<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match parse_optional(var_name)? {
    Some(v) => Ok(v),
    None => Ok(default),
  }
}

fn parse_optional<T>(var_name: &str) -> Result<Option<T>>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(var_name) {
    Ok(raw) if !raw.trim().is_empty() => raw
      .trim()
      .parse::<T>()
      .map(Some)
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e))),
    _ => Ok(None),
  }
}
