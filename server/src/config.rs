// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Output format of the tracing subscriber, read from `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl FromStr for LogFormat {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" | "text" => Ok(LogFormat::Pretty),
      "json" => Ok(LogFormat::Json),
      other => Err(AppError::Config(format!("Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'", other))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,

  /// Apply `migrations/` on startup.
  pub run_migrations: bool,
  /// Insert starter categories when the categories table is empty.
  pub seed_db: bool,

  pub default_page_size: i64,
  pub max_page_size: i64,

  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = parse_env("SERVER_PORT", 8080u16)?;
    let database_url = get_env("DATABASE_URL")?;
    let database_max_connections = parse_env("DATABASE_MAX_CONNECTIONS", 5u32)?;
    let run_migrations = parse_env("RUN_MIGRATIONS", true)?;
    let seed_db = parse_env("SEED_DB", false)?;
    let default_page_size = parse_env("DEFAULT_PAGE_SIZE", storefront::pagination::DEFAULT_PAGE_SIZE)?;
    let max_page_size = parse_env("MAX_PAGE_SIZE", storefront::pagination::MAX_PAGE_SIZE)?;
    let log_format = match env::var("LOG_FORMAT") {
      Ok(value) => value.parse()?,
      Err(_) => LogFormat::default(),
    };

    if default_page_size <= 0 || max_page_size <= 0 {
      return Err(AppError::Config("Page sizes must be positive".to_string()));
    }
    if database_max_connections == 0 {
      return Err(AppError::Config("DATABASE_MAX_CONNECTIONS must be at least 1".to_string()));
    }

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      run_migrations,
      seed_db,
      default_page_size,
      max_page_size,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }

  pub fn page_limits(&self) -> storefront::PageLimits {
    storefront::PageLimits::new(self.default_page_size, self.max_page_size)
  }
}

/// Parses an optional variable, falling back to `default` when it is unset.
fn parse_env<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(var_name) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e))),
    Err(_) => Ok(default),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn log_format_parses_known_values() {
    assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
    assert_eq!(" Pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    assert!(matches!("xml".parse::<LogFormat>(), Err(AppError::Config(_))));
  }

  // The only test in this crate that touches the process environment.
  #[test]
  fn from_env_carries_the_log_format() {
    env::set_var("DATABASE_URL", "postgres://localhost/storefront_test");
    env::set_var("LOG_FORMAT", "json");
    assert_eq!(AppConfig::from_env().unwrap().log_format, LogFormat::Json);

    env::set_var("LOG_FORMAT", "xml");
    assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));

    env::remove_var("LOG_FORMAT");
    assert_eq!(AppConfig::from_env().unwrap().log_format, LogFormat::Pretty);
  }
}
