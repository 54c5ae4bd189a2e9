// server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use storefront::{Catalog, PgCatalogStore};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use storefront_server::config::{AppConfig, LogFormat};
use storefront_server::db;
use storefront_server::state::AppState;
use storefront_server::web::configure_app_routes;

fn init_tracing(format: LogFormat) {
  let subscriber = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))) // RUST_LOG override
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Json => subscriber.json().init(),
    LogFormat::Pretty => subscriber.init(),
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Logging is configured from the loaded config, so a config error surfaces through anyhow alone.
  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);
  init_tracing(app_config.log_format);
  tracing::info!("Starting storefront catalog server...");
  // DATABASE_URL may carry credentials and is never logged.
  tracing::info!(
    host = %app_config.server_host,
    port = app_config.server_port,
    run_migrations = app_config.run_migrations,
    seed_db = app_config.seed_db,
    log_format = ?app_config.log_format,
    "Application configuration loaded successfully."
  );

  let db_pool = db::connect(&app_config)
    .await
    .context("Failed to connect to the database")?;
  if app_config.run_migrations {
    db::run_migrations(&db_pool).await.context("Failed to run migrations")?;
  }

  let catalog = Catalog::new(Arc::new(PgCatalogStore::new(db_pool))).with_limits(app_config.page_limits());

  if app_config.seed_db {
    db::seed(&catalog).await.context("Failed to seed database")?;
  }

  let app_state = AppState::new(catalog, app_config.clone());

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  tracing::info!("Server stopped.");
  Ok(())
}
