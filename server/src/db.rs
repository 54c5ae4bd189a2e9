// server/src/db.rs

//! Pool setup, schema migrations and the optional starter-category seed.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use storefront::Catalog;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::errors::Result;

/// Categories inserted by `SEED_DB=true` when none exist yet.
pub const STARTER_CATEGORIES: &[(&str, &str)] = &[
  ("Herbal Teas", "Loose-leaf and bagged herbal blends"),
  ("Honey & Sweeteners", "Raw honey and natural sweeteners"),
  ("Spices", "Whole and ground spices"),
  ("Oils", "Cold-pressed cooking and body oils"),
  ("Personal Care", "Soaps, balms and natural skincare"),
];

#[instrument(name = "db::connect", skip(config), fields(max_connections = config.database_max_connections))]
pub async fn connect(config: &AppConfig) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.database_max_connections)
    .acquire_timeout(Duration::from_secs(5))
    .connect(&config.database_url)
    .await?;
  info!("Successfully connected to the database.");
  Ok(pool)
}

#[instrument(name = "db::run_migrations", skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
  sqlx::migrate!("./migrations").run(pool).await?;
  info!("Database migrations applied.");
  Ok(())
}

/// Inserts [`STARTER_CATEGORIES`] through the catalog's store when the category table is empty.
///
/// Returns the number of categories inserted.
#[instrument(name = "db::seed", skip(catalog))]
pub async fn seed(catalog: &Catalog) -> Result<usize> {
  let store = catalog.store();
  if !store.list_categories().await?.is_empty() {
    info!("Categories already present, skipping seed.");
    return Ok(0);
  }
  for (name, description) in STARTER_CATEGORIES {
    store.insert_category(name, Some(*description)).await?;
  }
  info!(count = STARTER_CATEGORIES.len(), "Seeded starter categories.");
  Ok(STARTER_CATEGORIES.len())
}
