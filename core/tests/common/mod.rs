// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset of these helpers

use std::sync::Arc;

use once_cell::sync::Lazy;
use storefront::{Catalog, CatalogStore, MemoryCatalogStore, NewProductRequest, Product};
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---

/// A catalog over an empty in-memory store, with the store handle kept for direct setup.
pub fn empty_catalog() -> (Catalog, Arc<MemoryCatalogStore>) {
  setup_tracing();
  let store = Arc::new(MemoryCatalogStore::new());
  (Catalog::new(store.clone()), store)
}

/// Catalog with categories 1 "Tea", 2 "Honey", 3 "Spices".
pub async fn catalog_with_categories() -> (Catalog, Arc<MemoryCatalogStore>) {
  let (catalog, store) = empty_catalog();
  for name in ["Tea", "Honey", "Spices"] {
    catalog
      .store()
      .insert_category(name, Some("starter category"))
      .await
      .expect("insert category");
  }
  (catalog, store)
}

pub fn product_request(name: &str, price_cents: i64, category_id: i64) -> NewProductRequest {
  NewProductRequest {
    name: Some(name.to_string()),
    price_cents: Some(price_cents),
    category_id: Some(category_id),
    quantity: Some(10),
    ..Default::default()
  }
}

pub async fn create(catalog: &Catalog, name: &str, price_cents: i64, category_id: i64) -> Product {
  catalog
    .create_product(product_request(name, price_cents, category_id), Some(1))
    .await
    .expect("create product")
}
