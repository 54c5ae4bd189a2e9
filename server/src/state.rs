// server/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use storefront::Catalog;

#[derive(Clone, Debug)]
pub struct AppState {
  pub catalog: Catalog,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(catalog: Catalog, config: Arc<AppConfig>) -> Self {
    Self { catalog, config }
  }
}
