// core/src/store/mod.rs

//! The data-access seam of the catalog.
//!
//! `Catalog` talks to a `CatalogStore` trait object; `PgCatalogStore` backs it
//! with PostgreSQL and `MemoryCatalogStore` with in-process maps. Stores do
//! no validation of their own beyond what the schema enforces.

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{Category, NewProduct, NewReview, Product, Review};
use crate::pagination::PageRequest;
use crate::patch::ProductPatch;
use crate::shop_query::ProductFilter;

pub mod memory;
pub mod postgres;

#[async_trait]
pub trait CatalogStore: Send + Sync {
  /// Round-trips to the backing store. Used by the health check.
  async fn ping(&self) -> CatalogResult<()>;

  // --- Products ---

  /// One page of products matching `filter`, newest (highest id) first.
  async fn list_products(&self, filter: &ProductFilter, page: &PageRequest) -> CatalogResult<Vec<Product>>;

  async fn find_product(&self, product_id: i64) -> CatalogResult<Option<Product>>;

  async fn find_product_by_sku(&self, sku: &str) -> CatalogResult<Option<Product>>;

  async fn find_product_by_slug(&self, slug: &str) -> CatalogResult<Option<Product>>;

  async fn insert_product(&self, product: &NewProduct) -> CatalogResult<Product>;

  /// Applies the non-`None` fields of `patch`. `Ok(None)` when no row has `product_id`.
  async fn update_product(&self, product_id: i64, patch: &ProductPatch) -> CatalogResult<Option<Product>>;

  /// `Ok(false)` when no row was deleted.
  async fn delete_product(&self, product_id: i64) -> CatalogResult<bool>;

  async fn count_cart_references(&self, product_id: i64) -> CatalogResult<i64>;

  async fn count_order_references(&self, product_id: i64) -> CatalogResult<i64>;

  // --- Categories ---

  async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

  async fn find_category(&self, category_id: i64) -> CatalogResult<Option<Category>>;

  async fn insert_category(&self, name: &str, description: Option<&str>) -> CatalogResult<Category>;

  // --- Reviews ---

  /// Reviews of one product, newest first.
  async fn list_reviews(&self, product_id: i64) -> CatalogResult<Vec<Review>>;

  async fn insert_review(&self, review: &NewReview) -> CatalogResult<Review>;
}
