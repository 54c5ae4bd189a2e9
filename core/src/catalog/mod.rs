// core/src/catalog/mod.rs

//! The catalog service: request validation and orchestration over a `CatalogStore`.
//!
//! Handlers call `Catalog` and never the store directly. Each method either
//! succeeds completely or returns a `CatalogError` describing why not.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Product};
use crate::pagination::{PageLimits, PageRequest, Pagination};
use crate::shop_query::{ProductFilter, ShopQuery};
use crate::store::CatalogStore;

mod cart;
mod products;
mod reviews;

pub use cart::CartLineRequest;
pub use products::{short_description_of, slugify};

/// Related products are picked from this many newest products of the category.
pub const RELATED_POOL_SIZE: i64 = 20;
pub const DEFAULT_RELATED_LIMIT: i64 = 4;

/// One page of a product listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
  pub products: Vec<Product>,
  pub pagination: Pagination,
}

impl ProductPage {
  pub fn new(products: Vec<Product>, request: &PageRequest) -> Self {
    let pagination = Pagination::from_rows(request, products.len());
    Self { products, pagination }
  }

  pub fn empty(request: &PageRequest) -> Self {
    Self::new(Vec::new(), request)
  }

  pub fn results(&self) -> usize {
    self.products.len()
  }
}

#[derive(Clone)]
pub struct Catalog {
  store: Arc<dyn CatalogStore>,
  limits: PageLimits,
}

impl std::fmt::Debug for Catalog {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Catalog").field("limits", &self.limits).finish()
  }
}

impl Catalog {
  pub fn new(store: Arc<dyn CatalogStore>) -> Self {
    Self {
      store,
      limits: PageLimits::default(),
    }
  }

  pub fn with_limits(mut self, limits: PageLimits) -> Self {
    self.limits = limits;
    self
  }

  pub fn limits(&self) -> PageLimits {
    self.limits
  }

  pub fn store(&self) -> &Arc<dyn CatalogStore> {
    &self.store
  }

  pub fn page_request(&self, page: Option<i64>, limit: Option<i64>) -> PageRequest {
    PageRequest::with_limits(page, limit, self.limits)
  }

  pub async fn ping(&self) -> CatalogResult<()> {
    self.store.ping().await
  }

  // --- Categories ---

  pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
    self.store.list_categories().await
  }

  pub async fn get_category(&self, category_id: i64) -> CatalogResult<Category> {
    match self.store.find_category(category_id).await? {
      Some(category) => Ok(category),
      None => {
        warn!(category_id, "Category not found.");
        Err(CatalogError::not_found("Category not found"))
      }
    }
  }

  // --- Listing ---

  /// The shop listing: a page of products for exactly what `query` says.
  ///
  /// A category that cannot be an id selects nothing; a numeric category that
  /// does not exist is `NotFound`.
  #[instrument(name = "catalog::list_products", skip(self), err(Display))]
  pub async fn list_products(&self, query: &ShopQuery) -> CatalogResult<ProductPage> {
    let page = query.page_request(self.limits);

    let Some(filter) = query.filter() else {
      debug!(category = ?query.category, "Unusable category in listing query, returning an empty page.");
      return Ok(ProductPage::empty(&page));
    };

    if let Some(category_id) = filter.category_id {
      self.get_category(category_id).await?;
    }

    let products = self.store.list_products(&filter, &page).await?;
    info!(results = products.len(), page = page.page(), limit = page.limit(), "Listed products.");
    Ok(ProductPage::new(products, &page))
  }

  #[instrument(name = "catalog::products_by_category", skip(self), err(Display))]
  pub async fn products_by_category(
    &self,
    category_id: i64,
    page: PageRequest,
  ) -> CatalogResult<(Category, ProductPage)> {
    let category = self.get_category(category_id).await?;
    let products = self
      .store
      .list_products(&ProductFilter::in_category(category_id), &page)
      .await?;
    Ok((category, ProductPage::new(products, &page)))
  }

  #[instrument(name = "catalog::search_products", skip(self), err(Display))]
  pub async fn search_products(&self, term: &str, page: PageRequest) -> CatalogResult<ProductPage> {
    let filter = ProductFilter::matching(term);
    if filter.search.is_none() {
      return Err(CatalogError::validation("Search query is required"));
    }
    let products = self.store.list_products(&filter, &page).await?;
    Ok(ProductPage::new(products, &page))
  }

  pub async fn get_product(&self, product_id: i64) -> CatalogResult<Product> {
    match self.store.find_product(product_id).await? {
      Some(product) => Ok(product),
      None => {
        warn!(product_id, "Product not found.");
        Err(CatalogError::not_found("Product not found"))
      }
    }
  }

  pub async fn get_product_by_slug(&self, slug: &str) -> CatalogResult<Product> {
    self
      .store
      .find_product_by_slug(slug)
      .await?
      .ok_or_else(|| CatalogError::not_found("Product not found"))
  }

  /// Up to `limit` other products from the same category, newest first.
  #[instrument(name = "catalog::related_products", skip(self), err(Display))]
  pub async fn related_products(&self, product_id: i64, limit: Option<i64>) -> CatalogResult<Vec<Product>> {
    let product = self.get_product(product_id).await?;
    let Some(category_id) = product.category_id else {
      return Err(CatalogError::validation("Product has no category"));
    };

    let limit = limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_RELATED_LIMIT);
    let pool = PageRequest::with_limits(Some(1), Some(RELATED_POOL_SIZE), PageLimits::new(RELATED_POOL_SIZE, RELATED_POOL_SIZE));
    let related = self
      .store
      .list_products(&ProductFilter::in_category(category_id), &pool)
      .await?
      .into_iter()
      .filter(|p| p.product_id != product_id)
      .take(limit as usize)
      .collect::<Vec<_>>();

    debug!(category_id, found = related.len(), "Collected related products.");
    Ok(related)
  }
}
