// core/src/store/memory.rs

//! In-process `CatalogStore` used by tests, benchmarks and local runs without a database.
//!
//! State lives behind one `parking_lot::RwLock`. Guards are blocking and are
//! always released before the async method returns; nothing awaits while holding one.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use sqlx::types::Json;

use super::CatalogStore;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, NewProduct, NewReview, Product, Review};
use crate::pagination::PageRequest;
use crate::patch::ProductPatch;
use crate::shop_query::ProductFilter;

#[derive(Debug, Default)]
struct Tables {
  products: BTreeMap<i64, Product>,
  categories: BTreeMap<i64, Category>,
  reviews: Vec<Review>,
  cart_refs: HashMap<i64, i64>,
  order_refs: HashMap<i64, i64>,
  next_product_id: i64,
  next_category_id: i64,
  next_review_id: i64,
}

impl Tables {
  fn category_name(&self, category_id: Option<i64>) -> Option<String> {
    category_id
      .and_then(|id| self.categories.get(&id))
      .map(|c| c.name.clone())
  }

  fn with_category_name(&self, product: &Product) -> Product {
    let mut product = product.clone();
    product.category_name = self.category_name(product.category_id);
    product
  }

  fn unique_taken(&self, skip_id: Option<i64>, sku: Option<&str>, slug: Option<&str>) -> Option<CatalogError> {
    for p in self.products.values().filter(|p| Some(p.product_id) != skip_id) {
      if sku == Some(p.sku.as_str()) {
        return Some(CatalogError::Conflict("SKU already exists".to_string()));
      }
      if slug == Some(p.slug.as_str()) {
        return Some(CatalogError::Conflict("Slug already exists".to_string()));
      }
    }
    None
  }
}

#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
  tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records a cart line referencing `product_id`, as a shopper's saved cart would.
  pub fn add_cart_reference(&self, product_id: i64) {
    *self.tables.write().cart_refs.entry(product_id).or_insert(0) += 1;
  }

  /// Records an order line referencing `product_id`.
  pub fn add_order_reference(&self, product_id: i64) {
    *self.tables.write().order_refs.entry(product_id).or_insert(0) += 1;
  }

  pub fn product_count(&self) -> usize {
    self.tables.read().products.len()
  }
}

fn apply_patch(product: &mut Product, patch: &ProductPatch) {
  macro_rules! set {
    ($($field:ident),* $(,)?) => {
      $(if let Some(value) = &patch.$field { product.$field = value.clone(); })*
    };
  }
  macro_rules! set_opt {
    ($($field:ident),* $(,)?) => {
      $(if let Some(value) = &patch.$field { product.$field = Some(value.clone()); })*
    };
  }

  set!(
    name,
    slug,
    price_cents,
    regular_price_cents,
    quantity,
    min_stock_alert,
    brand,
    sku,
    free_shipping,
    shipping_time,
    delivery_time_estimate,
    is_returnable,
    is_cod_available,
    eco_friendly,
    eco_friendly_details,
    tags,
    is_featured,
    is_best_seller,
    is_new_arrival,
    status,
  );
  set_opt!(
    description,
    short_description,
    ingredients,
    shelf_life,
    storage_instructions,
    usage_instructions,
    cost_price_cents,
    unit_of_measurement,
    package_size,
    category_id,
    subcategory_id,
    barcode,
    image_url,
    video_url,
    meta_title,
    meta_description,
    warranty_period,
    weight_for_shipping,
    dimensions,
  );
  if let Some(images) = &patch.gallery_images {
    product.gallery_images = Some(Json(images.clone()));
  }
  product.updated_at = Utc::now();
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
  async fn ping(&self) -> CatalogResult<()> {
    Ok(())
  }

  async fn list_products(&self, filter: &ProductFilter, page: &PageRequest) -> CatalogResult<Vec<Product>> {
    let tables = self.tables.read();
    let products = tables
      .products
      .values()
      .rev()
      .filter(|p| filter.accepts(p.category_id, p.price_cents, &p.name, p.description.as_deref()))
      .skip(page.offset() as usize)
      .take(page.limit() as usize)
      .map(|p| tables.with_category_name(p))
      .collect();
    Ok(products)
  }

  async fn find_product(&self, product_id: i64) -> CatalogResult<Option<Product>> {
    let tables = self.tables.read();
    Ok(tables.products.get(&product_id).map(|p| tables.with_category_name(p)))
  }

  async fn find_product_by_sku(&self, sku: &str) -> CatalogResult<Option<Product>> {
    let tables = self.tables.read();
    Ok(
      tables
        .products
        .values()
        .find(|p| p.sku == sku)
        .map(|p| tables.with_category_name(p)),
    )
  }

  async fn find_product_by_slug(&self, slug: &str) -> CatalogResult<Option<Product>> {
    let tables = self.tables.read();
    Ok(
      tables
        .products
        .values()
        .find(|p| p.slug == slug)
        .map(|p| tables.with_category_name(p)),
    )
  }

  async fn insert_product(&self, new: &NewProduct) -> CatalogResult<Product> {
    let mut tables = self.tables.write();
    if let Some(conflict) = tables.unique_taken(None, Some(&new.sku), Some(&new.slug)) {
      return Err(conflict);
    }

    tables.next_product_id += 1;
    let now = Utc::now();
    let product = Product {
      product_id: tables.next_product_id,
      name: new.name.clone(),
      slug: new.slug.clone(),
      description: new.description.clone(),
      short_description: new.short_description.clone(),
      ingredients: new.ingredients.clone(),
      shelf_life: new.shelf_life.clone(),
      storage_instructions: new.storage_instructions.clone(),
      usage_instructions: new.usage_instructions.clone(),
      price_cents: new.price_cents,
      regular_price_cents: new.regular_price_cents,
      cost_price_cents: new.cost_price_cents,
      quantity: new.quantity,
      min_stock_alert: new.min_stock_alert,
      unit_of_measurement: new.unit_of_measurement.clone(),
      package_size: new.package_size.clone(),
      category_id: Some(new.category_id),
      category_name: None,
      subcategory_id: new.subcategory_id,
      brand: new.brand.clone(),
      sku: new.sku.clone(),
      barcode: new.barcode.clone(),
      image_url: new.image_url.clone(),
      gallery_images: new.gallery_images.clone().map(Json),
      video_url: new.video_url.clone(),
      meta_title: new.meta_title.clone(),
      meta_description: new.meta_description.clone(),
      free_shipping: new.free_shipping,
      shipping_time: new.shipping_time.clone(),
      warranty_period: new.warranty_period,
      weight_for_shipping: new.weight_for_shipping,
      dimensions: new.dimensions.clone(),
      delivery_time_estimate: new.delivery_time_estimate.clone(),
      is_returnable: new.is_returnable,
      is_cod_available: new.is_cod_available,
      eco_friendly: new.eco_friendly,
      eco_friendly_details: new.eco_friendly_details.clone(),
      tags: new.tags.clone(),
      is_featured: new.is_featured,
      is_best_seller: new.is_best_seller,
      is_new_arrival: new.is_new_arrival,
      status: new.status,
      created_by: new.created_by,
      created_at: now,
      updated_at: now,
    };
    tables.products.insert(product.product_id, product.clone());
    Ok(tables.with_category_name(&product))
  }

  async fn update_product(&self, product_id: i64, patch: &ProductPatch) -> CatalogResult<Option<Product>> {
    let mut tables = self.tables.write();
    if !tables.products.contains_key(&product_id) {
      return Ok(None);
    }
    if let Some(conflict) = tables.unique_taken(Some(product_id), patch.sku.as_deref(), patch.slug.as_deref()) {
      return Err(conflict);
    }

    let updated = match tables.products.get_mut(&product_id) {
      Some(product) => {
        apply_patch(product, patch);
        product.clone()
      }
      None => return Ok(None),
    };
    Ok(Some(tables.with_category_name(&updated)))
  }

  async fn delete_product(&self, product_id: i64) -> CatalogResult<bool> {
    let mut tables = self.tables.write();
    let removed = tables.products.remove(&product_id).is_some();
    if removed {
      tables.reviews.retain(|r| r.product_id != product_id);
    }
    Ok(removed)
  }

  async fn count_cart_references(&self, product_id: i64) -> CatalogResult<i64> {
    Ok(self.tables.read().cart_refs.get(&product_id).copied().unwrap_or(0))
  }

  async fn count_order_references(&self, product_id: i64) -> CatalogResult<i64> {
    Ok(self.tables.read().order_refs.get(&product_id).copied().unwrap_or(0))
  }

  async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
    let mut categories: Vec<Category> = self.tables.read().categories.values().cloned().collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(categories)
  }

  async fn find_category(&self, category_id: i64) -> CatalogResult<Option<Category>> {
    Ok(self.tables.read().categories.get(&category_id).cloned())
  }

  async fn insert_category(&self, name: &str, description: Option<&str>) -> CatalogResult<Category> {
    let mut tables = self.tables.write();
    tables.next_category_id += 1;
    let category = Category {
      category_id: tables.next_category_id,
      name: name.to_string(),
      description: description.map(str::to_string),
    };
    tables.categories.insert(category.category_id, category.clone());
    Ok(category)
  }

  async fn list_reviews(&self, product_id: i64) -> CatalogResult<Vec<Review>> {
    let tables = self.tables.read();
    let mut reviews: Vec<Review> = tables
      .reviews
      .iter()
      .filter(|r| r.product_id == product_id)
      .cloned()
      .collect();
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.review_id.cmp(&a.review_id)));
    Ok(reviews)
  }

  async fn insert_review(&self, review: &NewReview) -> CatalogResult<Review> {
    let mut tables = self.tables.write();
    tables.next_review_id += 1;
    let now = Utc::now();
    let created = Review {
      review_id: tables.next_review_id,
      product_id: review.product_id,
      user_id: review.user_id,
      rating: review.rating,
      title: review.title.clone(),
      content: review.content.clone(),
      created_at: now,
      updated_at: now,
    };
    tables.reviews.push(created.clone());
    Ok(created)
  }
}
