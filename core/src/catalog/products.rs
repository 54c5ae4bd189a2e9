// core/src/catalog/products.rs

//! Product create, update and delete.

use chrono::Utc;
use tracing::{info, instrument, warn};

use super::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{NewProduct, NewProductRequest, Product};
use crate::money::resolve_cents;
use crate::patch::ProductPatch;

pub const DEFAULT_BRAND: &str = "GreenMagic";
pub const DEFAULT_SHIPPING_TIME: &str = "3-5 business days";
pub const DEFAULT_ECO_DETAILS: &str = "Eco-friendly packaging";
pub const DEFAULT_MIN_STOCK_ALERT: i32 = 5;
pub const SHORT_DESCRIPTION_CHARS: usize = 150;
const SKU_PREFIX: &str = "GM";

/// Lowercase ASCII alphanumerics with every other run collapsed into one `-`.
pub fn slugify(name: &str) -> String {
  let mut slug = String::with_capacity(name.len());
  for ch in name.chars() {
    if ch.is_ascii_alphanumeric() {
      slug.push(ch.to_ascii_lowercase());
    } else if !slug.ends_with('-') {
      slug.push('-');
    }
  }
  slug.trim_matches('-').to_string()
}

/// First `SHORT_DESCRIPTION_CHARS` characters, never splitting a character.
pub fn short_description_of(description: &str) -> String {
  description.chars().take(SHORT_DESCRIPTION_CHARS).collect()
}

fn generated_sku() -> String {
  format!("{SKU_PREFIX}-{}", Utc::now().timestamp_millis())
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

impl Catalog {
  /// First free slug among `base`, `base-2`, `base-3`, ...
  async fn unique_slug(&self, base: &str) -> CatalogResult<String> {
    let base = if base.is_empty() { "product" } else { base };
    let mut candidate = base.to_string();
    let mut suffix = 1;
    while self.store.find_product_by_slug(&candidate).await?.is_some() {
      suffix += 1;
      candidate = format!("{base}-{suffix}");
    }
    Ok(candidate)
  }

  /// `GM-<millis>`, suffixed with `-2`, `-3`, ... when products are created within the same millisecond.
  async fn unique_generated_sku(&self) -> CatalogResult<String> {
    let base = generated_sku();
    let mut candidate = base.clone();
    let mut suffix = 1;
    while self.store.find_product_by_sku(&candidate).await?.is_some() {
      suffix += 1;
      candidate = format!("{base}-{suffix}");
    }
    Ok(candidate)
  }

  async fn ensure_sku_free(&self, sku: &str, owner: Option<i64>) -> CatalogResult<()> {
    if let Some(existing) = self.store.find_product_by_sku(sku).await? {
      if Some(existing.product_id) != owner {
        warn!(sku, existing_product_id = existing.product_id, "SKU already in use.");
        return Err(CatalogError::Conflict("SKU already exists".to_string()));
      }
    }
    Ok(())
  }

  /// Creates a product. `name`, a positive price (in cents or decimal units) and `category_id` are required.
  #[instrument(name = "catalog::create_product", skip(self, request), fields(name = ?request.name), err(Display))]
  pub async fn create_product(&self, request: NewProductRequest, created_by: Option<i64>) -> CatalogResult<Product> {
    let name = non_blank(request.name.clone());
    let price_cents = resolve_cents("Price", request.price_cents, request.price)?;
    let regular_price_cents = resolve_cents("Regular price", request.regular_price_cents, request.regular_price)?;
    let cost_price_cents = resolve_cents("Cost price", request.cost_price_cents, request.cost_price)?;
    let (Some(name), Some(price_cents), Some(category_id)) =
      (name, price_cents.filter(|p| *p != 0), request.category_id)
    else {
      return Err(CatalogError::validation("Name, price, and category ID are required"));
    };
    if price_cents < 0 {
      return Err(CatalogError::validation("Price must be greater than zero"));
    }
    if regular_price_cents.is_some_and(|p| p < 0) || cost_price_cents.is_some_and(|p| p < 0) {
      return Err(CatalogError::validation("Prices cannot be negative"));
    }
    if request.quantity.is_some_and(|q| q < 0) {
      return Err(CatalogError::validation("Quantity cannot be negative"));
    }

    self.get_category(category_id).await?;

    let sku = match non_blank(request.sku) {
      Some(sku) => {
        self.ensure_sku_free(&sku, None).await?;
        sku
      }
      None => self.unique_generated_sku().await?,
    };

    let slug_base = match non_blank(request.slug) {
      Some(slug) => slugify(&slug),
      None => slugify(&name),
    };
    let slug = self.unique_slug(&slug_base).await?;

    let description = non_blank(request.description);
    let short_description = non_blank(request.short_description)
      .or_else(|| description.as_deref().map(short_description_of));

    let new_product = NewProduct {
      meta_title: non_blank(request.meta_title).or_else(|| Some(name.clone())),
      meta_description: non_blank(request.meta_description).or_else(|| short_description.clone()),
      name,
      slug,
      description,
      short_description,
      ingredients: request.ingredients,
      shelf_life: request.shelf_life,
      storage_instructions: request.storage_instructions,
      usage_instructions: request.usage_instructions,
      price_cents,
      regular_price_cents: regular_price_cents.filter(|p| *p > 0).unwrap_or(price_cents),
      cost_price_cents,
      quantity: request.quantity.unwrap_or(0),
      min_stock_alert: request.min_stock_alert.unwrap_or(DEFAULT_MIN_STOCK_ALERT),
      unit_of_measurement: request.unit_of_measurement,
      package_size: request.package_size,
      category_id,
      subcategory_id: request.subcategory_id,
      brand: non_blank(request.brand).unwrap_or_else(|| DEFAULT_BRAND.to_string()),
      sku,
      barcode: request.barcode,
      image_url: request.image_url,
      gallery_images: request.gallery_images,
      video_url: request.video_url,
      free_shipping: request.free_shipping.unwrap_or(false),
      shipping_time: non_blank(request.shipping_time).unwrap_or_else(|| DEFAULT_SHIPPING_TIME.to_string()),
      warranty_period: request.warranty_period,
      weight_for_shipping: request.weight_for_shipping,
      dimensions: request.dimensions,
      delivery_time_estimate: non_blank(request.delivery_time_estimate)
        .unwrap_or_else(|| DEFAULT_SHIPPING_TIME.to_string()),
      is_returnable: request.is_returnable.unwrap_or(true),
      is_cod_available: request.is_cod_available.unwrap_or(true),
      eco_friendly: request.eco_friendly.unwrap_or(true),
      eco_friendly_details: non_blank(request.eco_friendly_details)
        .unwrap_or_else(|| DEFAULT_ECO_DETAILS.to_string()),
      tags: request.tags.unwrap_or_default(),
      is_featured: request.is_featured.unwrap_or(false),
      is_best_seller: request.is_best_seller.unwrap_or(false),
      is_new_arrival: request.is_new_arrival.unwrap_or(false),
      status: request.status.unwrap_or_default(),
      created_by,
    };

    let product = self.store.insert_product(&new_product).await?;
    info!(product_id = product.product_id, sku = %product.sku, "Product created.");
    Ok(product)
  }

  /// Normalises and validates a patch, then applies it. Empty patches are rejected before any lookup.
  #[instrument(name = "catalog::update_product", skip(self, patch), err(Display))]
  pub async fn update_product(&self, product_id: i64, patch: ProductPatch) -> CatalogResult<Product> {
    let patch = patch.normalized()?;
    patch.validate()?;

    let current = self.get_product(product_id).await?;

    if let Some(category_id) = patch.category_id {
      self.get_category(category_id).await?;
    }
    if let Some(sku) = patch.changed_sku(&current.sku) {
      self.ensure_sku_free(sku, Some(product_id)).await?;
    }

    let updated = self
      .store
      .update_product(product_id, &patch)
      .await?
      .ok_or_else(|| CatalogError::not_found("Product not found"))?;
    info!(product_id, "Product updated.");
    Ok(updated)
  }

  /// Deletes a product no cart or order line refers to.
  ///
  /// The reference checks and the delete are separate statements; a cart line
  /// added in between is not seen.
  #[instrument(name = "catalog::delete_product", skip(self), err(Display))]
  pub async fn delete_product(&self, product_id: i64) -> CatalogResult<()> {
    if self.store.count_cart_references(product_id).await? > 0 {
      return Err(CatalogError::DeleteBlocked(
        "Cannot delete product that is in customers carts".to_string(),
      ));
    }
    if self.store.count_order_references(product_id).await? > 0 {
      return Err(CatalogError::DeleteBlocked(
        "Cannot delete product that has been ordered".to_string(),
      ));
    }

    if !self.store.delete_product(product_id).await? {
      return Err(CatalogError::not_found("Product not found"));
    }
    info!(product_id, "Product deleted.");
    Ok(())
  }
}
