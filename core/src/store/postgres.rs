// core/src/store/postgres.rs

//! PostgreSQL implementation of `CatalogStore` on a shared `sqlx::PgPool`.
//!
//! Every value reaches the database as a bound parameter, including LIMIT and
//! OFFSET. Optional filters use `$n IS NULL OR ...` so each query has one
//! static text.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::CatalogStore;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, NewProduct, NewReview, Product, Review};
use crate::pagination::PageRequest;
use crate::patch::ProductPatch;
use crate::shop_query::ProductFilter;

const SELECT_PRODUCT: &str = "SELECT p.*, c.name AS category_name \
   FROM products p \
   LEFT JOIN categories c ON p.category_id = c.category_id";

const LIST_PRODUCTS: &str = "SELECT p.*, c.name AS category_name \
   FROM products p \
   LEFT JOIN categories c ON p.category_id = c.category_id \
   WHERE ($1::BIGINT IS NULL OR p.category_id = $1) \
     AND ($2::BIGINT IS NULL OR p.price_cents >= $2) \
     AND ($3::BIGINT IS NULL OR p.price_cents <= $3) \
     AND ($4::TEXT IS NULL OR p.name ILIKE $4 OR p.description ILIKE $4) \
   ORDER BY p.product_id DESC \
   LIMIT $5 OFFSET $6";

const INSERT_PRODUCT: &str = r#"
  WITH inserted AS (
    INSERT INTO products (
      name, slug, description, short_description, ingredients, shelf_life,
      storage_instructions, usage_instructions, price_cents, regular_price_cents, cost_price_cents,
      quantity, min_stock_alert, unit_of_measurement, package_size, category_id,
      subcategory_id, brand, sku, barcode, image_url, gallery_images, video_url,
      meta_title, meta_description, free_shipping, shipping_time, warranty_period,
      weight_for_shipping, dimensions, delivery_time_estimate, is_returnable,
      is_cod_available, eco_friendly, eco_friendly_details, tags, is_featured,
      is_best_seller, is_new_arrival, status, created_by
    )
    VALUES (
      $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
      $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32, $33, $34, $35, $36, $37, $38,
      $39, $40, $41
    )
    RETURNING *
  )
  SELECT i.*, c.name AS category_name
  FROM inserted i
  LEFT JOIN categories c ON i.category_id = c.category_id
"#;

const UPDATE_PRODUCT: &str = r#"
  WITH updated AS (
    UPDATE products SET
      name = COALESCE($2, name),
      slug = COALESCE($3, slug),
      description = COALESCE($4, description),
      short_description = COALESCE($5, short_description),
      ingredients = COALESCE($6, ingredients),
      shelf_life = COALESCE($7, shelf_life),
      storage_instructions = COALESCE($8, storage_instructions),
      usage_instructions = COALESCE($9, usage_instructions),
      price_cents = COALESCE($10, price_cents),
      regular_price_cents = COALESCE($11, regular_price_cents),
      cost_price_cents = COALESCE($12, cost_price_cents),
      quantity = COALESCE($13, quantity),
      min_stock_alert = COALESCE($14, min_stock_alert),
      unit_of_measurement = COALESCE($15, unit_of_measurement),
      package_size = COALESCE($16, package_size),
      category_id = COALESCE($17, category_id),
      subcategory_id = COALESCE($18, subcategory_id),
      brand = COALESCE($19, brand),
      sku = COALESCE($20, sku),
      barcode = COALESCE($21, barcode),
      image_url = COALESCE($22, image_url),
      gallery_images = COALESCE($23, gallery_images),
      video_url = COALESCE($24, video_url),
      meta_title = COALESCE($25, meta_title),
      meta_description = COALESCE($26, meta_description),
      free_shipping = COALESCE($27, free_shipping),
      shipping_time = COALESCE($28, shipping_time),
      warranty_period = COALESCE($29, warranty_period),
      weight_for_shipping = COALESCE($30, weight_for_shipping),
      dimensions = COALESCE($31, dimensions),
      delivery_time_estimate = COALESCE($32, delivery_time_estimate),
      is_returnable = COALESCE($33, is_returnable),
      is_cod_available = COALESCE($34, is_cod_available),
      eco_friendly = COALESCE($35, eco_friendly),
      eco_friendly_details = COALESCE($36, eco_friendly_details),
      tags = COALESCE($37, tags),
      is_featured = COALESCE($38, is_featured),
      is_best_seller = COALESCE($39, is_best_seller),
      is_new_arrival = COALESCE($40, is_new_arrival),
      status = COALESCE($41, status),
      updated_at = NOW()
    WHERE product_id = $1
    RETURNING *
  )
  SELECT u.*, c.name AS category_name
  FROM updated u
  LEFT JOIN categories c ON u.category_id = c.category_id
"#;

/// Escapes LIKE metacharacters and wraps the term for substring matching.
fn contains_pattern(term: &str) -> String {
  let mut escaped = String::with_capacity(term.len() + 2);
  escaped.push('%');
  for ch in term.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped.push('%');
  escaped
}

/// Turns unique-index violations on products into catalog conflicts.
fn map_write_error(err: sqlx::Error) -> CatalogError {
  if let sqlx::Error::Database(db_err) = &err {
    if db_err.is_unique_violation() {
      return match db_err.constraint() {
        Some("products_slug_key") => CatalogError::Conflict("Slug already exists".to_string()),
        _ => CatalogError::Conflict("SKU already exists".to_string()),
      };
    }
  }
  CatalogError::Database(err)
}

#[derive(Debug, Clone)]
pub struct PgCatalogStore {
  pool: PgPool,
}

impl PgCatalogStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }

  async fn find_product_where(&self, predicate: &str, value: &str) -> CatalogResult<Option<Product>> {
    let sql = format!("{SELECT_PRODUCT} WHERE {predicate} = $1");
    let product = sqlx::query_as::<_, Product>(&sql)
      .bind(value)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
  async fn ping(&self) -> CatalogResult<()> {
    sqlx::query("SELECT 1").execute(&self.pool).await?;
    Ok(())
  }

  #[instrument(name = "pg_store::list_products", skip(self), err(Display))]
  async fn list_products(&self, filter: &ProductFilter, page: &PageRequest) -> CatalogResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(LIST_PRODUCTS)
      .bind(filter.category_id)
      .bind(filter.min_price_cents)
      .bind(filter.max_price_cents)
      .bind(filter.search_term().map(contains_pattern))
      .bind(page.limit())
      .bind(page.offset())
      .fetch_all(&self.pool)
      .await?;
    debug!(rows = products.len(), "Fetched product page.");
    Ok(products)
  }

  #[instrument(name = "pg_store::find_product", skip(self), err(Display))]
  async fn find_product(&self, product_id: i64) -> CatalogResult<Option<Product>> {
    let sql = format!("{SELECT_PRODUCT} WHERE p.product_id = $1");
    let product = sqlx::query_as::<_, Product>(&sql)
      .bind(product_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }

  async fn find_product_by_sku(&self, sku: &str) -> CatalogResult<Option<Product>> {
    self.find_product_where("p.sku", sku).await
  }

  async fn find_product_by_slug(&self, slug: &str) -> CatalogResult<Option<Product>> {
    self.find_product_where("p.slug", slug).await
  }

  #[instrument(name = "pg_store::insert_product", skip(self, product), fields(sku = %product.sku), err(Display))]
  async fn insert_product(&self, product: &NewProduct) -> CatalogResult<Product> {
    sqlx::query_as::<_, Product>(INSERT_PRODUCT)
      .bind(&product.name)
      .bind(&product.slug)
      .bind(&product.description)
      .bind(&product.short_description)
      .bind(&product.ingredients)
      .bind(&product.shelf_life)
      .bind(&product.storage_instructions)
      .bind(&product.usage_instructions)
      .bind(product.price_cents)
      .bind(product.regular_price_cents)
      .bind(product.cost_price_cents)
      .bind(product.quantity)
      .bind(product.min_stock_alert)
      .bind(&product.unit_of_measurement)
      .bind(&product.package_size)
      .bind(product.category_id)
      .bind(product.subcategory_id)
      .bind(&product.brand)
      .bind(&product.sku)
      .bind(&product.barcode)
      .bind(&product.image_url)
      .bind(product.gallery_images.as_ref().map(Json))
      .bind(&product.video_url)
      .bind(&product.meta_title)
      .bind(&product.meta_description)
      .bind(product.free_shipping)
      .bind(&product.shipping_time)
      .bind(product.warranty_period)
      .bind(product.weight_for_shipping)
      .bind(&product.dimensions)
      .bind(&product.delivery_time_estimate)
      .bind(product.is_returnable)
      .bind(product.is_cod_available)
      .bind(product.eco_friendly)
      .bind(&product.eco_friendly_details)
      .bind(&product.tags)
      .bind(product.is_featured)
      .bind(product.is_best_seller)
      .bind(product.is_new_arrival)
      .bind(product.status)
      .bind(product.created_by)
      .fetch_one(&self.pool)
      .await
      .map_err(map_write_error)
  }

  #[instrument(name = "pg_store::update_product", skip(self, patch), err(Display))]
  async fn update_product(&self, product_id: i64, patch: &ProductPatch) -> CatalogResult<Option<Product>> {
    sqlx::query_as::<_, Product>(UPDATE_PRODUCT)
      .bind(product_id)
      .bind(&patch.name)
      .bind(&patch.slug)
      .bind(&patch.description)
      .bind(&patch.short_description)
      .bind(&patch.ingredients)
      .bind(&patch.shelf_life)
      .bind(&patch.storage_instructions)
      .bind(&patch.usage_instructions)
      .bind(patch.price_cents)
      .bind(patch.regular_price_cents)
      .bind(patch.cost_price_cents)
      .bind(patch.quantity)
      .bind(patch.min_stock_alert)
      .bind(&patch.unit_of_measurement)
      .bind(&patch.package_size)
      .bind(patch.category_id)
      .bind(patch.subcategory_id)
      .bind(&patch.brand)
      .bind(&patch.sku)
      .bind(&patch.barcode)
      .bind(&patch.image_url)
      .bind(patch.gallery_images.as_ref().map(Json))
      .bind(&patch.video_url)
      .bind(&patch.meta_title)
      .bind(&patch.meta_description)
      .bind(patch.free_shipping)
      .bind(&patch.shipping_time)
      .bind(patch.warranty_period)
      .bind(patch.weight_for_shipping)
      .bind(&patch.dimensions)
      .bind(&patch.delivery_time_estimate)
      .bind(patch.is_returnable)
      .bind(patch.is_cod_available)
      .bind(patch.eco_friendly)
      .bind(&patch.eco_friendly_details)
      .bind(&patch.tags)
      .bind(patch.is_featured)
      .bind(patch.is_best_seller)
      .bind(patch.is_new_arrival)
      .bind(patch.status)
      .fetch_optional(&self.pool)
      .await
      .map_err(map_write_error)
  }

  #[instrument(name = "pg_store::delete_product", skip(self), err(Display))]
  async fn delete_product(&self, product_id: i64) -> CatalogResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn count_cart_references(&self, product_id: i64) -> CatalogResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE product_id = $1")
      .bind(product_id)
      .fetch_one(&self.pool)
      .await?;
    Ok(count)
  }

  async fn count_order_references(&self, product_id: i64) -> CatalogResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE product_id = $1")
      .bind(product_id)
      .fetch_one(&self.pool)
      .await?;
    Ok(count)
  }

  async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
    let categories =
      sqlx::query_as::<_, Category>("SELECT category_id, name, description FROM categories ORDER BY name ASC")
        .fetch_all(&self.pool)
        .await?;
    Ok(categories)
  }

  async fn find_category(&self, category_id: i64) -> CatalogResult<Option<Category>> {
    let category =
      sqlx::query_as::<_, Category>("SELECT category_id, name, description FROM categories WHERE category_id = $1")
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;
    Ok(category)
  }

  #[instrument(name = "pg_store::insert_category", skip(self, description), err(Display))]
  async fn insert_category(&self, name: &str, description: Option<&str>) -> CatalogResult<Category> {
    let category = sqlx::query_as::<_, Category>(
      "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING category_id, name, description",
    )
    .bind(name)
    .bind(description)
    .fetch_one(&self.pool)
    .await?;
    Ok(category)
  }

  async fn list_reviews(&self, product_id: i64) -> CatalogResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
      "SELECT * FROM reviews WHERE product_id = $1 ORDER BY created_at DESC, review_id DESC",
    )
    .bind(product_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(reviews)
  }

  #[instrument(name = "pg_store::insert_review", skip(self, review), fields(product_id = review.product_id), err(Display))]
  async fn insert_review(&self, review: &NewReview) -> CatalogResult<Review> {
    let created = sqlx::query_as::<_, Review>(
      "INSERT INTO reviews (product_id, user_id, rating, title, content) \
       VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(review.product_id)
    .bind(review.user_id)
    .bind(review.rating)
    .bind(&review.title)
    .bind(&review.content)
    .fetch_one(&self.pool)
    .await?;
    Ok(created)
  }
}
