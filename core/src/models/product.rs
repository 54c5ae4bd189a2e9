// core/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, Type as SqlxType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "product_status_enum", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
  #[default]
  Active,
  Inactive,
  Draft,
}

/// A product row joined with its category name.
///
/// Money is held in integer cents. `category_id` is nullable because deleting a
/// category detaches its products instead of removing them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub product_id: i64,
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub short_description: Option<String>,
  pub ingredients: Option<String>,
  pub shelf_life: Option<String>,
  pub storage_instructions: Option<String>,
  pub usage_instructions: Option<String>,

  pub price_cents: i64,
  pub regular_price_cents: i64,
  pub cost_price_cents: Option<i64>,

  pub quantity: i32,
  pub min_stock_alert: i32,
  pub unit_of_measurement: Option<String>,
  pub package_size: Option<String>,

  pub category_id: Option<i64>,
  #[sqlx(default)]
  pub category_name: Option<String>,
  pub subcategory_id: Option<i64>,
  pub brand: String,
  pub sku: String,
  pub barcode: Option<String>,

  pub image_url: Option<String>,
  pub gallery_images: Option<Json<Vec<String>>>,
  pub video_url: Option<String>,
  pub meta_title: Option<String>,
  pub meta_description: Option<String>,

  pub free_shipping: bool,
  pub shipping_time: String,
  pub warranty_period: Option<i32>,
  pub weight_for_shipping: Option<f64>,
  pub dimensions: Option<String>,
  pub delivery_time_estimate: String,
  pub is_returnable: bool,
  pub is_cod_available: bool,
  pub eco_friendly: bool,
  pub eco_friendly_details: String,
  pub tags: String,
  pub is_featured: bool,
  pub is_best_seller: bool,
  pub is_new_arrival: bool,
  pub status: ProductStatus,

  pub created_by: Option<i64>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Body of `POST /products`. Everything is optional at the wire level so the
/// catalog can report missing required fields itself.
///
/// Amounts may be sent in cents (`price_cents`) or in decimal units (`price`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProductRequest {
  pub name: Option<String>,
  pub slug: Option<String>,
  pub description: Option<String>,
  pub short_description: Option<String>,
  pub ingredients: Option<String>,
  pub shelf_life: Option<String>,
  pub storage_instructions: Option<String>,
  pub usage_instructions: Option<String>,
  #[serde(alias = "priceCents")]
  pub price_cents: Option<i64>,
  #[serde(alias = "regularPriceCents")]
  pub regular_price_cents: Option<i64>,
  #[serde(alias = "costPriceCents")]
  pub cost_price_cents: Option<i64>,
  /// Decimal currency units, as admin forms send them. Ignored when `price_cents` is given.
  #[serde(default, deserialize_with = "crate::wire::decimal")]
  pub price: Option<f64>,
  #[serde(default, alias = "regularPrice", deserialize_with = "crate::wire::decimal")]
  pub regular_price: Option<f64>,
  #[serde(default, alias = "costPrice", deserialize_with = "crate::wire::decimal")]
  pub cost_price: Option<f64>,
  pub quantity: Option<i32>,
  pub min_stock_alert: Option<i32>,
  pub unit_of_measurement: Option<String>,
  pub package_size: Option<String>,
  #[serde(alias = "categoryId")]
  pub category_id: Option<i64>,
  pub subcategory_id: Option<i64>,
  pub brand: Option<String>,
  pub sku: Option<String>,
  pub barcode: Option<String>,
  #[serde(alias = "imageUrl")]
  pub image_url: Option<String>,
  pub gallery_images: Option<Vec<String>>,
  pub video_url: Option<String>,
  pub meta_title: Option<String>,
  pub meta_description: Option<String>,
  pub free_shipping: Option<bool>,
  pub shipping_time: Option<String>,
  pub warranty_period: Option<i32>,
  pub weight_for_shipping: Option<f64>,
  pub dimensions: Option<String>,
  pub delivery_time_estimate: Option<String>,
  pub is_returnable: Option<bool>,
  pub is_cod_available: Option<bool>,
  pub eco_friendly: Option<bool>,
  pub eco_friendly_details: Option<String>,
  pub tags: Option<String>,
  pub is_featured: Option<bool>,
  pub is_best_seller: Option<bool>,
  pub is_new_arrival: Option<bool>,
  pub status: Option<ProductStatus>,
}

/// A fully resolved product ready for insertion: defaults applied, slug and SKU derived.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
  pub name: String,
  pub slug: String,
  pub description: Option<String>,
  pub short_description: Option<String>,
  pub ingredients: Option<String>,
  pub shelf_life: Option<String>,
  pub storage_instructions: Option<String>,
  pub usage_instructions: Option<String>,
  pub price_cents: i64,
  pub regular_price_cents: i64,
  pub cost_price_cents: Option<i64>,
  pub quantity: i32,
  pub min_stock_alert: i32,
  pub unit_of_measurement: Option<String>,
  pub package_size: Option<String>,
  pub category_id: i64,
  pub subcategory_id: Option<i64>,
  pub brand: String,
  pub sku: String,
  pub barcode: Option<String>,
  pub image_url: Option<String>,
  pub gallery_images: Option<Vec<String>>,
  pub video_url: Option<String>,
  pub meta_title: Option<String>,
  pub meta_description: Option<String>,
  pub free_shipping: bool,
  pub shipping_time: String,
  pub warranty_period: Option<i32>,
  pub weight_for_shipping: Option<f64>,
  pub dimensions: Option<String>,
  pub delivery_time_estimate: String,
  pub is_returnable: bool,
  pub is_cod_available: bool,
  pub eco_friendly: bool,
  pub eco_friendly_details: String,
  pub tags: String,
  pub is_featured: bool,
  pub is_best_seller: bool,
  pub is_new_arrival: bool,
  pub status: ProductStatus,
  pub created_by: Option<i64>,
}
