// core/src/patch.rs

//! Partial product updates.
//!
//! Each updatable column is an explicit optional field; a field left `None`
//! keeps its stored value. Amounts arrive in cents or decimal units and are
//! folded into the cent fields by [`ProductPatch::normalized`]. Keys the patch does not know are ignored during
//! deserialization, so a body made only of unknown keys is an empty patch.

use serde::Deserialize;

use crate::catalog::slugify;
use crate::error::{CatalogError, CatalogResult};
use crate::models::ProductStatus;
use crate::money::resolve_cents;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
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

fn reject_blank(field: &str, value: &Option<String>) -> CatalogResult<()> {
  match value {
    Some(v) if v.trim().is_empty() => Err(CatalogError::validation(format!("{field} cannot be empty"))),
    _ => Ok(()),
  }
}

fn reject_negative<T: PartialOrd + Default>(field: &str, value: Option<T>) -> CatalogResult<()> {
  match value {
    Some(v) if v < T::default() => Err(CatalogError::validation(format!("{field} cannot be negative"))),
    _ => Ok(()),
  }
}

impl ProductPatch {
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }

  /// The patch as it will be stored: decimal amounts moved into the cent
  /// fields and the slug put in canonical form.
  pub fn normalized(mut self) -> CatalogResult<Self> {
    self.price_cents = resolve_cents("Price", self.price_cents, self.price.take())?;
    self.regular_price_cents = resolve_cents("Regular price", self.regular_price_cents, self.regular_price.take())?;
    self.cost_price_cents = resolve_cents("Cost price", self.cost_price_cents, self.cost_price.take())?;
    self.slug = self.slug.map(|slug| slugify(&slug));
    Ok(self)
  }

  /// Checks the patch before anything touches the store.
  pub fn validate(&self) -> CatalogResult<()> {
    if self.is_empty() {
      return Err(CatalogError::EmptyPatch);
    }

    reject_blank("Name", &self.name)?;
    reject_blank("Slug", &self.slug)?;
    reject_blank("SKU", &self.sku)?;

    if self.price_cents.is_some_and(|p| p <= 0) {
      return Err(CatalogError::validation("Price must be greater than zero"));
    }
    reject_negative("Regular price", self.regular_price_cents)?;
    reject_negative("Cost price", self.cost_price_cents)?;
    reject_negative("Quantity", self.quantity)?;
    reject_negative("Stock alert threshold", self.min_stock_alert)?;
    reject_negative("Warranty period", self.warranty_period)?;
    reject_negative("Shipping weight", self.weight_for_shipping)?;

    Ok(())
  }

  /// The SKU this patch would set, if it differs from `current`.
  pub fn changed_sku<'a>(&'a self, current: &str) -> Option<&'a str> {
    self.sku.as_deref().filter(|sku| *sku != current)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_patch_is_empty_and_rejected() {
    let patch = ProductPatch::default();
    assert!(patch.is_empty());
    assert!(matches!(patch.validate(), Err(CatalogError::EmptyPatch)));
  }

  #[test]
  fn unknown_keys_produce_an_empty_patch() {
    let patch: ProductPatch = serde_json::from_str(r#"{ "rating": 5, "review_count": 10 }"#).unwrap();
    assert!(patch.is_empty());
  }

  #[test]
  fn camel_case_aliases_are_accepted() {
    let patch: ProductPatch =
      serde_json::from_str(r#"{ "categoryId": 4, "imageUrl": "/img/a.png", "priceCents": 250 }"#).unwrap();
    assert_eq!(patch.category_id, Some(4));
    assert_eq!(patch.image_url.as_deref(), Some("/img/a.png"));
    assert_eq!(patch.price_cents, Some(250));
    assert!(patch.validate().is_ok());
  }

  #[test]
  fn invalid_values_are_rejected() {
    let blank_name = ProductPatch {
      name: Some("  ".into()),
      ..Default::default()
    };
    assert!(matches!(blank_name.validate(), Err(CatalogError::Validation(_))));

    let zero_price = ProductPatch {
      price_cents: Some(0),
      ..Default::default()
    };
    assert!(matches!(zero_price.validate(), Err(CatalogError::Validation(_))));

    let negative_stock = ProductPatch {
      quantity: Some(-1),
      ..Default::default()
    };
    assert!(matches!(negative_stock.validate(), Err(CatalogError::Validation(_))));
  }

  #[test]
  fn decimal_prices_fold_into_cents() {
    let patch: ProductPatch = serde_json::from_str(r#"{ "price": "3", "regular_price": 4.25 }"#).unwrap();
    assert!(!patch.is_empty());

    let patch = patch.normalized().unwrap();
    assert_eq!(patch.price_cents, Some(300));
    assert_eq!(patch.regular_price_cents, Some(425));
    assert_eq!(patch.price, None);
    assert!(patch.validate().is_ok());
  }

  #[test]
  fn slug_is_canonicalised() {
    let patch = ProductPatch {
      slug: Some("Hello World!".into()),
      ..Default::default()
    };
    assert_eq!(patch.normalized().unwrap().slug.as_deref(), Some("hello-world"));

    let unusable = ProductPatch {
      slug: Some("!!!".into()),
      ..Default::default()
    };
    assert!(matches!(
      unusable.normalized().unwrap().validate(),
      Err(CatalogError::Validation(_))
    ));
  }

  #[test]
  fn changed_sku_ignores_identical_value() {
    let patch = ProductPatch {
      sku: Some("GM-1".into()),
      ..Default::default()
    };
    assert_eq!(patch.changed_sku("GM-1"), None);
    assert_eq!(patch.changed_sku("GM-2"), Some("GM-1"));
  }
}
