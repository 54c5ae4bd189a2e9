// core/src/cart.rs

//! A shopper's cart as one owned value.
//!
//! Lines carry a denormalized snapshot of the product (name, price, image) so
//! the cart can be displayed without another catalog lookup. All mutation goes
//! through the methods below; there is no shared or implicit cart state.

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// Flat shipping charge applied to any non-empty cart.
pub const FLAT_SHIPPING_CENTS: i64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  pub product_id: i64,
  pub name: String,
  pub unit_price_cents: i64,
  pub image_url: Option<String>,
  pub quantity: i64,
}

impl CartLine {
  pub fn line_total_cents(&self) -> i64 {
    self.unit_price_cents.saturating_mul(self.quantity)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
  lines: Vec<CartLine>,
}

/// Serializable view of a cart with its computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
  pub items: Vec<CartLine>,
  pub item_count: i64,
  pub subtotal_cents: i64,
  pub shipping_cents: i64,
  pub total_cents: i64,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds `quantity` units of `product`, merging with an existing line.
  /// Non-positive quantities are ignored; merged quantities saturate at `i64::MAX`.
  pub fn add(&mut self, product: &Product, quantity: i64) {
    if quantity <= 0 {
      return;
    }
    match self.lines.iter_mut().find(|l| l.product_id == product.product_id) {
      Some(line) => line.quantity = line.quantity.saturating_add(quantity),
      None => self.lines.push(CartLine {
        product_id: product.product_id,
        name: product.name.clone(),
        unit_price_cents: product.price_cents,
        image_url: product.image_url.clone(),
        quantity,
      }),
    }
  }

  /// Sets the quantity of an existing line; zero or less removes it.
  /// Returns false when the product is not in the cart.
  pub fn set_quantity(&mut self, product_id: i64, quantity: i64) -> bool {
    if quantity <= 0 {
      return self.remove(product_id);
    }
    match self.lines.iter_mut().find(|l| l.product_id == product_id) {
      Some(line) => {
        line.quantity = quantity;
        true
      }
      None => false,
    }
  }

  pub fn remove(&mut self, product_id: i64) -> bool {
    let before = self.lines.len();
    self.lines.retain(|l| l.product_id != product_id);
    self.lines.len() != before
  }

  pub fn clear(&mut self) {
    self.lines.clear();
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn quantity_of(&self, product_id: i64) -> i64 {
    self
      .lines
      .iter()
      .find(|l| l.product_id == product_id)
      .map_or(0, |l| l.quantity)
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn item_count(&self) -> i64 {
    self.lines.iter().fold(0i64, |count, l| count.saturating_add(l.quantity))
  }

  pub fn subtotal_cents(&self) -> i64 {
    self
      .lines
      .iter()
      .fold(0i64, |total, l| total.saturating_add(l.line_total_cents()))
  }

  pub fn shipping_cents(&self) -> i64 {
    if self.subtotal_cents() > 0 {
      FLAT_SHIPPING_CENTS
    } else {
      0
    }
  }

  pub fn total_cents(&self) -> i64 {
    self.subtotal_cents().saturating_add(self.shipping_cents())
  }

  pub fn summary(&self) -> CartSummary {
    CartSummary {
      items: self.lines.clone(),
      item_count: self.item_count(),
      subtotal_cents: self.subtotal_cents(),
      shipping_cents: self.shipping_cents(),
      total_cents: self.total_cents(),
    }
  }
}
