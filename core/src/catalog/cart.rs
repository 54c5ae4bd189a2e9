// core/src/catalog/cart.rs

//! Re-pricing a client-held cart against the live catalog.

use serde::Deserialize;
use tracing::{instrument, warn};

use super::Catalog;
use crate::cart::Cart;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CartLineRequest {
  #[serde(alias = "productId")]
  pub product_id: i64,
  pub quantity: i64,
}

impl Catalog {
  /// Builds a cart from current names, prices and images.
  ///
  /// Lines naming the same product are merged; the merged quantity must not
  /// exceed the product's stock.
  #[instrument(name = "catalog::price_cart", skip(self, lines), fields(lines = lines.len()), err(Display))]
  pub async fn price_cart(&self, lines: &[CartLineRequest]) -> CatalogResult<Cart> {
    let mut cart = Cart::new();
    for line in lines {
      if line.quantity <= 0 {
        return Err(CatalogError::validation("Quantity must be a positive number."));
      }

      let product = self.get_product(line.product_id).await?;
      let wanted = cart
        .quantity_of(product.product_id)
        .checked_add(line.quantity)
        .ok_or_else(|| CatalogError::validation(format!("Quantity for {} is too large.", product.name)))?;
      let available = i64::from(product.quantity);
      if wanted > available {
        warn!(product_id = product.product_id, available, wanted, "Insufficient stock for cart line.");
        return Err(CatalogError::validation(format!(
          "Insufficient stock for {}. Only {} available.",
          product.name, available
        )));
      }

      cart.add(&product, line.quantity);
    }
    Ok(cart)
  }
}
