// tests/cart_tests.rs
mod common;

use common::*;
use storefront::cart::FLAT_SHIPPING_CENTS;
use storefront::{Cart, CartLineRequest, CatalogError};

#[tokio::test]
async fn test_cart_operations() {
  let (catalog, _store) = catalog_with_categories().await;
  let tea = create(&catalog, "Tea", 250, 1).await;
  let honey = create(&catalog, "Honey", 900, 2).await;

  let mut cart = Cart::new();
  assert!(cart.is_empty());
  assert_eq!(cart.shipping_cents(), 0);
  assert_eq!(cart.total_cents(), 0);

  cart.add(&tea, 2);
  cart.add(&honey, 1);
  cart.add(&tea, 1);
  cart.add(&honey, 0);

  assert_eq!(cart.lines().len(), 2);
  assert_eq!(cart.quantity_of(tea.product_id), 3);
  assert_eq!(cart.item_count(), 4);
  assert_eq!(cart.subtotal_cents(), 3 * 250 + 900);
  assert_eq!(cart.shipping_cents(), FLAT_SHIPPING_CENTS);
  assert_eq!(cart.total_cents(), 3 * 250 + 900 + FLAT_SHIPPING_CENTS);

  assert!(cart.set_quantity(honey.product_id, 4));
  assert_eq!(cart.quantity_of(honey.product_id), 4);
  assert!(!cart.set_quantity(999, 1));

  assert!(cart.set_quantity(honey.product_id, 0));
  assert_eq!(cart.quantity_of(honey.product_id), 0);
  assert!(!cart.remove(honey.product_id));

  let summary = cart.summary();
  assert_eq!(summary.items.len(), 1);
  assert_eq!(summary.items[0].name, "Tea");
  assert_eq!(summary.items[0].line_total_cents(), 750);

  cart.clear();
  assert!(cart.is_empty());
}

#[tokio::test]
async fn test_price_cart_uses_catalog_prices_and_merges_lines() {
  let (catalog, _store) = catalog_with_categories().await;
  let tea = create(&catalog, "Tea", 250, 1).await;
  let honey = create(&catalog, "Honey", 900, 2).await;

  let cart = catalog
    .price_cart(&[
      CartLineRequest {
        product_id: tea.product_id,
        quantity: 2,
      },
      CartLineRequest {
        product_id: honey.product_id,
        quantity: 1,
      },
      CartLineRequest {
        product_id: tea.product_id,
        quantity: 3,
      },
    ])
    .await
    .unwrap();

  assert_eq!(cart.lines().len(), 2);
  assert_eq!(cart.quantity_of(tea.product_id), 5);
  assert_eq!(cart.subtotal_cents(), 5 * 250 + 900);
}

#[tokio::test]
async fn test_price_cart_rejects_bad_lines() {
  let (catalog, _store) = catalog_with_categories().await;
  let tea = create(&catalog, "Tea", 250, 1).await; // stock 10

  let zero = catalog
    .price_cart(&[CartLineRequest {
      product_id: tea.product_id,
      quantity: 0,
    }])
    .await;
  assert!(matches!(zero, Err(CatalogError::Validation(_))));

  let missing = catalog
    .price_cart(&[CartLineRequest {
      product_id: 404,
      quantity: 1,
    }])
    .await;
  assert!(matches!(missing, Err(CatalogError::NotFound(_))));

  let too_many = catalog
    .price_cart(&[
      CartLineRequest {
        product_id: tea.product_id,
        quantity: 6,
      },
      CartLineRequest {
        product_id: tea.product_id,
        quantity: 5,
      },
    ])
    .await;
  assert!(matches!(too_many, Err(CatalogError::Validation(ref m)) if m.starts_with("Insufficient stock")));
}

#[tokio::test]
async fn test_price_cart_rejects_quantities_that_overflow() {
  let (catalog, _store) = catalog_with_categories().await;
  let tea = create(&catalog, "Tea", 250, 1).await;

  let result = catalog
    .price_cart(&[
      CartLineRequest {
        product_id: tea.product_id,
        quantity: 1,
      },
      CartLineRequest {
        product_id: tea.product_id,
        quantity: i64::MAX,
      },
    ])
    .await;
  assert!(matches!(result, Err(CatalogError::Validation(ref m)) if m.contains("too large")));
}

#[tokio::test]
async fn test_cart_totals_saturate_instead_of_wrapping() {
  let (catalog, _store) = catalog_with_categories().await;
  let tea = create(&catalog, "Tea", 250, 1).await;
  let honey = create(&catalog, "Honey", 900, 2).await;

  let mut cart = Cart::new();
  cart.add(&tea, i64::MAX);
  cart.add(&tea, 5);
  cart.add(&honey, i64::MAX);

  assert_eq!(cart.quantity_of(tea.product_id), i64::MAX);
  assert_eq!(cart.item_count(), i64::MAX);
  assert_eq!(cart.subtotal_cents(), i64::MAX);
  assert_eq!(cart.total_cents(), i64::MAX);
  assert!(cart.summary().total_cents > 0);
}
