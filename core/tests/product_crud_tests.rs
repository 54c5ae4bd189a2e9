// tests/product_crud_tests.rs
mod common;

use common::*;
use storefront::{CatalogError, NewProductRequest, ProductPatch, ProductStatus};

#[tokio::test]
async fn test_create_requires_name_price_and_category() {
  let (catalog, store) = catalog_with_categories().await;

  let cases = [
    NewProductRequest {
      price_cents: Some(100),
      category_id: Some(1),
      ..Default::default()
    },
    NewProductRequest {
      name: Some("No price".into()),
      category_id: Some(1),
      ..Default::default()
    },
    NewProductRequest {
      name: Some("Zero price".into()),
      price_cents: Some(0),
      category_id: Some(1),
      ..Default::default()
    },
    NewProductRequest {
      name: Some("No category".into()),
      price_cents: Some(100),
      ..Default::default()
    },
    NewProductRequest {
      name: Some("   ".into()),
      price_cents: Some(100),
      category_id: Some(1),
      ..Default::default()
    },
  ];

  for request in cases {
    let err = catalog.create_product(request, Some(1)).await.unwrap_err();
    assert!(
      matches!(err, CatalogError::Validation(ref m) if m == "Name, price, and category ID are required"),
      "unexpected error: {err:?}"
    );
  }
  assert_eq!(store.product_count(), 0);
}

#[tokio::test]
async fn test_create_accepts_decimal_prices() {
  let (catalog, _store) = catalog_with_categories().await;
  let request = NewProductRequest {
    name: Some("Chai".into()),
    price: Some(2.5),
    cost_price: Some(1.2),
    category_id: Some(1),
    ..Default::default()
  };
  let product = catalog.create_product(request, None).await.unwrap();
  assert_eq!(product.price_cents, 250);
  assert_eq!(product.regular_price_cents, 250);
  assert_eq!(product.cost_price_cents, Some(120));

  let both = NewProductRequest {
    name: Some("Masala".into()),
    price_cents: Some(199),
    price: Some(50.0),
    regular_price: Some(2.75),
    category_id: Some(1),
    ..Default::default()
  };
  let product = catalog.create_product(both, None).await.unwrap();
  assert_eq!(product.price_cents, 199);
  assert_eq!(product.regular_price_cents, 275);
}

#[tokio::test]
async fn test_create_rejects_unknown_category() {
  let (catalog, _store) = catalog_with_categories().await;
  let err = catalog
    .create_product(product_request("Ghost", 100, 42), None)
    .await
    .unwrap_err();
  assert!(matches!(err, CatalogError::NotFound(ref m) if m == "Category not found"));
}

#[tokio::test]
async fn test_create_applies_defaults() {
  let (catalog, _store) = catalog_with_categories().await;
  let mut request = product_request("Lemon Grass Tea", 450, 1);
  request.description = Some("x".repeat(400));
  request.quantity = None;

  let product = catalog.create_product(request, Some(7)).await.unwrap();

  assert_eq!(product.slug, "lemon-grass-tea");
  assert_eq!(product.short_description.as_ref().map(|s| s.len()), Some(150));
  assert_eq!(product.regular_price_cents, 450);
  assert_eq!(product.quantity, 0);
  assert_eq!(product.min_stock_alert, 5);
  assert_eq!(product.brand, "GreenMagic");
  assert!(product.sku.starts_with("GM-"));
  assert_eq!(product.shipping_time, "3-5 business days");
  assert_eq!(product.delivery_time_estimate, "3-5 business days");
  assert!(product.eco_friendly);
  assert_eq!(product.eco_friendly_details, "Eco-friendly packaging");
  assert_eq!(product.tags, "");
  assert!(!product.is_featured);
  assert!(!product.free_shipping);
  assert!(product.is_returnable);
  assert!(product.is_cod_available);
  assert_eq!(product.status, ProductStatus::Active);
  assert_eq!(product.meta_title.as_deref(), Some("Lemon Grass Tea"));
  assert_eq!(product.meta_description, product.short_description);
  assert_eq!(product.created_by, Some(7));
  assert_eq!(product.category_name.as_deref(), Some("Tea"));
}

#[tokio::test]
async fn test_create_rejects_duplicate_sku() {
  let (catalog, store) = catalog_with_categories().await;
  let mut first = product_request("One", 100, 1);
  first.sku = Some("TEA-001".into());
  catalog.create_product(first, None).await.unwrap();

  let mut second = product_request("Two", 100, 1);
  second.sku = Some("TEA-001".into());
  let err = catalog.create_product(second, None).await.unwrap_err();
  assert!(matches!(err, CatalogError::Conflict(ref m) if m == "SKU already exists"));
  assert_eq!(store.product_count(), 1);
}

#[tokio::test]
async fn test_create_suffixes_taken_slugs() {
  let (catalog, _store) = catalog_with_categories().await;
  let a = create(&catalog, "Tulsi Tea", 100, 1).await;
  let b = create(&catalog, "Tulsi Tea", 120, 1).await;
  let c = create(&catalog, "Tulsi  Tea!", 130, 1).await;
  assert_eq!(a.slug, "tulsi-tea");
  assert_eq!(b.slug, "tulsi-tea-2");
  assert_eq!(c.slug, "tulsi-tea-3");
}

#[tokio::test]
async fn test_update_with_empty_patch_is_an_error() {
  let (catalog, _store) = catalog_with_categories().await;
  let product = create(&catalog, "Chai", 100, 1).await;

  let err = catalog
    .update_product(product.product_id, ProductPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, CatalogError::EmptyPatch));
  assert_eq!(err.to_string(), "No fields to update");
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
  let (catalog, _store) = catalog_with_categories().await;
  let mut request = product_request("Chai", 100, 1);
  request.description = Some("Spiced".into());
  let product = catalog.create_product(request, None).await.unwrap();

  let patch = ProductPatch {
    price_cents: Some(175),
    category_id: Some(3),
    is_featured: Some(true),
    ..Default::default()
  };
  let updated = catalog.update_product(product.product_id, patch).await.unwrap();

  assert_eq!(updated.price_cents, 175);
  assert_eq!(updated.category_id, Some(3));
  assert_eq!(updated.category_name.as_deref(), Some("Spices"));
  assert!(updated.is_featured);
  assert_eq!(updated.name, "Chai");
  assert_eq!(updated.description.as_deref(), Some("Spiced"));
  assert_eq!(updated.sku, product.sku);
}

#[tokio::test]
async fn test_update_with_decimal_price_and_free_form_slug() {
  let (catalog, _store) = catalog_with_categories().await;
  let product = create(&catalog, "Chai", 100, 1).await;

  let patch = ProductPatch {
    price: Some(3.0),
    slug: Some("Hello World!".into()),
    ..Default::default()
  };
  let updated = catalog.update_product(product.product_id, patch).await.unwrap();
  assert_eq!(updated.price_cents, 300);
  assert_eq!(updated.slug, "hello-world");

  let found = catalog.get_product_by_slug("hello-world").await.unwrap();
  assert_eq!(found.product_id, product.product_id);
}

#[tokio::test]
async fn test_update_validates_references() {
  let (catalog, _store) = catalog_with_categories().await;
  let mut first = product_request("One", 100, 1);
  first.sku = Some("SKU-A".into());
  let one = catalog.create_product(first, None).await.unwrap();
  let mut second = product_request("Two", 100, 1);
  second.sku = Some("SKU-B".into());
  let two = catalog.create_product(second, None).await.unwrap();

  let missing = ProductPatch {
    name: Some("Renamed".into()),
    ..Default::default()
  };
  assert!(matches!(
    catalog.update_product(999, missing).await,
    Err(CatalogError::NotFound(ref m)) if m == "Product not found"
  ));

  let bad_category = ProductPatch {
    category_id: Some(77),
    ..Default::default()
  };
  assert!(matches!(
    catalog.update_product(one.product_id, bad_category).await,
    Err(CatalogError::NotFound(ref m)) if m == "Category not found"
  ));

  let taken_sku = ProductPatch {
    sku: Some("SKU-B".into()),
    ..Default::default()
  };
  assert!(matches!(
    catalog.update_product(one.product_id, taken_sku).await,
    Err(CatalogError::Conflict(_))
  ));

  let same_sku = ProductPatch {
    sku: Some("SKU-B".into()),
    name: Some("Two again".into()),
    ..Default::default()
  };
  let updated = catalog.update_product(two.product_id, same_sku).await.unwrap();
  assert_eq!(updated.name, "Two again");
}

#[tokio::test]
async fn test_delete_blocked_by_cart_reference_keeps_row() {
  let (catalog, store) = catalog_with_categories().await;
  let product = create(&catalog, "Chai", 100, 1).await;
  store.add_cart_reference(product.product_id);

  let err = catalog.delete_product(product.product_id).await.unwrap_err();
  assert!(matches!(err, CatalogError::DeleteBlocked(ref m) if m == "Cannot delete product that is in customers carts"));
  assert!(catalog.get_product(product.product_id).await.is_ok());
}

#[tokio::test]
async fn test_delete_blocked_by_order_reference_keeps_row() {
  let (catalog, store) = catalog_with_categories().await;
  let product = create(&catalog, "Chai", 100, 1).await;
  store.add_order_reference(product.product_id);

  let err = catalog.delete_product(product.product_id).await.unwrap_err();
  assert!(matches!(err, CatalogError::DeleteBlocked(ref m) if m == "Cannot delete product that has been ordered"));
  assert!(err.is_client_error());
  assert!(catalog.get_product(product.product_id).await.is_ok());
}

#[tokio::test]
async fn test_delete_unreferenced_and_missing() {
  let (catalog, store) = catalog_with_categories().await;
  let product = create(&catalog, "Chai", 100, 1).await;

  catalog.delete_product(product.product_id).await.unwrap();
  assert_eq!(store.product_count(), 0);

  let err = catalog.delete_product(product.product_id).await.unwrap_err();
  assert!(matches!(err, CatalogError::NotFound(_)));
}
