// tests/review_tests.rs
mod common;

use common::*;
use storefront::{CatalogError, NewReviewRequest};

fn review(rating: i32, title: Option<&str>, content: &str) -> NewReviewRequest {
  NewReviewRequest {
    rating: Some(rating),
    title: title.map(str::to_string),
    content: Some(content.to_string()),
  }
}

#[tokio::test]
async fn test_create_and_list_reviews() {
  let (catalog, _store) = catalog_with_categories().await;
  let tea = create(&catalog, "Tea", 250, 1).await;
  let honey = create(&catalog, "Honey", 900, 2).await;

  let first = catalog
    .create_review(tea.product_id, 11, review(5, Some("Lovely"), "Fresh and fragrant"))
    .await
    .unwrap();
  let second = catalog
    .create_review(tea.product_id, 12, review(3, None, "  Fine  "))
    .await
    .unwrap();
  catalog
    .create_review(honey.product_id, 11, review(4, None, "Sweet"))
    .await
    .unwrap();

  assert_eq!(first.title, "Lovely");
  assert_eq!(second.title, "Review");
  assert_eq!(second.content, "Fine");

  let reviews = catalog.list_reviews(tea.product_id).await.unwrap();
  assert_eq!(reviews.len(), 2);
  assert_eq!(reviews[0].review_id, second.review_id);
  assert!(reviews.iter().all(|r| r.product_id == tea.product_id));
}

#[tokio::test]
async fn test_review_rating_must_be_one_to_five() {
  let (catalog, _store) = catalog_with_categories().await;
  let tea = create(&catalog, "Tea", 250, 1).await;

  for rating in [0, 6, -1] {
    let err = catalog
      .create_review(tea.product_id, 1, review(rating, None, "text"))
      .await
      .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "rating {rating}");
  }

  let no_rating = NewReviewRequest {
    content: Some("text".into()),
    ..Default::default()
  };
  assert!(matches!(
    catalog.create_review(tea.product_id, 1, no_rating).await,
    Err(CatalogError::Validation(_))
  ));
}

#[tokio::test]
async fn test_review_needs_content_and_existing_product() {
  let (catalog, _store) = catalog_with_categories().await;
  let tea = create(&catalog, "Tea", 250, 1).await;

  assert!(matches!(
    catalog.create_review(tea.product_id, 1, review(4, None, "   ")).await,
    Err(CatalogError::Validation(_))
  ));
  assert!(matches!(
    catalog.create_review(999, 1, review(4, None, "text")).await,
    Err(CatalogError::NotFound(_))
  ));
  assert!(matches!(catalog.list_reviews(999).await, Err(CatalogError::NotFound(_))));
}
