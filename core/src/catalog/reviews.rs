// core/src/catalog/reviews.rs

use tracing::{info, instrument};

use super::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::models::review::{MAX_RATING, MIN_RATING};
use crate::models::{NewReview, NewReviewRequest, Review};

const DEFAULT_REVIEW_TITLE: &str = "Review";

impl Catalog {
  pub async fn list_reviews(&self, product_id: i64) -> CatalogResult<Vec<Review>> {
    self.get_product(product_id).await?;
    self.store.list_reviews(product_id).await
  }

  #[instrument(name = "catalog::create_review", skip(self, request), err(Display))]
  pub async fn create_review(&self, product_id: i64, user_id: i64, request: NewReviewRequest) -> CatalogResult<Review> {
    let rating = request
      .rating
      .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
      .ok_or_else(|| CatalogError::validation(format!("Rating must be between {MIN_RATING} and {MAX_RATING}")))?;

    let content = request
      .content
      .map(|c| c.trim().to_string())
      .filter(|c| !c.is_empty())
      .ok_or_else(|| CatalogError::validation("Review content is required"))?;

    let title = request
      .title
      .map(|t| t.trim().to_string())
      .filter(|t| !t.is_empty())
      .unwrap_or_else(|| DEFAULT_REVIEW_TITLE.to_string());

    self.get_product(product_id).await?;

    let review = self
      .store
      .insert_review(&NewReview {
        product_id,
        user_id,
        rating,
        title,
        content,
      })
      .await?;
    info!(review_id = review.review_id, product_id, rating, "Review recorded.");
    Ok(review)
  }
}
