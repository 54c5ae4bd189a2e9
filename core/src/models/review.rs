// core/src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
  pub review_id: i64,
  pub product_id: i64,
  pub user_id: i64,
  pub rating: i32,
  pub title: String,
  pub content: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReviewRequest {
  pub rating: Option<i32>,
  pub title: Option<String>,
  pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
  pub product_id: i64,
  pub user_id: i64,
  pub rating: i32,
  pub title: String,
  pub content: String,
}
