// core/src/models/category.rs

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
  pub category_id: i64,
  pub name: String,
  pub description: Option<String>,
}
