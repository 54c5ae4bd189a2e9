// server/src/web/handlers/review_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use storefront::NewReviewRequest;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::list_reviews", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn list_reviews_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let reviews = app_state.catalog.list_reviews(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "results": reviews.len(),
      "data": { "reviews": reviews }
  })))
}

#[instrument(
    name = "handler::create_review",
    skip(app_state, auth_user, path, payload),
    fields(user_id = auth_user.user_id, product_id = %path.as_ref())
)]
pub async fn create_review_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
  payload: web::Json<NewReviewRequest>,
) -> Result<HttpResponse, AppError> {
  let review = app_state
    .catalog
    .create_review(path.into_inner(), auth_user.user_id, payload.into_inner())
    .await?;
  info!(review_id = review.review_id, rating = review.rating, "Review created.");

  Ok(HttpResponse::Created().json(json!({
      "status": "success",
      "data": { "review": review }
  })))
}
