// server/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = app_state.catalog.list_categories().await?;
  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "results": categories.len(),
      "data": { "categories": categories }
  })))
}

#[instrument(name = "handler::get_category", skip(app_state, path), fields(category_id = %path.as_ref()))]
pub async fn get_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let category = app_state.catalog.get_category(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "data": { "category": category }
  })))
}
