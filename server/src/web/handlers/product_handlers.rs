// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::wire::leading_int;
use storefront::{NewProductRequest, ProductPatch, ShopQuery};
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AdminUser;

// Page numbers and sizes that cannot be read fall back to the defaults instead of failing the request.

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
  #[serde(default, deserialize_with = "leading_int")]
  pub page: Option<i64>,
  #[serde(default, deserialize_with = "leading_int")]
  pub limit: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
  pub q: Option<String>,
  #[serde(default, deserialize_with = "leading_int")]
  pub page: Option<i64>,
  #[serde(default, deserialize_with = "leading_int")]
  pub limit: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RelatedQuery {
  #[serde(default, deserialize_with = "leading_int")]
  pub limit: Option<i64>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ShopQuery>,
) -> Result<HttpResponse, AppError> {
  let page = app_state.catalog.list_products(&query).await?;

  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "results": page.results(),
      "pagination": page.pagination,
      "data": { "products": page.products }
  })))
}

#[instrument(name = "handler::search_products", skip(app_state))]
pub async fn search_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
  let SearchQuery { q, page, limit } = query.into_inner();
  let page_request = app_state.catalog.page_request(page, limit);
  let page = app_state
    .catalog
    .search_products(q.as_deref().unwrap_or_default(), page_request)
    .await?;

  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "results": page.results(),
      "pagination": page.pagination,
      "data": { "products": page.products }
  })))
}

#[instrument(name = "handler::products_by_category", skip(app_state, path), fields(category_id = %path.as_ref()))]
pub async fn products_by_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
  let page_request = app_state.catalog.page_request(query.page, query.limit);
  let (category, page) = app_state
    .catalog
    .products_by_category(path.into_inner(), page_request)
    .await?;

  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "results": page.results(),
      "pagination": page.pagination,
      "data": { "category": category, "products": page.products }
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.get_product(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "data": { "product": product }
  })))
}

#[instrument(name = "handler::get_product_by_slug", skip(app_state, path), fields(slug = %path.as_ref()))]
pub async fn get_product_by_slug_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.get_product_by_slug(&path).await?;
  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "data": { "product": product }
  })))
}

#[instrument(name = "handler::related_products", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn related_products_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  query: web::Query<RelatedQuery>,
) -> Result<HttpResponse, AppError> {
  let products = app_state
    .catalog
    .related_products(path.into_inner(), query.limit)
    .await?;

  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "results": products.len(),
      "data": { "products": products }
  })))
}

#[instrument(name = "handler::create_product", skip(app_state, admin, payload), fields(admin_id = admin.user_id()))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  admin: AdminUser,
  payload: web::Json<NewProductRequest>,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .catalog
    .create_product(payload.into_inner(), Some(admin.user_id()))
    .await?;

  Ok(HttpResponse::Created().json(json!({
      "status": "success",
      "data": { "product": product }
  })))
}

#[instrument(
    name = "handler::update_product",
    skip(app_state, admin, path, payload),
    fields(admin_id = admin.user_id(), product_id = %path.as_ref())
)]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  admin: AdminUser,
  path: web::Path<i64>,
  payload: web::Json<ProductPatch>,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .catalog
    .update_product(path.into_inner(), payload.into_inner())
    .await?;

  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "data": { "product": product }
  })))
}

#[instrument(
    name = "handler::delete_product",
    skip(app_state, admin, path),
    fields(admin_id = admin.user_id(), product_id = %path.as_ref())
)]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  admin: AdminUser,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state.catalog.delete_product(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "message": "Product deleted successfully"
  })))
}
