// server/src/web/routes.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::error;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::{cart_handlers, category_handlers, product_handlers, review_handlers};

/// Liveness plus a round trip to the catalog store.
async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  match app_state.catalog.ping().await {
    Ok(()) => HttpResponse::Ok().json(json!({ "status": "ok" })),
    Err(e) => {
      error!(error = %e, "Health check failed: catalog store unreachable.");
      HttpResponse::ServiceUnavailable().json(json!({ "status": "error", "message": "Database unavailable" }))
    }
  }
}

/// Extractor configs that turn malformed bodies, query strings and ids into the error envelope.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()))
    // A product or category id that is not an integer cannot exist.
    .app_data(web::PathConfig::default().error_handler(|err, _req| AppError::NotFound(err.to_string()).into()));
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  configure_extractors(cfg);
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::create_product_handler))
          // Literal segments first so they are not captured by `/{product_id}`.
          .route("/search", web::get().to(product_handlers::search_products_handler))
          .route(
            "/category/{category_id}",
            web::get().to(product_handlers::products_by_category_handler),
          )
          .route("/slug/{slug}", web::get().to(product_handlers::get_product_by_slug_handler))
          .route(
            "/{product_id}/related",
            web::get().to(product_handlers::related_products_handler),
          )
          .route(
            "/{product_id}/reviews",
            web::get().to(review_handlers::list_reviews_handler),
          )
          .route(
            "/{product_id}/reviews",
            web::post().to(review_handlers::create_review_handler),
          )
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::patch().to(product_handlers::update_product_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
      )
      .service(
        web::scope("/categories")
          .route("", web::get().to(category_handlers::list_categories_handler))
          .route("/{category_id}", web::get().to(category_handlers::get_category_handler)),
      )
      .service(web::scope("/cart").route("/price", web::post().to(cart_handlers::price_cart_handler))),
  );
}
