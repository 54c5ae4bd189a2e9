// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront::CartLineRequest;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

/// The client-held cart: product ids and quantities only. Names and prices
/// always come from the catalog.
#[derive(Deserialize, Debug)]
pub struct PriceCartRequestPayload {
  pub items: Vec<CartLineRequest>,
}

#[instrument(name = "handler::price_cart", skip(app_state, req_payload), fields(lines = req_payload.items.len()))]
pub async fn price_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<PriceCartRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.catalog.price_cart(&req_payload.items).await?;
  let summary = cart.summary();
  info!(
    item_count = summary.item_count,
    total_cents = summary.total_cents,
    "Cart priced."
  );

  Ok(HttpResponse::Ok().json(json!({
      "status": "success",
      "data": { "cart": summary }
  })))
}
