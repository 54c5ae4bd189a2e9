// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Catalog(#[from] CatalogError),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  /// Request body, query string or path could not be extracted.
  #[error("Bad Request: {0}")]
  BadRequest(String),

  /// A route matched but its path segment names nothing that can exist.
  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration Error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<CatalogError>() {
      Ok(catalog_err) => AppError::Catalog(catalog_err),
      Err(err) => match err.downcast::<sqlx::Error>() {
        Ok(db_err) => AppError::Sqlx(db_err),
        Err(err) => AppError::Internal(err.to_string()),
      },
    }
  }
}

impl AppError {
  /// Message placed in the error envelope. Server-side failures never leak their detail.
  fn public_message(&self) -> String {
    match self {
      AppError::Catalog(CatalogError::Database(_)) | AppError::Sqlx(_) => "Database operation failed".to_string(),
      AppError::Catalog(err) => err.to_string(),
      AppError::Auth(m) | AppError::Forbidden(m) | AppError::BadRequest(m) | AppError::NotFound(m) => m.clone(),
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Migration(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Catalog(CatalogError::NotFound(_)) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Catalog(CatalogError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::Catalog(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Migration(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Rejecting request");
    }
    HttpResponse::build(status).json(json!({
      "status": "error",
      "message": self.public_message(),
    }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn catalog_errors_map_to_client_statuses() {
    let cases = [
      (CatalogError::validation("bad"), StatusCode::BAD_REQUEST),
      (CatalogError::not_found("Product not found"), StatusCode::NOT_FOUND),
      (CatalogError::Conflict("SKU already exists".into()), StatusCode::BAD_REQUEST),
      (CatalogError::DeleteBlocked("in carts".into()), StatusCode::BAD_REQUEST),
      (CatalogError::EmptyPatch, StatusCode::BAD_REQUEST),
      (CatalogError::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, expected) in cases {
      assert_eq!(AppError::from(err).status_code(), expected);
    }
  }

  #[test]
  fn database_detail_is_not_exposed() {
    let err = AppError::from(CatalogError::Database(sqlx::Error::PoolTimedOut));
    assert_eq!(err.public_message(), "Database operation failed");
  }

  #[test]
  fn anyhow_recovers_catalog_errors() {
    let err = AppError::from(anyhow::Error::new(CatalogError::EmptyPatch));
    assert!(matches!(err, AppError::Catalog(CatalogError::EmptyPatch)));
    let err = AppError::from(anyhow::anyhow!("boom"));
    assert!(matches!(err, AppError::Internal(ref m) if m == "boom"));
  }
}
