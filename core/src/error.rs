// core/src/error.rs
use thiserror::Error;

/// Errors raised by the catalog service and its stores.
///
/// Every variant except `Database` is a client error: the request named
/// something that does not exist or asked for something the catalog refuses.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  /// A unique value (SKU, slug) is already taken by another product.
  #[error("{0}")]
  Conflict(String),

  /// Delete refused because the product is still referenced by cart or order lines.
  #[error("{0}")]
  DeleteBlocked(String),

  #[error("No fields to update")]
  EmptyPatch,

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

impl CatalogError {
  pub fn validation(message: impl Into<String>) -> Self {
    CatalogError::Validation(message.into())
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    CatalogError::NotFound(message.into())
  }

  /// True for errors caused by the request rather than by the backing store.
  pub fn is_client_error(&self) -> bool {
    !matches!(self, CatalogError::Database(_))
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
