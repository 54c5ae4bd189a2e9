// core/src/lib.rs

//! Storefront: the catalog and listing domain behind the shop.
//!
//! The crate owns everything between an HTTP handler and the database:
//!  - Typed products, categories and reviews (`models`).
//!  - Page arithmetic and the `hasMore` heuristic (`pagination`).
//!  - The listing query that mirrors the shop page URL (`shop_query`).
//!  - A typed patch for partial product updates (`patch`).
//!  - The `Catalog` service that validates and orchestrates requests.
//!  - The `CatalogStore` data-access seam, with PostgreSQL and in-memory backends.
//!  - An owned shopping `Cart` with explicit operations.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod models;
pub mod money;
pub mod pagination;
pub mod patch;
pub mod shop_query;
pub mod store;
pub mod wire;

// --- Re-exports for the Public API ---

pub use crate::cart::{Cart, CartLine, CartSummary};
pub use crate::catalog::{Catalog, CartLineRequest, ProductPage};
pub use crate::error::{CatalogError, CatalogResult};
pub use crate::models::{
  Category, NewProduct, NewProductRequest, NewReview, NewReviewRequest, Product, ProductStatus, Review,
};
pub use crate::pagination::{PageLimits, PageRequest, Pagination};
pub use crate::patch::ProductPatch;
pub use crate::shop_query::{CategorySelection, ProductFilter, ShopQuery};
pub use crate::store::{memory::MemoryCatalogStore, postgres::PgCatalogStore, CatalogStore};
