// core/src/models/mod.rs

//! Data structures representing catalog rows and the request bodies that create them.

pub mod category;
pub mod product;
pub mod review;

pub use category::Category;
pub use product::{NewProduct, NewProductRequest, Product, ProductStatus};
pub use review::{NewReview, NewReviewRequest, Review};
