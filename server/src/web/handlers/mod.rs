// server/src/web/handlers/mod.rs

pub mod cart_handlers;
pub mod category_handlers;
pub mod product_handlers;
pub mod review_handlers;
