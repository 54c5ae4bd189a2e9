// server/src/lib.rs

//! HTTP front of the storefront catalog: configuration, error envelope,
//! request extractors and the actix-web routes under `/api/v1`.

pub mod config;
pub mod db;
pub mod errors;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
