// core/src/pagination.rs

//! Page arithmetic for listing endpoints.
//!
//! A page is requested with a 1-based page number and a page size. Nothing
//! counts the full result set: `hasMore` is inferred from whether the page
//! came back full.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default and ceiling for the page size, usually taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
  pub default_limit: i64,
  pub max_limit: i64,
}

impl Default for PageLimits {
  fn default() -> Self {
    Self {
      default_limit: DEFAULT_PAGE_SIZE,
      max_limit: MAX_PAGE_SIZE,
    }
  }
}

impl PageLimits {
  /// Builds limits, keeping the default inside `1..=max_limit`.
  pub fn new(default_limit: i64, max_limit: i64) -> Self {
    let max_limit = max_limit.max(1);
    Self {
      default_limit: default_limit.clamp(1, max_limit),
      max_limit,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page: i64,
  limit: i64,
}

impl PageRequest {
  /// Normalises raw query values with the default limits.
  pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
    Self::with_limits(page, limit, PageLimits::default())
  }

  /// Missing or non-positive values fall back to page 1 and the default
  /// limit; the limit never exceeds `limits.max_limit`.
  pub fn with_limits(page: Option<i64>, limit: Option<i64>, limits: PageLimits) -> Self {
    let page = page.filter(|p| *p >= 1).unwrap_or(1);
    let limit = limit
      .filter(|l| *l >= 1)
      .unwrap_or(limits.default_limit)
      .min(limits.max_limit);
    Self { page, limit }
  }

  pub fn page(&self) -> i64 {
    self.page
  }

  pub fn limit(&self) -> i64 {
    self.limit
  }

  /// Rows to skip before this page. Saturates instead of overflowing on absurd page numbers.
  pub fn offset(&self) -> i64 {
    (self.page - 1).saturating_mul(self.limit)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self::new(None, None)
  }
}

/// The `pagination` object of a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
  pub page: i64,
  pub limit: i64,
  #[serde(rename = "hasMore")]
  pub has_more: bool,
}

impl Pagination {
  pub fn from_rows(request: &PageRequest, rows_returned: usize) -> Self {
    Self {
      page: request.page,
      limit: request.limit,
      has_more: rows_returned as i64 == request.limit,
    }
  }
}
