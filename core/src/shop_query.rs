// core/src/shop_query.rs

//! The shop listing's query string as a value.
//!
//! The listing page is a pure function of its URL query: the same `ShopQuery`
//! always yields the same page. Every filter interaction is a transition that
//! produces a new query, and filter changes send the shopper back to page 1.

use serde::{Deserialize, Serialize};

use crate::money::units_to_cents;
use crate::pagination::{PageLimits, PageRequest};

/// Query parameters of `GET /products`.
///
/// `category` stays a string on purpose: a non-numeric category selects
/// nothing instead of failing the request. Prices are whole currency units.
/// `page` and `limit` are read like form fields: unreadable values fall back
/// to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopQuery {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, rename = "minPrice", skip_serializing_if = "Option::is_none")]
  pub min_price: Option<i64>,
  #[serde(default, rename = "maxPrice", skip_serializing_if = "Option::is_none")]
  pub max_price: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub q: Option<String>,
  #[serde(default, deserialize_with = "crate::wire::leading_int", skip_serializing_if = "Option::is_none")]
  pub page: Option<i64>,
  #[serde(default, deserialize_with = "crate::wire::leading_int", skip_serializing_if = "Option::is_none")]
  pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelection {
  Any,
  Id(i64),
  /// The query named a category that cannot be an id; the listing is empty.
  Invalid,
}

/// Row predicate handed to a `CatalogStore`. All bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
  pub category_id: Option<i64>,
  pub min_price_cents: Option<i64>,
  pub max_price_cents: Option<i64>,
  pub search: Option<String>,
}

impl ProductFilter {
  pub fn in_category(category_id: i64) -> Self {
    Self {
      category_id: Some(category_id),
      ..Self::default()
    }
  }

  /// Substring search on name and description. Blank terms match everything.
  pub fn matching(term: &str) -> Self {
    Self {
      search: normalize_term(Some(term)),
      ..Self::default()
    }
  }

  pub fn search_term(&self) -> Option<&str> {
    self.search.as_deref()
  }

  /// Whether a product with these attributes passes the filter.
  /// Search is case-insensitive, matching the SQL backend's `ILIKE`.
  pub fn accepts(&self, category_id: Option<i64>, price_cents: i64, name: &str, description: Option<&str>) -> bool {
    if let Some(wanted) = self.category_id {
      if category_id != Some(wanted) {
        return false;
      }
    }
    if self.min_price_cents.is_some_and(|min| price_cents < min) {
      return false;
    }
    if self.max_price_cents.is_some_and(|max| price_cents > max) {
      return false;
    }
    match &self.search {
      None => true,
      Some(term) => {
        let needle = term.to_lowercase();
        name.to_lowercase().contains(&needle)
          || description.is_some_and(|d| d.to_lowercase().contains(&needle))
      }
    }
  }
}

fn normalize_term(term: Option<&str>) -> Option<String> {
  term.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

impl ShopQuery {
  pub fn category_selection(&self) -> CategorySelection {
    match self.category.as_deref().map(str::trim) {
      None | Some("") => CategorySelection::Any,
      Some(raw) => raw
        .parse::<i64>()
        .map(CategorySelection::Id)
        .unwrap_or(CategorySelection::Invalid),
    }
  }

  /// The store predicate for this query, or `None` when nothing can match.
  pub fn filter(&self) -> Option<ProductFilter> {
    let category_id = match self.category_selection() {
      CategorySelection::Any => None,
      CategorySelection::Id(id) => Some(id),
      CategorySelection::Invalid => return None,
    };

    let (min, max) = match (self.min_price, self.max_price) {
      (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
      bounds => bounds,
    };

    Some(ProductFilter {
      category_id,
      min_price_cents: min.map(units_to_cents),
      max_price_cents: max.map(units_to_cents),
      search: normalize_term(self.q.as_deref()),
    })
  }

  pub fn page_request(&self, limits: PageLimits) -> PageRequest {
    PageRequest::with_limits(self.page, self.limit, limits)
  }

  // --- Transitions ---

  pub fn select_category(&self, category_id: Option<i64>) -> Self {
    Self {
      category: category_id.map(|id| id.to_string()),
      page: Some(1),
      ..self.clone()
    }
  }

  pub fn set_price_range(&self, min_price: i64, max_price: i64) -> Self {
    Self {
      min_price: Some(min_price),
      max_price: Some(max_price),
      page: Some(1),
      ..self.clone()
    }
  }

  pub fn search_for(&self, term: &str) -> Self {
    Self {
      q: normalize_term(Some(term)),
      page: Some(1),
      ..self.clone()
    }
  }

  pub fn goto_page(&self, page: i64) -> Self {
    Self {
      page: Some(page.max(1)),
      ..self.clone()
    }
  }

  /// Canonical key/value pairs in a fixed order; absent keys are omitted.
  pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(category) = &self.category {
      pairs.push(("category", category.clone()));
    }
    if let Some(min) = self.min_price {
      pairs.push(("minPrice", min.to_string()));
    }
    if let Some(max) = self.max_price {
      pairs.push(("maxPrice", max.to_string()));
    }
    if let Some(q) = &self.q {
      pairs.push(("q", q.clone()));
    }
    if let Some(page) = self.page {
      pairs.push(("page", page.to_string()));
    }
    if let Some(limit) = self.limit {
      pairs.push(("limit", limit.to_string()));
    }
    pairs
  }
}
