// core/src/money.rs

//! Amounts are stored as integer cents. Shoppers and admin forms speak
//! currency units: whole units in the listing URL, decimals in product bodies.

use crate::error::{CatalogError, CatalogResult};

pub fn units_to_cents(units: i64) -> i64 {
  units.saturating_mul(100)
}

/// Decimal units to cents, rounded to the nearest cent.
/// `None` for non-finite values and amounts outside the `i64` cent range.
pub fn decimal_to_cents(units: f64) -> Option<i64> {
  if !units.is_finite() {
    return None;
  }
  let cents = (units * 100.0).round();
  if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
    return None;
  }
  Some(cents as i64)
}

/// Picks the cent amount of a field sent either as cents or as decimal units.
/// Explicit cents win when both are present.
pub fn resolve_cents(field: &str, cents: Option<i64>, units: Option<f64>) -> CatalogResult<Option<i64>> {
  match (cents, units) {
    (Some(cents), _) => Ok(Some(cents)),
    (None, Some(units)) => decimal_to_cents(units)
      .map(Some)
      .ok_or_else(|| CatalogError::validation(format!("{field} is not a valid amount"))),
    (None, None) => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decimals_round_to_the_nearest_cent() {
    assert_eq!(decimal_to_cents(2.5), Some(250));
    assert_eq!(decimal_to_cents(19.99), Some(1999));
    assert_eq!(decimal_to_cents(0.005), Some(1));
    assert_eq!(decimal_to_cents(-1.25), Some(-125));
    assert_eq!(decimal_to_cents(f64::NAN), None);
    assert_eq!(decimal_to_cents(1e300), None);
  }

  #[test]
  fn cents_take_precedence_over_units() {
    assert_eq!(resolve_cents("Price", Some(120), Some(9.0)).unwrap(), Some(120));
    assert_eq!(resolve_cents("Price", None, Some(9.0)).unwrap(), Some(900));
    assert_eq!(resolve_cents("Price", None, None).unwrap(), None);
    assert!(matches!(
      resolve_cents("Price", None, Some(1e300)),
      Err(CatalogError::Validation(_))
    ));
  }
}
