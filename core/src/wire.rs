// core/src/wire.rs

//! Forgiving deserializers for values typed by people: query strings and
//! form-backed JSON bodies.
//!
//! A value that cannot be read becomes `None`, so the caller's default applies
//! instead of the whole request failing.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// The integer a query value starts with: optional sign, then digits.
/// Trailing text is ignored, so `"2.5"` reads as 2 and `"abc"` as nothing.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
  let s = raw.trim_start();
  let sign_len = usize::from(s.starts_with(['+', '-']));
  let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
  if digits == 0 {
    return None;
  }
  s[..sign_len + digits].parse().ok()
}

fn parse_decimal(raw: &str) -> Option<f64> {
  raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

struct LeadingInt;

impl<'de> Visitor<'de> for LeadingInt {
  type Value = Option<i64>;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("an integer or a string starting with one")
  }

  fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
    Ok(None)
  }

  fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
    Ok(None)
  }

  fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
    deserializer.deserialize_any(self)
  }

  fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
    Ok(None)
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
    Ok(Some(v))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
    Ok(i64::try_from(v).ok())
  }

  fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
    Ok(v.is_finite().then(|| v.trunc() as i64))
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
    Ok(parse_leading_int(v))
  }
}

struct Decimal;

impl<'de> Visitor<'de> for Decimal {
  type Value = Option<f64>;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a number or a numeric string")
  }

  fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
    Ok(None)
  }

  fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
    Ok(None)
  }

  fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
    deserializer.deserialize_any(self)
  }

  fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
    Ok(None)
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
    Ok(Some(v as f64))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
    Ok(Some(v as f64))
  }

  fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
    Ok(Some(v).filter(|v| v.is_finite()))
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
    Ok(parse_decimal(v))
  }
}

/// `deserialize_with` target for optional page numbers and sizes.
pub fn leading_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
  deserializer.deserialize_any(LeadingInt)
}

/// `deserialize_with` target for optional amounts sent as numbers or numeric strings.
pub fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
  deserializer.deserialize_any(Decimal)
}
