//! Binding properties onto typed structures.
//!
//! Binding only consumes lookups. A [`FieldSource`] resolves a field name
//! (plus an optional explicit key, the "tag") to a value, and a type
//! implementing [`FromProperties`] pulls its fields out of a [`Fields`] view.
//!
//! [`Document`] resolves a field by trying, in order: the name as written,
//! the tag, then the lowerCamel, snake_case, SNAKE_UPPER, kebab-case and
//! KEBAB-UPPER spellings of the name.
//!
//! ```rust
//! use propdoc::bind::{BindError, Fields, FromProperties};
//! use propdoc::Document;
//!
//! struct Order {
//!   price: i64,
//!   express: bool,
//! }
//!
//! impl FromProperties for Order {
//!   fn from_properties(fields: &Fields<'_>) -> Result<Self, BindError> {
//!     Ok(Order {
//!       price: fields.parse("OrderPrice", None).unwrap_or_default(),
//!       express: fields.flag("Express", Some("shipping.express")).unwrap_or(false),
//!     })
//!   }
//! }
//!
//! let doc = Document::load_str("ORDER_PRICE=100\nshipping.express=yes\n");
//! let order: Order = doc.populate().unwrap();
//! assert_eq!(order.price, 100);
//! assert!(order.express);
//! ```

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase};

use crate::document::Document;

/// Resolves a field to its raw value.
pub trait FieldSource {
  fn lookup(&self, field: &str, tag: Option<&str>) -> Option<&str>;
}

/// Types that can be built from a [`FieldSource`].
pub trait FromProperties: Sized {
  fn from_properties(fields: &Fields<'_>) -> Result<Self, BindError>;
}

impl FieldSource for Document {
  fn lookup(&self, field: &str, tag: Option<&str>) -> Option<&str> {
    if let Some(value) = self.get(field) {
      return Some(value);
    }
    if let Some(value) = tag.and_then(|tag| self.get(tag)) {
      return Some(value);
    }

    spellings(field).iter().find_map(|key| self.get(key))
  }
}

impl FieldSource for HashMap<String, String> {
  fn lookup(&self, field: &str, tag: Option<&str>) -> Option<&str> {
    self
      .get(field)
      .or_else(|| tag.and_then(|tag| self.get(tag)))
      .map(String::as_str)
  }
}

/// Typed view over a [`FieldSource`] handed to [`FromProperties`].
pub struct Fields<'a> {
  source: &'a dyn FieldSource,
}

impl<'a> Fields<'a> {
  pub fn new(source: &'a dyn FieldSource) -> Self {
    Self { source }
  }

  pub fn lookup(&self, field: &str, tag: Option<&str>) -> Option<&'a str> {
    self.source.lookup(field, tag)
  }

  pub fn string(&self, field: &str, tag: Option<&str>) -> Option<String> {
    self.lookup(field, tag).map(str::to_string)
  }

  /// Parses a present value with [`FromStr`]. A value that does not parse
  /// binds `T::default()`, so `num=abc` gives `Some(0)` for an integer.
  pub fn parse<T: FromStr + Default>(&self, field: &str, tag: Option<&str>) -> Option<T> {
    self
      .lookup(field, tag)
      .map(|value| value.parse().unwrap_or_default())
  }

  /// `true`, `yes`, `on` and `1` in any case are true; every other value is false.
  pub fn flag(&self, field: &str, tag: Option<&str>) -> Option<bool> {
    self.lookup(field, tag).map(|value| {
      matches!(
        value.to_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
      )
    })
  }

  /// Reads a duration such as `10s`, `1h30m` or `250ms`. This is the only
  /// accessor that rejects a present value.
  pub fn duration(&self, field: &str, tag: Option<&str>) -> Result<Option<Duration>, BindError> {
    self
      .lookup(field, tag)
      .map(|value| {
        parse_duration(value)
          .ok_or_else(|| BindError::invalid(field, value, "not a duration".to_string()))
      })
      .transpose()
  }

  /// Binds a nested structure from the same source.
  pub fn nested<T: FromProperties>(&self) -> Result<T, BindError> {
    T::from_properties(self)
  }
}

impl Document {
  /// Builds `T` from this document's properties.
  pub fn populate<T: FromProperties>(&self) -> Result<T, BindError> {
    T::from_properties(&Fields::new(self))
  }
}

#[derive(Debug, thiserror::Error)]
pub enum BindError {
  #[error("Invalid value {value:?} for field {field}: {reason}")]
  InvalidValue {
    field: String,
    value: String,
    reason: String,
  },
}

impl BindError {
  fn invalid(field: &str, value: &str, reason: String) -> Self {
    Self::InvalidValue {
      field: field.to_string(),
      value: value.to_string(),
      reason,
    }
  }
}

/// lowerCamel, snake_case, SNAKE_UPPER, kebab-case and KEBAB-UPPER spellings of `field`.
fn spellings(field: &str) -> [String; 5] {
  [
    field.to_lower_camel_case(),
    field.to_snake_case(),
    field.to_shouty_snake_case(),
    field.to_kebab_case(),
    field.to_shouty_kebab_case(),
  ]
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parses a sequence of `<number><unit>` pairs, e.g. `1h30m`, `+10s` or `1.5s`.
/// Fractions are truncated to whole nanoseconds.
fn parse_duration(s: &str) -> Option<Duration> {
  let s = s.trim();
  let s = s.strip_prefix('+').unwrap_or(s);
  if s.is_empty() {
    return None;
  }
  if s == "0" {
    return Some(Duration::ZERO);
  }

  let mut nanos: u128 = 0;
  let mut rest = s;
  while !rest.is_empty() {
    let (whole, after) = split_digits(rest);
    let (fraction, after) = match after.strip_prefix('.') {
      Some(after) => split_digits(after),
      None => ("", after),
    };
    if whole.is_empty() && fraction.is_empty() {
      return None;
    }

    let unit_len = after
      .find(|c: char| c.is_ascii_digit() || c == '.')
      .unwrap_or(after.len());
    let scale: u128 = match &after[..unit_len] {
      "ns" => 1,
      "us" | "µs" | "μs" => 1_000,
      "ms" => 1_000_000,
      "s" => NANOS_PER_SEC,
      "m" => 60 * NANOS_PER_SEC,
      "h" => 3600 * NANOS_PER_SEC,
      _ => return None,
    };
    rest = &after[unit_len..];

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    nanos = nanos.checked_add(whole.checked_mul(scale)?)?;

    // Digits past the 20th are below a nanosecond at any unit.
    let fraction = &fraction[..fraction.len().min(20)];
    if !fraction.is_empty() {
      let numerator: u128 = fraction.parse().ok()?;
      let denominator = 10u128.pow(fraction.len() as u32);
      nanos = nanos.checked_add(numerator.checked_mul(scale)? / denominator)?;
    }
  }

  let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
  Some(Duration::new(secs, (nanos % NANOS_PER_SEC) as u32))
}

fn split_digits(s: &str) -> (&str, &str) {
  let len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
  s.split_at(len)
}
