//! Typed access to property values.
//!
//! Every accessor falls back to a default when the key is missing or its
//! value does not convert. Conversion failures are never reported.

use std::str::FromStr;

use crate::document::Document;

const TRUE_TOKENS: [&str; 6] = ["1", "t", "T", "true", "TRUE", "True"];
const FALSE_TOKENS: [&str; 6] = ["0", "f", "F", "false", "FALSE", "False"];

/// Parses the canonical boolean spellings. Anything else, `fALSE` included, is `None`.
pub fn parse_bool(s: &str) -> Option<bool> {
  if TRUE_TOKENS.contains(&s) {
    Some(true)
  } else if FALSE_TOKENS.contains(&s) {
    Some(false)
  } else {
    None
  }
}

impl Document {
  /// Parses the value of `key` with [`FromStr`], or returns `default`.
  pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> T {
    self
      .get(key)
      .and_then(|value| value.parse().ok())
      .unwrap_or(default)
  }

  pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
    self.get(key).unwrap_or(default)
  }

  pub fn int_or(&self, key: &str, default: isize) -> isize {
    self.parse_or(key, default)
  }

  pub fn int64_or(&self, key: &str, default: i64) -> i64 {
    self.parse_or(key, default)
  }

  pub fn uint64_or(&self, key: &str, default: u64) -> u64 {
    self.parse_or(key, default)
  }

  pub fn float64_or(&self, key: &str, default: f64) -> f64 {
    self.parse_or(key, default)
  }

  /// Reads a boolean using [`parse_bool`].
  pub fn bool_or(&self, key: &str, default: bool) -> bool {
    self.get(key).and_then(parse_bool).unwrap_or(default)
  }

  /// Maps the value of `key` through `f`. An error from `f` yields `default`.
  pub fn object_or<T, E, F>(&self, key: &str, default: T, f: F) -> T
  where
    F: FnOnce(&str, &str) -> Result<T, E>,
  {
    self
      .get(key)
      .and_then(|value| f(key, value).ok())
      .unwrap_or(default)
  }

  pub fn string(&self, key: &str) -> &str {
    self.string_or(key, "")
  }

  pub fn int(&self, key: &str) -> isize {
    self.int_or(key, 0)
  }

  pub fn int64(&self, key: &str) -> i64 {
    self.int64_or(key, 0)
  }

  pub fn uint64(&self, key: &str) -> u64 {
    self.uint64_or(key, 0)
  }

  pub fn float64(&self, key: &str) -> f64 {
    self.float64_or(key, 0.0)
  }

  pub fn bool(&self, key: &str) -> bool {
    self.bool_or(key, false)
  }

  pub fn object<T, E, F>(&self, key: &str, f: F) -> T
  where
    T: Default,
    F: FnOnce(&str, &str) -> Result<T, E>,
  {
    self.object_or(key, T::default(), f)
  }
}
