//! Key-level comparison of two documents.
//!
//! Events for keys present in the right-hand document come first, in its
//! line order. Keys only found on the left follow as [`ChangeType::Removed`].

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
  Modified,
  Added,
  Removed,
  Same,
}

/// One classified change between a left and a right document.
///
/// `left_value` is empty for [`ChangeType::Added`], `right_value` is empty
/// for [`ChangeType::Removed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEvent {
  pub change_type: ChangeType,
  pub key: String,
  pub left_value: String,
  pub right_value: String,
}

impl DiffEvent {
  fn new(change_type: ChangeType, key: &str, left_value: &str, right_value: &str) -> Self {
    Self {
      change_type,
      key: key.to_string(),
      left_value: left_value.to_string(),
      right_value: right_value.to_string(),
    }
  }

  /// The same change seen from the other side.
  pub fn inverse(&self) -> Self {
    let change_type = match self.change_type {
      ChangeType::Added => ChangeType::Removed,
      ChangeType::Removed => ChangeType::Added,
      other => other,
    };
    Self {
      change_type,
      key: self.key.clone(),
      left_value: self.right_value.clone(),
      right_value: self.left_value.clone(),
    }
  }
}

impl fmt::Display for DiffEvent {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.change_type {
      ChangeType::Modified => write!(
        f,
        "~ {}: {} -> {}",
        self.key, self.left_value, self.right_value
      ),
      ChangeType::Added => write!(f, "+ {}={}", self.key, self.right_value),
      ChangeType::Removed => write!(f, "- {}={}", self.key, self.left_value),
      ChangeType::Same => write!(f, "  {}={}", self.key, self.left_value),
    }
  }
}

/// Whether unchanged keys produce [`ChangeType::Same`] events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamePolicy {
  #[default]
  Emit,
  Skip,
}

/// Diffs `left` against `right`, reporting every key including unchanged ones.
pub fn diff<F: FnMut(DiffEvent)>(left: &Document, right: &Document, f: F) {
  diff_with(left, right, SamePolicy::Emit, f)
}

pub fn diff_with<F: FnMut(DiffEvent)>(
  left: &Document,
  right: &Document,
  policy: SamePolicy,
  mut f: F,
) {
  let mut remaining: HashMap<&str, &str> = left
    .properties()
    .map(|prop| (prop.key.as_str(), prop.value.as_str()))
    .collect();

  #[cfg(feature = "tracing")]
  debug!(
    "Diffing {} left keys against {} right keys",
    remaining.len(),
    right.len()
  );

  for prop in right.properties() {
    match remaining.remove(prop.key.as_str()) {
      Some(left_value) if left_value != prop.value => f(DiffEvent::new(
        ChangeType::Modified,
        &prop.key,
        left_value,
        &prop.value,
      )),
      Some(left_value) => {
        if policy == SamePolicy::Emit {
          f(DiffEvent::new(ChangeType::Same, &prop.key, left_value, &prop.value))
        }
      }
      None => f(DiffEvent::new(ChangeType::Added, &prop.key, "", &prop.value)),
    }
  }

  for prop in left.properties() {
    if let Some(left_value) = remaining.remove(prop.key.as_str()) {
      f(DiffEvent::new(ChangeType::Removed, &prop.key, left_value, ""));
    }
  }
}

/// Collects the events of [`diff_with`] into a vector.
pub fn changes(left: &Document, right: &Document, policy: SamePolicy) -> Vec<DiffEvent> {
  let mut events = Vec::new();
  diff_with(left, right, policy, |event| events.push(event));
  events
}
