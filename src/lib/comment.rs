//! Attaching and detaching comment blocks.
//!
//! Comments have no link to the property they describe. A comment belongs to
//! a property when it sits in the unbroken run of comment lines directly
//! above it.

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::document::Document;
use crate::line::Line;

impl Document {
  /// Inserts `comments` directly above `key`, one `#` line per line of text.
  ///
  /// An empty `comments` inserts a lone `#`. Repeated calls stack up, with the
  /// most recent block closest to the property. Returns `false` if the key
  /// does not exist.
  pub fn comment(&mut self, key: &str, comments: &str) -> bool {
    let Some(&handle) = self.index.get(key) else {
      return false;
    };

    if comments.is_empty() {
      self.lines.insert_before(handle, Line::comment(""));
    } else {
      for text in comments.lines() {
        self.lines.insert_before(handle, Line::comment(text));
      }
    }

    #[cfg(feature = "tracing")]
    debug!("Commented {} with {} line(s)", key, comments.lines().count().max(1));

    true
  }

  /// Removes the comment block attached directly above `key`.
  ///
  /// Stops at the first blank or property line. Returns `false` if the key
  /// does not exist.
  pub fn uncomment(&mut self, key: &str) -> bool {
    let Some(&handle) = self.index.get(key) else {
      return false;
    };

    let mut cursor = self.lines.prev(handle);
    while let Some(current) = cursor {
      if !self.lines.get(current).is_some_and(Line::is_comment) {
        break;
      }
      cursor = self.lines.prev(current);
      self.lines.remove(current);
    }

    #[cfg(feature = "tracing")]
    debug!("Uncommented {}", key);

    true
  }
}
