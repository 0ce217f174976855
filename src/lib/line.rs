//! Line classification for the properties format.
//!
//! Every physical line of a properties document is exactly one of:
//!
//! - a blank line (empty, or whitespace only),
//! - a comment line (first non-whitespace character is `#` or `!`),
//! - a property line (`key=value`, `key:value`, or a bare `key`).
//!
//! Classification never fails: unusual lines are accepted as properties.

use std::fmt;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Leader written in front of comment lines created by [`Line::comment`].
pub const COMMENT_LEADER: char = '#';
/// Alternative comment leader accepted on input.
pub const ALT_COMMENT_LEADER: char = '!';

/// Character separating a key from its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Separator {
  #[default]
  Equals,
  Colon,
}

impl Separator {
  pub fn as_char(self) -> char {
    match self {
      Separator::Equals => '=',
      Separator::Colon => ':',
    }
  }

  fn from_char(c: char) -> Option<Self> {
    match c {
      '=' => Some(Separator::Equals),
      ':' => Some(Separator::Colon),
      _ => None,
    }
  }
}

impl fmt::Display for Separator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_char())
  }
}

/// The kind of a [`Line`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
  Blank,
  Comment,
  Property,
}

/// A key/value pair as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
  pub key: String,
  pub value: String,
  pub separator: Separator,
}

impl Property {
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
      separator: Separator::default(),
    }
  }
}

impl fmt::Display for Property {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}{}", self.key, self.separator, self.value)
  }
}

/// One physical line of a properties document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
  Blank,
  /// Verbatim comment text, leader included.
  Comment(String),
  Property(Property),
}

impl Line {
  /// Builds a comment line by prefixing `text` with [`COMMENT_LEADER`].
  pub fn comment(text: &str) -> Self {
    let mut raw = String::with_capacity(text.len() + 1);
    raw.push(COMMENT_LEADER);
    raw.push_str(text);
    Line::Comment(raw)
  }

  pub fn kind(&self) -> LineKind {
    match self {
      Line::Blank => LineKind::Blank,
      Line::Comment(_) => LineKind::Comment,
      Line::Property(_) => LineKind::Property,
    }
  }

  /// The key of a property line, or `""` for any other line.
  pub fn key(&self) -> &str {
    match self {
      Line::Property(prop) => &prop.key,
      _ => "",
    }
  }

  /// The value of a property line, the raw text of a comment, or `""` for a blank line.
  pub fn value(&self) -> &str {
    match self {
      Line::Blank => "",
      Line::Comment(raw) => raw,
      Line::Property(prop) => &prop.value,
    }
  }

  pub fn as_property(&self) -> Option<&Property> {
    match self {
      Line::Property(prop) => Some(prop),
      _ => None,
    }
  }

  pub fn as_property_mut(&mut self) -> Option<&mut Property> {
    match self {
      Line::Property(prop) => Some(prop),
      _ => None,
    }
  }

  pub fn is_property(&self) -> bool {
    matches!(self, Line::Property(_))
  }

  pub fn is_comment(&self) -> bool {
    matches!(self, Line::Comment(_))
  }
}

impl From<&str> for Line {
  fn from(s: &str) -> Self {
    #[cfg(feature = "tracing")]
    trace!("Classifying line: {:?}", s);

    let Some((pos, first)) = s.char_indices().find(|(_, c)| !c.is_whitespace()) else {
      return Line::Blank;
    };

    if first == COMMENT_LEADER || first == ALT_COMMENT_LEADER {
      return Line::Comment(s.to_string());
    }

    // The first character always belongs to the key, so the scan starts after it.
    let scan_from = pos + first.len_utf8();
    let found = s[scan_from..]
      .char_indices()
      .find_map(|(offset, c)| Separator::from_char(c).map(|sep| (scan_from + offset, sep)));

    let property = match found {
      Some((at, separator)) => Property {
        key: s[pos..at].trim_end().to_string(),
        value: s[at + 1..].trim().to_string(),
        separator,
      },
      None => Property::new(s[pos..].trim_end(), ""),
    };

    #[cfg(feature = "tracing")]
    trace!(
      "Parsed property: key={:?}, value={:?}, separator={}",
      property.key, property.value, property.separator
    );

    Line::Property(property)
  }
}

impl fmt::Display for Line {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Line::Blank => Ok(()),
      Line::Comment(raw) => write!(f, "{}", raw),
      Line::Property(prop) => write!(f, "{}", prop),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn property(line: &str) -> Property {
    match Line::from(line) {
      Line::Property(prop) => prop,
      other => panic!("Expected property, got {:?}", other),
    }
  }

  #[test]
  fn test_blank_lines() {
    assert_eq!(Line::from(""), Line::Blank);
    assert_eq!(Line::from("   "), Line::Blank);
    assert_eq!(Line::from("\t \t"), Line::Blank);
  }

  #[test]
  fn test_comment_lines_keep_raw_text() {
    assert_eq!(
      Line::from("# commment1"),
      Line::Comment("# commment1".to_string())
    );
    assert_eq!(
      Line::from("!comment2"),
      Line::Comment("!comment2".to_string())
    );
    assert_eq!(
      Line::from("   #indented"),
      Line::Comment("   #indented".to_string())
    );
  }

  #[test]
  fn test_equals_and_colon_separators() {
    let prop = property("a=aa");
    assert_eq!(prop.key, "a");
    assert_eq!(prop.value, "aa");
    assert_eq!(prop.separator, Separator::Equals);

    let prop = property("ee: r-rt rr");
    assert_eq!(prop.key, "ee");
    assert_eq!(prop.value, "r-rt rr");
    assert_eq!(prop.separator, Separator::Colon);
  }

  #[test]
  fn test_key_with_interior_spaces() {
    let prop = property("    c ccc = cccc  ");
    assert_eq!(prop.key, "c ccc");
    assert_eq!(prop.value, "cccc");
  }

  #[test]
  fn test_key_without_separator() {
    let prop = property("  dd  ");
    assert_eq!(prop.key, "dd");
    assert_eq!(prop.value, "");
    assert_eq!(prop.separator, Separator::Equals);
    assert_eq!(property("dd="), prop);
  }

  #[test]
  fn test_first_separator_wins() {
    let prop = property("url: http://host:80/a=b");
    assert_eq!(prop.key, "url");
    assert_eq!(prop.value, "http://host:80/a=b");
    assert_eq!(prop.separator, Separator::Colon);
  }

  #[test]
  fn test_leading_separator_is_part_of_key() {
    // The scan starts after the first non-whitespace character.
    let prop = property("=x=y");
    assert_eq!(prop.key, "=x");
    assert_eq!(prop.value, "y");
  }

  #[test]
  fn test_single_character_key() {
    let prop = property("k:v");
    assert_eq!(prop.key, "k");
    assert_eq!(prop.separator, Separator::Colon);
    assert_eq!(prop.value, "v");
  }

  #[test]
  fn test_display() {
    assert_eq!(Line::from("key 2 : 2").to_string(), "key 2:2");
    assert_eq!(Line::from("! note").to_string(), "! note");
    assert_eq!(Line::Blank.to_string(), "");
    assert_eq!(Line::comment("hello").to_string(), "#hello");
    assert_eq!(Line::comment("").to_string(), "#");
  }

  #[test]
  fn test_accessors() {
    let line = Line::from("x = 1");
    assert_eq!(line.kind(), LineKind::Property);
    assert_eq!(line.key(), "x");
    assert_eq!(line.value(), "1");

    let line = Line::from("#c");
    assert_eq!(line.kind(), LineKind::Comment);
    assert_eq!(line.key(), "");
    assert_eq!(line.value(), "#c");
  }
}
