//! The in-memory properties document.
//!
//! A [`Document`] keeps every physical line in file order and maintains a key
//! index on the side for constant-time lookup. The sequence alone decides what
//! gets written back; the index only accelerates access to property lines.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::{ControlFlow, Index};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::line::{Line, Property};
use crate::store::{Handle, LineStore};

#[derive(Debug, Clone, Default)]
pub struct Document {
  pub(crate) lines: LineStore<Line>,
  pub(crate) index: HashMap<String, Handle>,
}

impl Document {
  /// Creates an empty document.
  pub fn new() -> Self {
    Self::default()
  }

  /// Reads a document line by line from `reader`.
  ///
  /// Any read failure aborts the load. Line content itself is never rejected.
  pub fn load<R: BufRead>(reader: R) -> Result<Self, LoadError> {
    let mut doc = Self::new();
    for line in reader.lines() {
      let line = line.map_err(LoadError::Io)?;
      doc.push_line(Line::from(line.as_str()));
    }

    #[cfg(feature = "tracing")]
    debug!(
      "Loaded {} lines with {} properties",
      doc.lines.len(),
      doc.index.len()
    );

    Ok(doc)
  }

  pub fn load_str(s: &str) -> Self {
    let mut doc = Self::new();
    for line in s.lines() {
      doc.push_line(Line::from(line));
    }
    doc
  }

  /// Loads from raw bytes. Invalid UTF-8 is reported as [`LoadError::Io`].
  pub fn load_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
    Self::load(bytes)
  }

  pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
    let path = path.as_ref();

    #[cfg(feature = "tracing")]
    debug!("Loading properties from {:?}", path);

    Self::load(BufReader::new(open(path)?))
  }

  /// Current value of `key`, if present.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.property(key).map(|prop| prop.value.as_str())
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.index.contains_key(key)
  }

  /// Sets `key` to `value`, returning the previous value.
  ///
  /// An existing property is updated in place and keeps its position and
  /// separator. A new property is appended at the end with `=`.
  pub fn set(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
    let value = value.into();

    if let Some(prop) = self
      .index
      .get(key)
      .copied()
      .and_then(|handle| self.lines.get_mut(handle))
      .and_then(Line::as_property_mut)
    {
      #[cfg(feature = "tracing")]
      trace!("Updating {}: {:?} -> {:?}", key, prop.value, value);

      return Some(std::mem::replace(&mut prop.value, value));
    }

    #[cfg(feature = "tracing")]
    trace!("Appending new property {}", key);

    self.push_line(Line::Property(Property::new(key, value)));
    None
  }

  /// Removes `key` together with the comment block attached above it.
  ///
  /// Returns whether the key existed.
  pub fn del(&mut self, key: &str) -> bool {
    if !self.uncomment(key) {
      return false;
    }

    if let Some(handle) = self.index.remove(key) {
      self.lines.remove(handle);
    }

    #[cfg(feature = "tracing")]
    debug!("Deleted property {}", key);

    true
  }

  /// Visits property lines in document order until `f` breaks.
  pub fn for_each_property<B, F>(&self, mut f: F) -> ControlFlow<B>
  where
    F: FnMut(&Property) -> ControlFlow<B>,
  {
    for prop in self.properties() {
      f(prop)?;
    }
    ControlFlow::Continue(())
  }

  /// Visits every line (blank, comment and property) in document order until `f` breaks.
  pub fn accept<B, F>(&self, mut f: F) -> ControlFlow<B>
  where
    F: FnMut(&Line) -> ControlFlow<B>,
  {
    for line in self.lines() {
      f(line)?;
    }
    ControlFlow::Continue(())
  }

  pub fn properties(&self) -> impl Iterator<Item = &Property> {
    self.lines.iter().filter_map(Line::as_property)
  }

  pub fn lines(&self) -> impl Iterator<Item = &Line> {
    self.lines.iter()
  }

  /// Snapshot of all properties. For repeated keys the last line wins.
  pub fn to_map(&self) -> HashMap<String, String> {
    self
      .properties()
      .map(|prop| (prop.key.clone(), prop.value.clone()))
      .collect()
  }

  /// Number of distinct keys.
  pub fn len(&self) -> usize {
    self.index.len()
  }

  pub fn is_empty(&self) -> bool {
    self.index.is_empty()
  }

  /// Number of physical lines, comments and blanks included.
  pub fn line_count(&self) -> usize {
    self.lines.len()
  }

  pub(crate) fn property(&self, key: &str) -> Option<&Property> {
    let handle = *self.index.get(key)?;
    self.lines.get(handle).and_then(Line::as_property)
  }

  fn push_line(&mut self, line: Line) {
    let key = line.as_property().map(|prop| prop.key.clone());
    let handle = self.lines.push_back(line);
    if let Some(key) = key {
      self.index.insert(key, handle);
    }
  }
}

impl PartialEq for Document {
  fn eq(&self, other: &Self) -> bool {
    self.lines.iter().eq(other.lines.iter())
  }
}

impl Eq for Document {}

impl From<&str> for Document {
  fn from(s: &str) -> Self {
    Self::load_str(s)
  }
}

impl FromStr for Document {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::load_str(s))
  }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Document {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut doc = Self::new();
    doc.extend(iter);
    doc
  }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for Document {
  fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
    for (key, value) in iter {
      self.set(key.as_ref(), value);
    }
  }
}

impl Index<&str> for Document {
  type Output = str;

  /// Returns the value of `key`.
  ///
  /// # Panics
  ///
  /// Panics if the key is not present.
  fn index(&self, key: &str) -> &Self::Output {
    match self.get(key) {
      Some(value) => value,
      None => panic!("no property named {:?}", key),
    }
  }
}

/// Opens `path` for reading, reporting failure as [`LoadError::Open`].
pub(crate) fn open(path: &Path) -> Result<File, LoadError> {
  File::open(path).map_err(|source| LoadError::Open {
    path: path.to_path_buf(),
    source,
  })
}

/// Errors that can occur while loading a document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  /// The source file could not be opened
  #[error("Failed to open {path:?}: {source}")]
  Open { path: PathBuf, source: io::Error },
  /// Reading from the source failed
  #[error("Read error: {0}")]
  Io(io::Error),
}
