//! File-level editing of properties documents.
//!
//! [`PropEdit`] loads a file, applies one [`Operation`] and writes the result
//! back only when the document changed. Untouched lines keep their original
//! text and position. [`PropEdit::format`] rewrites a whole file in
//! normalized form.
//!
//! # Examples
//!
//! ```rust,no_run
//! use propdoc::edit::{EditOptions, Operation, PropEdit};
//! use std::path::PathBuf;
//!
//! let options = EditOptions {
//!     file: PathBuf::from("app.properties"),
//!     create: true,
//! };
//!
//! PropEdit::run(
//!     options,
//!     Operation::Set {
//!         key: "server.port".to_string(),
//!         value: "8080".to_string(),
//!     },
//! )
//! .unwrap();
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::diff::{self, DiffEvent, SamePolicy};
use crate::document::{self, Document, LoadError};
use crate::save::SaveError;

/// A single edit applied to a properties file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
  Get { key: String },
  Set { key: String, value: String },
  Del { key: String },
  Comment { key: String, text: String },
  Uncomment { key: String },
  /// All properties in file order
  List,
}

/// What an [`Operation`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// Value read by `Get`, `None` if the key is missing
  Value(Option<String>),
  /// Previous value replaced by `Set`
  Replaced(Option<String>),
  /// Whether the key existed, for `Del`, `Comment` and `Uncomment`
  Existed(bool),
  Properties(Vec<(String, String)>),
}

/// Editing service for properties files.
pub struct PropEdit;

impl PropEdit {
  /// Applies `operation` to the file described by `options`.
  ///
  /// A missing file is created empty when `options.create` is set, otherwise
  /// it is an error.
  pub fn run(options: EditOptions, operation: Operation) -> Result<Outcome, PropEditError> {
    #[cfg(feature = "tracing")]
    info!("Running {:?} on {:?}", operation, options.file);

    let EditOptions { file, create } = options;
    Self::ensure_exists(&file, create)?;

    let mut doc = Document::load_file(&file)?;
    let (outcome, dirty) = Self::apply(&mut doc, operation);

    if dirty {
      Self::write(&doc, &file)?;
    }

    Ok(outcome)
  }

  /// Rewrites the file in normalized form, returning whether its content changed.
  pub fn format(options: EditOptions) -> Result<bool, PropEditError> {
    #[cfg(feature = "tracing")]
    info!("Formatting {:?}", options.file);

    let EditOptions { file, create } = options;
    Self::ensure_exists(&file, create)?;

    let mut original = String::new();
    document::open(&file)?
      .read_to_string(&mut original)
      .map_err(LoadError::Io)?;

    let doc = Document::load_str(&original);
    let changed = doc.export() != original;
    if changed {
      Self::write(&doc, &file)?;
    }

    Ok(changed)
  }

  /// Applies `operation` in memory, reporting whether the document changed.
  pub fn apply(doc: &mut Document, operation: Operation) -> (Outcome, bool) {
    match operation {
      Operation::Get { key } => (Outcome::Value(doc.get(&key).map(str::to_string)), false),
      Operation::Set { key, value } => {
        let changed = doc.get(&key) != Some(value.as_str());
        (Outcome::Replaced(doc.set(&key, value)), changed)
      }
      Operation::Del { key } => {
        let existed = doc.del(&key);
        (Outcome::Existed(existed), existed)
      }
      Operation::Comment { key, text } => {
        let existed = doc.comment(&key, &text);
        (Outcome::Existed(existed), existed)
      }
      Operation::Uncomment { key } => {
        let before = doc.line_count();
        let existed = doc.uncomment(&key);
        (Outcome::Existed(existed), doc.line_count() != before)
      }
      Operation::List => {
        let properties = doc
          .properties()
          .map(|prop| (prop.key.clone(), prop.value.clone()))
          .collect();
        (Outcome::Properties(properties), false)
      }
    }
  }

  /// Loads both files and diffs `left` against `right`.
  pub fn diff_files<P: AsRef<Path>>(
    left: P,
    right: P,
    policy: SamePolicy,
  ) -> Result<Vec<DiffEvent>, PropEditError> {
    let left = Document::load_file(left)?;
    let right = Document::load_file(right)?;

    let events = diff::changes(&left, &right, policy);

    #[cfg(feature = "tracing")]
    debug!("Diff produced {} events", events.len());

    Ok(events)
  }

  /// A missing file is created empty when `create` is set, otherwise it is an error.
  fn ensure_exists(file: &Path, create: bool) -> Result<(), PropEditError> {
    if file.exists() {
      return Ok(());
    }
    if !create {
      return Err(PropEditError::FileNotFound(file.to_path_buf()));
    }

    #[cfg(feature = "tracing")]
    debug!("Creating properties file: {:?}", file);
    std::fs::write(file, "").map_err(PropEditError::Create)
  }

  fn write(doc: &Document, path: &Path) -> Result<(), PropEditError> {
    #[cfg(feature = "tracing")]
    debug!("Writing edited content to {:?}", path);

    doc.export_file(path)?;

    #[cfg(feature = "tracing")]
    info!("Edit completed successfully");

    Ok(())
  }
}

/// Errors that can occur while editing a properties file.
#[derive(Debug, thiserror::Error)]
pub enum PropEditError {
  /// The file does not exist and creation was not requested
  #[error("Properties file not found: {0:?}")]
  FileNotFound(PathBuf),
  /// Error creating a missing file
  #[error("Failed to create properties file: {0}")]
  Create(std::io::Error),
  #[error(transparent)]
  Load(#[from] LoadError),
  #[error(transparent)]
  Save(#[from] SaveError),
}

/// Configuration options for editing a properties file.
pub struct EditOptions {
  /// Path to the properties file.
  pub file: PathBuf,
  /// Create the file if it does not exist.
  pub create: bool,
}
