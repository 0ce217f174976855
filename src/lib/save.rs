//! Rendering a document back to text.
//!
//! Output is produced line by line in document order, each line terminated
//! by `\n`. An unmodified document reproduces its input exactly, except that
//! whitespace-only lines come out empty.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::document::Document;

impl Document {
  /// Writes the document to `writer`, stopping at the first write error.
  pub fn save<W: Write>(&self, mut writer: W) -> io::Result<()> {
    match self.accept(|line| match writeln!(writer, "{}", line) {
      Ok(()) => ControlFlow::Continue(()),
      Err(err) => ControlFlow::Break(err),
    }) {
      ControlFlow::Break(err) => Err(err),
      ControlFlow::Continue(()) => Ok(()),
    }
  }

  /// Renders the document to a string.
  pub fn export(&self) -> String {
    self.to_string()
  }

  /// Writes the document to `path`, creating or truncating the file.
  pub fn export_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveError> {
    let path = path.as_ref();

    #[cfg(feature = "tracing")]
    debug!("Writing {} lines to {:?}", self.line_count(), path);

    let file = File::create(path).map_err(|source| SaveError::Create {
      path: path.to_path_buf(),
      source,
    })?;

    let mut writer = BufWriter::new(file);
    self.save(&mut writer).map_err(SaveError::Write)?;
    writer.flush().map_err(SaveError::Write)
  }
}

impl fmt::Display for Document {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for line in self.lines() {
      writeln!(f, "{}", line)?;
    }
    Ok(())
  }
}

/// Errors that can occur while writing a document to disk.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
  /// The target file could not be created
  #[error("Failed to create {path:?}: {source}")]
  Create { path: PathBuf, source: io::Error },
  /// Writing the content failed
  #[error("Write error: {0}")]
  Write(io::Error),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_roundtrip_unmodified() {
    let input = "# Comment\nKEY=value\n\n! Orphan\nTEST:123\nc ccc=cccc\nbare\n";
    let doc = Document::load_str(input);
    assert_eq!(doc.export(), input);
  }

  #[test]
  fn test_whitespace_lines_are_normalized() {
    let doc = Document::load_str("a=1\n   \nb=2\n");
    assert_eq!(doc.export(), "a=1\n\nb=2\n");
  }

  #[test]
  fn test_trimmed_whitespace_is_not_restored() {
    let doc = Document::load_str("  key 2 =   2  ");
    assert_eq!(doc.export(), "key 2=2\n");
  }

  #[test]
  fn test_save_matches_display() {
    let mut doc = Document::load_str("x: 1\n# note\n");
    doc.set("y", "2");

    let mut buf = Vec::new();
    doc.save(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), doc.to_string());
    assert_eq!(doc.to_string(), "x:1\n# note\ny=2\n");
  }

  #[test]
  fn test_empty_document() {
    assert_eq!(Document::new().export(), "");
  }

  #[test]
  fn test_save_reports_write_errors() {
    struct Broken;

    impl Write for Broken {
      fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("broken pipe"))
      }

      fn flush(&mut self) -> io::Result<()> {
        Ok(())
      }
    }

    let doc = Document::load_str("a=1\n");
    assert!(doc.save(Broken).is_err());
  }
}
