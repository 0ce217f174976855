//! Order-preserving editing of `.properties` files.
//!
//! This library loads properties documents into an editable in-memory model
//! that keeps every comment, blank line and property in its original place.
//! Keys can be read, set, deleted, commented and uncommented, and two
//! documents can be compared key by key.
//!
//! # Features
//!
//! - **Round-trip fidelity**: an unmodified document saves back byte for byte
//! - **Constant-time keyed access**: a key index sits beside the ordered lines
//! - **Comment management**: attach and detach comment blocks above a key
//! - **Typed access**: integer, float, boolean and custom conversions with defaults
//! - **Optional tracing**: Detailed logging when the `tracing` feature is enabled
//!
//! # Example
//!
//! ```rust
//! use propdoc::Document;
//!
//! let mut doc = Document::load_str("# Server\nport = 80\n");
//! doc.set("port", "8080");
//! doc.comment("port", "HTTP listener");
//!
//! assert_eq!(doc.int_or("port", 0), 8080);
//! assert_eq!(doc.export(), "# Server\n#HTTP listener\nport=8080\n");
//! ```

pub mod bind;
mod comment;
pub mod diff;
pub mod document;
pub mod edit;
pub mod line;
pub mod read;
pub mod save;
pub mod store;

pub use diff::{ChangeType, DiffEvent, SamePolicy, diff, diff_with};
pub use document::{Document, LoadError};
pub use line::{Line, LineKind, Property, Separator};
pub use save::SaveError;
