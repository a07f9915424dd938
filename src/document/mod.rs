//! Value graphs described as JSON documents
//!
//! Used by the `to-api` binary and by tests that want realistic record
//! graphs without writing model types.

mod error;
mod loader;

use std::fs;
use std::path::Path;

pub use error::{DocumentError, DocumentResult};
pub use loader::{RecordDocument, load_value};

use crate::core::Value;

/// Parse a document from a JSON string.
pub fn load_str(source: &str) -> DocumentResult<Value> {
    let json: serde_json::Value = serde_json::from_str(source)?;
    load_value(&json)
}

/// Read and parse a document file.
pub fn load_file(path: impl AsRef<Path>) -> DocumentResult<Value> {
    let source = fs::read_to_string(path)?;
    load_str(&source)
}
