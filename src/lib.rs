// ============================================================================
// to_api Library
// ============================================================================

//! Include-aware conversion of values and domain records into plain API trees.
//!
//! `to_api` turns scalars, collections and records into `serde_json::Value`.
//! Records only render their attributes unless the caller asks for relations
//! through includes, which may nest to reach relations of relations:
//!
//! ```
//! use to_api::{Entity, Include, Value, to_api};
//!
//! let author = Entity::new("User").attribute("name", "ada");
//! let comment = Entity::new("Comment")
//!     .attribute("body", "nice")
//!     .with_relation("author", move || Value::record(author.clone()));
//! let post = Entity::new("Post")
//!     .attribute("title", "Hello")
//!     .with_relation("comments", move || vec![Value::record(comment.clone())].into());
//!
//! let api = to_api(
//!     &Value::record(post),
//!     &[Include::map([("comments", "author")])],
//! )
//! .unwrap();
//!
//! assert_eq!(api["title"], "Hello");
//! assert_eq!(api["comments"][0]["author"]["name"], "ada");
//! ```
//!
//! Includes that do not name an expandable relation are ignored.

pub mod convert;
pub mod core;
pub mod document;
pub mod includes;

// Re-export main types for convenience
pub use convert::{ApiConverter, ConverterConfig, ToApi, to_api};
pub use crate::core::{ApiError, Entity, Record, Result, Symbol, Value};
pub use includes::{Include, Includes};
