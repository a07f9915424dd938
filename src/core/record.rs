//! Record collaborator interface
//!
//! A record is anything with attributes and named relations. The data layer
//! that actually stores records lives outside this crate; `to_api` only needs
//! read access through the [`Record`] trait.
//!
//! [`Entity`] is an in-memory record assembled with a builder. It backs the
//! document loader and is handy wherever a full model type would be overkill.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::Value;

/// Read access a record must give the converter.
pub trait Record: fmt::Debug + Send + Sync {
    /// Name of the model, used in diagnostics only.
    fn model_name(&self) -> &str {
        "record"
    }

    /// The record's own attributes.
    fn attributes(&self) -> IndexMap<String, Value>;

    /// Names of the associations the underlying model declares.
    fn declared_relations(&self) -> BTreeSet<String>;

    /// Accessor by name. `None` when the record has no such accessor.
    fn relation(&self, name: &str) -> Option<Value>;

    /// Explicit allow-list. When present it replaces `declared_relations`
    /// as the set of names that may be expanded.
    fn valid_api_includes(&self) -> Option<BTreeSet<String>> {
        None
    }

    /// Names that includes are allowed to expand on this record.
    fn expandable_relations(&self) -> BTreeSet<String> {
        self.valid_api_includes()
            .unwrap_or_else(|| self.declared_relations())
    }
}

type Accessor = Arc<dyn Fn() -> Value + Send + Sync>;

/// Record built in memory from attributes and accessor closures.
///
/// # Examples
///
/// ```
/// use to_api::{Entity, Include, Value, to_api};
///
/// let comment = Entity::new("Comment").attribute("body", "first!");
/// let post = Entity::new("Post")
///     .attribute("title", "Hello")
///     .with_relation("comments", move || vec![Value::record(comment.clone())].into());
///
/// let api = to_api(&Value::record(post), &[Include::from("comments")]).unwrap();
/// assert_eq!(api["comments"][0]["body"], "first!");
/// ```
#[derive(Clone)]
pub struct Entity {
    model: String,
    attributes: IndexMap<String, Value>,
    relations: BTreeSet<String>,
    accessors: IndexMap<String, Accessor>,
    valid_api_includes: Option<BTreeSet<String>>,
}

impl Entity {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            attributes: IndexMap::new(),
            relations: BTreeSet::new(),
            accessors: IndexMap::new(),
            valid_api_includes: None,
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Declare an association and the accessor that loads it.
    pub fn with_relation<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        let name = name.into();
        self.relations.insert(name.clone());
        self.accessors.insert(name, Arc::new(accessor));
        self
    }

    /// Register an accessor that is not a declared association.
    /// It is only reachable through `valid_api_includes`.
    pub fn with_accessor<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.accessors.insert(name.into(), Arc::new(accessor));
        self
    }

    pub fn with_valid_api_includes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_api_includes = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("model", &self.model)
            .field("attributes", &self.attributes)
            .field("relations", &self.relations)
            .field("accessors", &self.accessors.keys().collect::<Vec<_>>())
            .field("valid_api_includes", &self.valid_api_includes)
            .finish()
    }
}

impl Record for Entity {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn attributes(&self) -> IndexMap<String, Value> {
        self.attributes.clone()
    }

    fn declared_relations(&self) -> BTreeSet<String> {
        self.relations.clone()
    }

    fn relation(&self, name: &str) -> Option<Value> {
        self.accessors.get(name).map(|accessor| accessor())
    }

    fn valid_api_includes(&self) -> Option<BTreeSet<String>> {
        self.valid_api_includes.clone()
    }
}
