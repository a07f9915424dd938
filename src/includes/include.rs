use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One include request as the caller wrote it.
///
/// The three shapes can be mixed freely:
/// - `"comments"` expands a relation with no sub-includes,
/// - `{"comments": "author"}` or `{"comments": ["author", {...}]}` expands it
///   and hands the value down as that relation's own includes,
/// - `["comments", {"tags": "owner"}]` groups several requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Include {
    Name(String),
    Map(IndexMap<String, Include>),
    List(Vec<Include>),
}

impl Include {
    /// Lenient conversion from arbitrary JSON.
    ///
    /// Shapes with no include meaning (numbers, booleans, null) become an
    /// empty list, which requests nothing.
    pub fn from_json(json: &JsonValue) -> Self {
        match json {
            JsonValue::String(s) => Self::Name(s.clone()),
            JsonValue::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            JsonValue::Object(map) => Self::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
            _ => Self::List(Vec::new()),
        }
    }

    pub fn map<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Include>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Name(_) => false,
            Self::Map(map) => map.is_empty(),
            Self::List(items) => items.iter().all(Self::is_empty),
        }
    }
}

impl From<&str> for Include {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Include {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl<T: Into<Include>> From<Vec<T>> for Include {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Include>> for Include {
    fn from(map: IndexMap<String, Include>) -> Self {
        Self::Map(map)
    }
}
