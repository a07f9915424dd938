use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::Include;

/// Canonical includes: relation name to the sub-includes routed to it.
///
/// Built fresh for every record conversion and dropped when it finishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Includes {
    requested: IndexMap<String, Vec<Include>>,
}

impl Includes {
    /// Collapse the caller's include arguments into the canonical mapping.
    ///
    /// Top-level lists are flattened one level. A name that shows up both
    /// bare and with sub-includes keeps the sub-includes, whichever came
    /// first. Among several sub-include forms the last one wins.
    pub fn normalize(args: &[Include]) -> Self {
        let mut includes = Self::default();
        for arg in args {
            match arg {
                Include::List(items) => items.iter().for_each(|item| includes.apply(item)),
                other => includes.apply(other),
            }
        }
        includes
    }

    fn apply(&mut self, item: &Include) {
        match item {
            Include::Name(name) => self.merge(name, Vec::new()),
            Include::Map(map) => {
                for (name, sub) in map {
                    self.merge(name, sub_includes(sub));
                }
            }
            Include::List(items) => {
                debug!(len = items.len(), "ignoring include list nested below the top level");
            }
        }
    }

    fn merge(&mut self, name: &str, sub: Vec<Include>) {
        if sub.iter().all(Include::is_empty) {
            self.requested.entry(name.to_string()).or_default();
        } else {
            self.requested.insert(name.to_string(), sub);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Include]> {
        self.requested.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.requested.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Include])> {
        self.requested
            .iter()
            .map(|(name, sub)| (name.as_str(), sub.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.requested.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.requested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }
}

// A bare name becomes a one-element list, a list passes through and a map is
// wrapped like a name. Elements that request nothing are dropped.
fn sub_includes(value: &Include) -> Vec<Include> {
    let items = match value {
        Include::List(items) => items.clone(),
        single => vec![single.clone()],
    };
    items.into_iter().filter(|item| !item.is_empty()).collect()
}
