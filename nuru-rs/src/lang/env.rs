//! Binding scope: identifier → value.

use std::collections::HashMap;

use super::value::Value;

/// One mutable scope, owned by a single console session or script run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    store: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    /// Bind `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.store.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
