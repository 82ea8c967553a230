use std::fmt;

use indexmap::IndexMap;
use log::debug;

use crate::error::RuntimeError;
use crate::value::Value;

/// Variable bindings for one program run.
///
/// Names are unique. A fresh name is appended at the end; re-binding a known
/// name replaces its value without moving it, so iteration order is the order
/// in which names were first assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    values: IndexMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: IndexMap::new(),
        }
    }

    /// Returns the environment with `name` bound to `value`.
    pub fn bind<S: Into<String>>(mut self, name: S, value: Value) -> Self {
        let name: String = name.into();

        debug!("Binding '{}' = {}", name, value);

        self.values.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Result<&Value, RuntimeError> {
        self.values
            .get(name)
            .ok_or_else(|| RuntimeError::UnboundVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bindings in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{} = {}", name, value)?;
        }

        Ok(())
    }
}
