//! Resolved values of a single command node

use crate::cli::command::{StreamTarget, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Option and argument values bound for one command
///
/// Keys are option long names and argument names. Options without a value
/// or default are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    values: BTreeMap<&'static str, Value>,
}

impl Matches {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Flag state; absent or non-flag values read as `false`
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Value::Flag(true)))
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn path(&self, name: &str) -> Option<&Path> {
        match self.get(name)? {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn stream(&self, name: &str) -> Option<&StreamTarget> {
        match self.get(name)? {
            Value::Stream(t) => Some(t),
            _ => None,
        }
    }
}
