//! Named module rules and the rule merger.
//!
//! A rule describes which resources to match and which processor chain to
//! apply to them. Rules are kept opaque: the merger copies or replaces them
//! wholesale and never looks inside.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque description of "match a resource, apply a chain of processors".
///
/// The wrapped value is never exposed mutably, so two definitions can only
/// be swapped, never blended field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleDefinition(Value);

impl RuleDefinition {
    /// Start a rule matching resources whose path matches `test`.
    pub fn new(test: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("test".to_string(), Value::String(test.into()));
        Self(Value::Object(map))
    }

    /// A rule that is switched off.
    pub fn disabled() -> Self {
        Self(Value::Null)
    }

    /// Wrap an arbitrary value without interpreting it.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Set the inclusion path list.
    pub fn include<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths = paths.into_iter().map(|p| Value::String(p.into())).collect();
        self.with_field("include", Value::Array(paths))
    }

    /// Set the ordered processor chain.
    pub fn uses(self, chain: Vec<Value>) -> Self {
        self.with_field("use", Value::Array(chain))
    }

    /// Return a new definition with one top-level field replaced.
    ///
    /// Used by builders that derive a target-specific rule from another
    /// target's default. Has no effect on a disabled or non-object rule
    /// other than turning it into an object holding just that field.
    pub fn with_field(self, key: &str, value: Value) -> Self {
        let mut map = match self.0 {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        map.insert(key.to_string(), value);
        Self(Value::Object(map))
    }

    /// Read a top-level field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A disabled rule is `null`, `false` or an empty object.
    pub fn is_disabled(&self) -> bool {
        match &self.0 {
            Value::Null | Value::Bool(false) => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RuleDefinition {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Mapping from rule name to definition, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedRuleSet(IndexMap<String, RuleDefinition>);

impl NamedRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used by the default rule factories.
    pub fn with(mut self, name: impl Into<String>, rule: RuleDefinition) -> Self {
        self.0.insert(name.into(), rule);
        self
    }

    /// Insert or replace a rule. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, rule: RuleDefinition) {
        self.0.insert(name.into(), rule);
    }

    pub fn get(&self, name: &str) -> Option<&RuleDefinition> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleDefinition)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Ordered rule list with disabled entries dropped.
    pub fn enabled_rules(&self) -> Vec<Value> {
        self.0
            .values()
            .filter(|rule| !rule.is_disabled())
            .map(|rule| rule.as_value().clone())
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, RuleDefinition)> for NamedRuleSet {
    fn from_iter<T: IntoIterator<Item = (K, RuleDefinition)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Merge caller overrides into a default rule set.
///
/// A key present in `overrides` takes the override value verbatim; every
/// other default is carried over unchanged. Default keys come first in
/// their original order, followed by override-only keys in theirs. A
/// default is switched off by overriding it with a disabled value; the
/// merger itself only ever replaces.
pub fn merge_rules(defaults: &NamedRuleSet, overrides: &NamedRuleSet) -> NamedRuleSet {
    let mut merged = defaults.clone();
    for (name, rule) in overrides.iter() {
        // IndexMap::insert on an existing key keeps its slot
        merged.insert(name, rule.clone());
    }
    merged
}
