//! Layered configuration composition.
//!
//! A target configuration is a common base fragment, a target-specific
//! fragment layered on top of it, and the merged rule set injected as the
//! module-rule list. Composition never mutates its inputs.

use crate::config::layer_merge;
use crate::rules::NamedRuleSet;
use serde::Serialize;
use serde_json::{Map, Value};

/// A nested configuration mapping.
pub type ConfigFragment = Value;

/// The result of one composition step.
///
/// Keeps the rule set that produced `module.rules` so a further
/// composition level can inject the same list again.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LayeredConfig {
    value: Value,
    #[serde(skip)]
    rules: NamedRuleSet,
}

impl LayeredConfig {
    /// The final configuration object.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The rule set whose enabled entries form `module.rules`.
    pub fn rules(&self) -> &NamedRuleSet {
        &self.rules
    }

    /// Ordered module rules as they appear in the configuration.
    pub fn module_rules(&self) -> &[Value] {
        self.value
            .get("module")
            .and_then(|m| m.get("rules"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Compose `common` and `target` and inject `rules` as `module.rules`.
///
/// Later layers win on scalar conflicts, arrays at the same path are
/// concatenated common-first, and `module.rules` is always replaced by the
/// enabled entries of `rules` in their merge order.
pub fn compose(
    common: &ConfigFragment,
    target: &ConfigFragment,
    rules: &NamedRuleSet,
) -> LayeredConfig {
    let module_rules = rules.enabled_rules();

    let mut value = layer_merge(common.clone(), target.clone());
    set_module_rules(&mut value, module_rules);

    LayeredConfig {
        value,
        rules: rules.clone(),
    }
}

/// Overwrite `module.rules`, creating the containers when absent.
fn set_module_rules(config: &mut Value, module_rules: Vec<Value>) {
    if !config.is_object() {
        *config = Value::Object(Map::new());
    }
    let Some(root) = config.as_object_mut() else {
        return;
    };

    let module = root
        .entry("module")
        .or_insert_with(|| Value::Object(Map::new()));
    if !module.is_object() {
        *module = Value::Object(Map::new());
    }
    if let Some(module) = module.as_object_mut() {
        module.insert("rules".to_string(), Value::Array(module_rules));
    }
}
