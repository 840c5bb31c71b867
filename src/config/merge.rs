//! Deep merge functionality for configuration values.
//!
//! Two strategies share one recursive walk:
//! - tier merging (`deep_merge`): arrays are replaced entirely, `null`
//!   keeps the lower tier's value
//! - layer merging (`layer_merge`): arrays are concatenated in layer order,
//!   `null` is an ordinary value and wins like any scalar

use serde_json::Value;

/// How array-valued leaves at the same path are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayMerge {
    /// The overlay array replaces the base array.
    Replace,
    /// The overlay array is appended to the base array.
    Concat,
}

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays follow `arrays`
/// - Strings, numbers, booleans are replaced entirely
/// - A null overlay preserves the base under `Replace` (null means "not
///   specified" in a config tier) and replaces it under `Concat`
pub fn deep_merge_with(base: Value, overlay: Value, arrays: ArrayMerge) -> Value {
    match (base, overlay) {
        // Both are objects: merge recursively
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = match base_map.get_mut(&key) {
                    // Take in place so the key keeps its original position
                    Some(slot) => deep_merge_with(slot.take(), overlay_value, arrays),
                    None => overlay_value,
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        (Value::Array(mut base_items), Value::Array(overlay_items))
            if arrays == ArrayMerge::Concat =>
        {
            base_items.extend(overlay_items);
            Value::Array(base_items)
        }
        // Tier overlay is null: preserve base (null means "not specified")
        (base, Value::Null) if arrays == ArrayMerge::Replace => base,
        // Any other case: overlay replaces base entirely
        (_, overlay) => overlay,
    }
}

/// Tier merge: objects merged recursively, arrays replaced.
///
/// # Example
/// ```
/// use serde_json::json;
/// use bundle_config::config::deep_merge;
///
/// let base = json!({
///     "output": { "root": "dist", "publicPath": "/" },
///     "staticContent": ["public"]
/// });
/// let overlay = json!({
///     "output": { "root": "build" },
///     "staticContent": ["static"]
/// });
/// let result = deep_merge(base, overlay);
/// assert_eq!(result, json!({
///     "output": { "root": "build", "publicPath": "/" },
///     "staticContent": ["static"]
/// }));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    deep_merge_with(base, overlay, ArrayMerge::Replace)
}

/// Layer merge: objects merged recursively, arrays concatenated base-first,
/// a null overlay replaces the base.
pub fn layer_merge(base: Value, overlay: Value) -> Value {
    deep_merge_with(base, overlay, ArrayMerge::Concat)
}

/// Merge multiple values in order, with later values taking precedence.
///
/// Equivalent to folding `deep_merge` over the list.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}

/// Layer-merge multiple values in order.
pub fn layer_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, layer_merge)
}
