//! Plugin descriptors.
//!
//! The bundler instantiates plugins from `{ "plugin": name, "options": ... }`
//! descriptors; this crate only emits them.

use serde_json::{Value, json};

/// Generic plugin descriptor.
pub fn plugin(name: &str, options: Value) -> Value {
    json!({ "plugin": name, "options": options })
}

/// Compile-time constants, always present.
pub fn define(node_env: &str) -> Value {
    plugin(
        "DefinePlugin",
        json!({ "process.env.NODE_ENV": format!("\"{}\"", node_env) }),
    )
}

pub fn hot_module_replacement() -> Value {
    plugin("HotModuleReplacementPlugin", json!({}))
}

pub fn css_extract(filename: &str) -> Value {
    plugin("MiniCssExtractPlugin", json!({ "filename": filename }))
}

pub fn html(template: &str, filename: &str, title: &str) -> Value {
    plugin(
        "HtmlWebpackPlugin",
        json!({ "template": template, "filename": filename, "title": title }),
    )
}

pub fn asset_manifest(file_name: &str, filter_template: &Value) -> Value {
    plugin(
        "WebpackAssetsManifest",
        json!({ "output": file_name, "filterTemplate": filter_template }),
    )
}

pub fn service_worker(sw_dest: &str) -> Value {
    plugin("GenerateSW", json!({ "swDest": sw_dest }))
}

pub fn watch_ignore(paths: &[&str]) -> Value {
    plugin("WatchIgnorePlugin", json!({ "paths": paths }))
}
