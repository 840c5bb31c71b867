//! Loader chain factories.
//!
//! Each function returns fresh processor-chain entries. Rules embed these
//! values verbatim; nothing downstream interprets them.

use serde_json::{Value, json};

/// Loader that injects styles into the page at runtime (development).
pub const STYLE_LOADER: &str = "style-loader";

/// Loader of the CSS extraction plugin (production).
pub const CSS_EXTRACT_LOADER: &str = "mini-css-extract-plugin/loader";

/// Options for the css loader chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssOptions {
    /// Local class name pattern in development.
    pub pattern: String,
    /// Local class name pattern in production.
    pub prod_pattern: String,
    /// Run postcss after css-loader.
    pub postcss: bool,
    /// Server-side rendering: export class names only, emit no css.
    pub ssr: bool,
    /// Use `prod_pattern` instead of `pattern`.
    pub production: bool,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            pattern: "[name]__[local]--[hash:5]".to_string(),
            prod_pattern: "[hash:5]".to_string(),
            postcss: true,
            ssr: false,
            production: false,
        }
    }
}

impl CssOptions {
    pub fn ssr() -> Self {
        Self {
            ssr: true,
            ..Self::default()
        }
    }

    /// Keep third-party class names untouched.
    pub fn node_modules() -> Self {
        Self {
            pattern: "[local]".to_string(),
            prod_pattern: "[local]".to_string(),
            postcss: false,
            ..Self::default()
        }
    }
}

/// Options for the asset loader chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOptions {
    /// Directory (relative to output) where assets are emitted.
    pub output_dir: String,
    /// Server-side rendering: compute urls but emit no files.
    pub ssr: bool,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            output_dir: "assets".to_string(),
            ssr: false,
        }
    }
}

/// Script transpilation chain.
pub fn babel() -> Vec<Value> {
    vec![json!({
        "loader": "babel-loader",
        "options": { "cacheDirectory": true }
    })]
}

/// Stylesheet chain without the leading injection/extraction loader.
pub fn css(options: &CssOptions) -> Vec<Value> {
    let local_ident_name = if options.production {
        &options.prod_pattern
    } else {
        &options.pattern
    };

    let import_loaders = if options.postcss { 1 } else { 0 };

    let mut chain = vec![json!({
        "loader": "css-loader",
        "options": {
            "modules": {
                "localIdentName": local_ident_name,
                "exportOnlyLocals": options.ssr,
            },
            "importLoaders": import_loaders,
        }
    })];

    if options.postcss {
        chain.push(json!({ "loader": "postcss-loader" }));
    }

    chain
}

/// Stylesheet chain for third-party packages.
pub fn css_node_modules(ssr: bool) -> Vec<Value> {
    css(&CssOptions {
        ssr,
        ..CssOptions::node_modules()
    })
}

/// Static asset chain.
pub fn assets(options: &AssetOptions) -> Vec<Value> {
    vec![json!({
        "loader": "url-loader",
        "options": {
            "limit": 1024,
            "name": format!("{}/[name].[ext]?[hash:5]", options.output_dir),
            "emitFile": !options.ssr,
        }
    })]
}
