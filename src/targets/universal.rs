//! Universal (isomorphic) target.
//!
//! A second composition level over the server target: the client's rules
//! are adjusted for server-side rendering, the server builder runs with
//! them, and a resolution layer exposing every source root to every other
//! is composed on top.

use super::{BuildContext, ConfigOptions, client, server};
use crate::compose::{ConfigFragment, LayeredConfig, compose};
use crate::error::BuildResult;
use crate::loaders::{self, AssetOptions, CssOptions};
use crate::plugins;
use crate::rules::{NamedRuleSet, merge_rules};
use serde_json::{Value, json};
use tracing::debug;

/// Client rules adjusted for rendering on the server.
pub fn default_rules(ctx: &BuildContext) -> NamedRuleSet {
    let paths = &ctx.paths;
    let client_rules = client::default_rules(ctx);
    let production = ctx.env.is_prod_mode();

    client_rules
        .iter()
        .map(|(name, rule)| {
            let adjusted = match name {
                "jsRule" => {
                    let mut include: Vec<Value> = rule
                        .field("include")
                        .and_then(Value::as_array)
                        .cloned()
                        .unwrap_or_default();
                    include.push(json!(paths.server.sources));
                    rule.clone().with_field("include", Value::Array(include))
                }
                // process css on the server always in ssr mode
                "cssRule" => rule.clone().with_field(
                    "use",
                    Value::Array(loaders::css(&CssOptions {
                        production,
                        ..CssOptions::ssr()
                    })),
                ),
                "cssNodeModulesRule" => rule
                    .clone()
                    .with_field("use", Value::Array(loaders::css_node_modules(true))),
                "assetsRule" => rule.clone().with_field(
                    "use",
                    Value::Array(loaders::assets(&AssetOptions {
                        output_dir: paths.dirs.client.output.assets.clone(),
                        ssr: true,
                    })),
                ),
                _ => rule.clone(),
            };
            (name, adjusted)
        })
        .collect()
}

/// Resolution layer composed over the server configuration.
pub fn target_shape(ctx: &BuildContext) -> ConfigFragment {
    let paths = &ctx.paths;

    // Client files hot-update themselves; without ssr the server never
    // renders them, so it need not rebuild on their change.
    let extra_plugins: Vec<Value> = if ctx.env.ssr {
        Vec::new()
    } else {
        vec![plugins::watch_ignore(&[paths.client.root.as_str()])]
    };

    json!({
        "name": "universal",
        "context": paths.root,
        "resolve": {
            "modules": [paths.client.sources],
            "alias": {
                "server": paths.server.sources,
                "shared": paths.shared.sources,
                "client": paths.client.sources,
            },
        },
        "plugins": extra_plugins,
    })
}

/// Build the universal configuration.
pub fn build(options: &ConfigOptions, ctx: &BuildContext) -> BuildResult<LayeredConfig> {
    let rules = merge_rules(&default_rules(ctx), &options.rules);

    let server_options = ConfigOptions {
        rules,
        ..options.clone()
    };
    let server_config = server::build(&server_options, ctx)?;

    debug!(
        target_name = "universal",
        ssr = ctx.env.ssr,
        rules = ?server_config.rules().names().collect::<Vec<_>>(),
        "Composing universal configuration over server"
    );

    Ok(compose(
        server_config.value(),
        &target_shape(ctx),
        server_config.rules(),
    ))
}
