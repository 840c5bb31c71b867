//! Node target.
//!
//! Everything is processed in server-side rendering mode: stylesheets only
//! export class names and assets only resolve urls.

use super::client::{ASSETS_TEST, CSS_TEST, JS_TEST};
use super::common::{CommonOptions, common_config};
use super::{BuildContext, ConfigOptions};
use crate::compose::{ConfigFragment, LayeredConfig, compose};
use crate::error::BuildResult;
use crate::loaders::{self, AssetOptions, CssOptions};
use crate::rules::{NamedRuleSet, RuleDefinition, merge_rules};
use serde_json::json;
use tracing::debug;

pub fn default_rules(ctx: &BuildContext) -> NamedRuleSet {
    let paths = &ctx.paths;
    let production = ctx.env.is_prod_mode();

    NamedRuleSet::new()
        .with(
            "jsRule",
            RuleDefinition::new(JS_TEST)
                .include([paths.server.sources.as_str(), paths.shared.sources.as_str()])
                .uses(loaders::babel()),
        )
        .with(
            "cssRule",
            RuleDefinition::new(CSS_TEST)
                .include([paths.server.sources.as_str(), paths.shared.sources.as_str()])
                .uses(loaders::css(&CssOptions {
                    production,
                    ..CssOptions::ssr()
                })),
        )
        .with(
            "cssNodeModulesRule",
            RuleDefinition::new(CSS_TEST)
                .include([paths.node_modules.as_str()])
                .uses(loaders::css_node_modules(true)),
        )
        .with(
            "assetsRule",
            RuleDefinition::new(ASSETS_TEST)
                .include([paths.client.assets.as_str(), paths.node_modules.as_str()])
                .uses(loaders::assets(&AssetOptions {
                    output_dir: paths.dirs.client.output.assets.clone(),
                    ssr: true,
                })),
        )
}

pub fn target_shape(ctx: &BuildContext, options: &ConfigOptions) -> BuildResult<ConfigFragment> {
    let entry = options.require_entry()?;
    let paths = &ctx.paths;
    let externals = options.externals.clone().unwrap_or_default();

    Ok(json!({
        "name": paths.dirs.server.root,
        "target": "node",
        "context": paths.server.sources,
        "entry": entry,
        "resolve": {
            "modules": [paths.server.sources],
            "alias": {
                "shared": paths.shared.sources,
            },
        },
        "externals": [externals.to_value()],
        // Keep real paths of the running process
        "node": {
            "__dirname": false,
            "__filename": false,
        },
        "output": {
            "libraryTarget": "commonjs2",
        },
        "plugins": [],
    }))
}

pub fn common_options(ctx: &BuildContext) -> CommonOptions {
    CommonOptions {
        output_path: ctx.paths.server.output.path.clone(),
        public_path: ctx.paths.server.output.public_path.clone(),
        js_dir: String::new(),
        hash: false,
    }
}

/// Build the server configuration.
pub fn build(options: &ConfigOptions, ctx: &BuildContext) -> BuildResult<LayeredConfig> {
    let shape = target_shape(ctx, options)?;
    let rules = merge_rules(&default_rules(ctx), &options.rules);
    debug!(
        target_name = "server",
        rules = ?rules.names().collect::<Vec<_>>(),
        "Composing server configuration"
    );

    let common = common_config(ctx, &common_options(ctx));
    Ok(compose(&common, &shape, &rules))
}
