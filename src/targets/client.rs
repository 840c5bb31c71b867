//! Browser target.

use super::common::{CommonOptions, common_config};
use super::{BuildContext, ConfigOptions};
use crate::compose::{ConfigFragment, LayeredConfig, compose};
use crate::error::BuildResult;
use crate::loaders::{self, AssetOptions, CSS_EXTRACT_LOADER, CssOptions, STYLE_LOADER};
use crate::plugins;
use crate::rules::{NamedRuleSet, RuleDefinition, merge_rules};
use serde_json::{Value, json};
use tracing::debug;

pub const JS_TEST: &str = r"\.jsx?$";
pub const CSS_TEST: &str = r"\.css$";
pub const ASSETS_TEST: &str = r"\.(png|jpg|gif|svg|eot|ttf|woff|woff2|otf)$";

/// Dev server port.
pub const DEV_SERVER_PORT: u16 = 9000;

/// Default client rules: scripts, own stylesheets, package stylesheets, assets.
///
/// Development injects styles at runtime, production extracts them.
pub fn default_rules(ctx: &BuildContext) -> NamedRuleSet {
    let paths = &ctx.paths;
    let env = &ctx.env;
    let style_loader = json!(env.if_dev_mode(STYLE_LOADER, CSS_EXTRACT_LOADER));
    let production = env.is_prod_mode();

    let css_chain: Vec<Value> = std::iter::once(style_loader.clone())
        .chain(loaders::css(&CssOptions {
            production,
            ..CssOptions::default()
        }))
        .collect();
    let css_node_modules_chain: Vec<Value> = std::iter::once(style_loader)
        .chain(loaders::css_node_modules(false))
        .collect();

    NamedRuleSet::new()
        .with(
            "jsRule",
            RuleDefinition::new(JS_TEST)
                .include([paths.client.sources.as_str(), paths.shared.sources.as_str()])
                .uses(loaders::babel()),
        )
        .with(
            "cssRule",
            RuleDefinition::new(CSS_TEST)
                .include([paths.client.sources.as_str()])
                .uses(css_chain),
        )
        .with(
            "cssNodeModulesRule",
            RuleDefinition::new(CSS_TEST)
                .include([paths.node_modules.as_str()])
                .uses(css_node_modules_chain),
        )
        .with(
            "assetsRule",
            RuleDefinition::new(ASSETS_TEST)
                .include([paths.client.assets.as_str(), paths.node_modules.as_str()])
                .uses(loaders::assets(&AssetOptions {
                    output_dir: paths.dirs.client.output.assets.clone(),
                    ssr: false,
                })),
        )
}

/// Client-specific layer: identity, resolution, plugins and dev server.
pub fn target_shape(ctx: &BuildContext, options: &ConfigOptions) -> BuildResult<ConfigFragment> {
    let entry = options.require_entry()?;
    let paths = &ctx.paths;
    let dirs = &paths.dirs.client;

    Ok(json!({
        "name": dirs.root,
        "target": "web",
        "context": paths.client.sources,
        "entry": entry,
        "resolve": {
            "modules": [paths.client.sources],
            "alias": {
                // for universal projects
                "shared": paths.shared.sources,
            },
        },
        "plugins": client_plugins(ctx),
        "devServer": {
            // Served from disk, not processed by the bundler
            "contentBase": paths.client.static_content,
            "publicPath": dirs.output.public_path,
            "historyApiFallback": true,
            "host": "0.0.0.0",
            "port": DEV_SERVER_PORT,
            "hotOnly": true,
            "noInfo": false,
            "stats": "minimal",
        },
    }))
}

fn client_plugins(ctx: &BuildContext) -> Vec<Value> {
    let dirs = &ctx.paths.dirs.client;
    let mut enabled = Vec::new();

    if ctx.env.is_dev_mode() {
        enabled.push(plugins::hot_module_replacement());
    } else {
        enabled.push(plugins::css_extract(&format!(
            "{}/[name].css?[contenthash:5]",
            dirs.output.styles
        )));
    }

    if !dirs.html.template.is_empty() {
        enabled.push(plugins::html(
            &dirs.html.template,
            &dirs.html.filename,
            &dirs.html.title,
        ));
    }
    if !dirs.output.asset_manifest.file_name.is_empty() {
        enabled.push(plugins::asset_manifest(
            &dirs.output.asset_manifest.file_name,
            &dirs.output.asset_manifest.filter_template,
        ));
    }
    if ctx.env.is_prod_mode() && !dirs.output.sw.sw_dest.is_empty() {
        enabled.push(plugins::service_worker(&dirs.output.sw.sw_dest));
    }

    enabled
}

pub fn common_options(ctx: &BuildContext) -> CommonOptions {
    CommonOptions {
        output_path: ctx.paths.client.output.path.clone(),
        public_path: ctx.paths.client.output.public_path.clone(),
        js_dir: ctx.paths.dirs.client.output.js.clone(),
        hash: true,
    }
}

/// Build the client configuration.
pub fn build(options: &ConfigOptions, ctx: &BuildContext) -> BuildResult<LayeredConfig> {
    let shape = target_shape(ctx, options)?;
    let rules = merge_rules(&default_rules(ctx), &options.rules);
    debug!(
        target_name = "client",
        rules = ?rules.names().collect::<Vec<_>>(),
        "Composing client configuration"
    );

    let common = common_config(ctx, &common_options(ctx));
    Ok(compose(&common, &shape, &rules))
}
