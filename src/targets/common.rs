//! Base layer shared by every target.

use super::BuildContext;
use crate::compose::ConfigFragment;
use crate::plugins;
use serde_json::json;

/// Output settings of the target being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonOptions {
    pub output_path: String,
    pub public_path: String,
    /// Directory (relative to output) for emitted scripts.
    pub js_dir: String,
    /// Append content hashes to emitted file names.
    pub hash: bool,
}

/// The common base fragment.
pub fn common_config(ctx: &BuildContext, options: &CommonOptions) -> ConfigFragment {
    let env = &ctx.env;
    let hash_suffix = if options.hash { "?[chunkhash:5]" } else { "" };
    let prefix = if options.js_dir.is_empty() {
        String::new()
    } else {
        format!("{}/", options.js_dir.trim_end_matches('/'))
    };

    json!({
        "mode": env.mode.as_str(),
        "devtool": env.if_dev_mode(json!("eval-cheap-module-source-map"), json!(false)),
        "output": {
            "path": options.output_path,
            "publicPath": options.public_path,
            "filename": format!("{}[name].js{}", prefix, hash_suffix),
            "chunkFilename": format!("{}[name].chunk.js{}", prefix, hash_suffix),
        },
        "resolve": {
            "extensions": [".js", ".jsx", ".mjs", ".json"],
        },
        "module": {
            "rules": [],
        },
        "plugins": [plugins::define(env.mode.as_str())],
        "stats": env.if_dev_mode("minimal", "normal"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EnvironmentFlags, Mode};
    use crate::paths::{DirMap, PathRegistry};
    use std::path::Path;

    fn ctx(mode: Mode) -> BuildContext {
        BuildContext::new(
            PathRegistry::resolve(Path::new("/app"), &DirMap::default()),
            EnvironmentFlags::new(mode, false),
        )
    }

    fn options(hash: bool) -> CommonOptions {
        CommonOptions {
            output_path: "/app/dist/client".to_string(),
            public_path: "/".to_string(),
            js_dir: "js".to_string(),
            hash,
        }
    }

    #[test]
    fn test_hashed_output_names() {
        let config = common_config(&ctx(Mode::Production), &options(true));
        assert_eq!(config["output"]["filename"], "js/[name].js?[chunkhash:5]");
        assert_eq!(config["mode"], "production");
        assert_eq!(config["devtool"], false);
    }

    #[test]
    fn test_unhashed_development() {
        let mut opts = options(false);
        opts.js_dir = String::new();
        let config = common_config(&ctx(Mode::Development), &opts);
        assert_eq!(config["output"]["filename"], "[name].js");
        assert_eq!(config["plugins"][0]["plugin"], "DefinePlugin");
        assert_eq!(config["module"]["rules"], json!([]));
    }
}
