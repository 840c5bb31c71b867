//! Project configuration file types.

use crate::paths::DirMap;
use crate::targets::{ConfigOptions, Target};
use serde::{Deserialize, Serialize};

/// File names probed in the project root, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = [
    "bundle.config.yaml",
    "bundle.config.yml",
    "bundle.config.json",
];

/// Contents of `bundle.config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory layout overrides.
    #[serde(default)]
    pub dirs: DirMap,

    #[serde(default)]
    pub client: ConfigOptions,

    #[serde(default)]
    pub server: ConfigOptions,

    #[serde(default)]
    pub universal: ConfigOptions,
}

impl Config {
    /// Options declared for `target`.
    pub fn options(&self, target: Target) -> &ConfigOptions {
        match target {
            Target::Client => &self.client,
            Target::Server => &self.server,
            Target::Universal => &self.universal,
        }
    }
}
