//! Target configuration builders.
//!
//! Every builder is a pure function of (`ConfigOptions`, `BuildContext`):
//! it declares its default rules and target shape, merges the caller's rule
//! overrides, and hands everything to the composer.

pub mod client;
pub mod common;
pub mod server;
pub mod universal;

use crate::compose::LayeredConfig;
use crate::env::EnvironmentFlags;
use crate::error::{BuildError, BuildResult};
use crate::paths::PathRegistry;
use crate::rules::NamedRuleSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::str::FromStr;

/// Build destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Client,
    Server,
    Universal,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Client, Target::Server, Target::Universal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Client => "client",
            Target::Server => "server",
            Target::Universal => "universal",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" | "web" => Ok(Target::Client),
            "server" | "node" => Ok(Target::Server),
            "universal" | "ssr" => Ok(Target::Universal),
            _ => Err(BuildError::unknown_target(s)),
        }
    }
}

/// One entry point: a single module or a list loaded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryPoint {
    Single(String),
    Many(Vec<String>),
}

impl EntryPoint {
    pub fn is_empty(&self) -> bool {
        match self {
            EntryPoint::Single(path) => path.is_empty(),
            EntryPoint::Many(paths) => paths.iter().all(String::is_empty),
        }
    }
}

/// Entry-point name to module path(s).
pub type Entry = IndexMap<String, EntryPoint>;

/// Which dependencies the server bundle leaves to `require` at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalsPolicy {
    /// Packages that are bundled despite living in node_modules.
    #[serde(default)]
    pub allowlist: Vec<String>,
    /// Directory scanned for external packages.
    #[serde(default = "default_modules_dir")]
    pub modules_dir: String,
    /// Also read `package.json` dependencies.
    #[serde(default)]
    pub modules_from_file: bool,
}

impl Default for ExternalsPolicy {
    fn default() -> Self {
        Self {
            allowlist: Vec::new(),
            modules_dir: default_modules_dir(),
            modules_from_file: false,
        }
    }
}

fn default_modules_dir() -> String {
    "node_modules".to_string()
}

impl ExternalsPolicy {
    /// Descriptor consumed by the bundler's externals resolver.
    pub fn to_value(&self) -> Value {
        json!({
            "nodeExternals": {
                "allowlist": self.allowlist,
                "modulesDir": self.modules_dir,
                "modulesFromFile": self.modules_from_file,
            }
        })
    }
}

/// Caller input for one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigOptions {
    /// Required. Checked before any composition happens.
    #[serde(default)]
    pub entry: Option<Entry>,
    /// Rule overrides, merged over the target's defaults.
    #[serde(default)]
    pub rules: NamedRuleSet,
    /// Server and universal targets only.
    #[serde(default)]
    pub externals: Option<ExternalsPolicy>,
}

impl ConfigOptions {
    pub fn new(entry: Entry) -> Self {
        Self {
            entry: Some(entry),
            ..Default::default()
        }
    }

    pub fn with_rules(mut self, rules: NamedRuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_externals(mut self, externals: ExternalsPolicy) -> Self {
        self.externals = Some(externals);
        self
    }

    /// The entry mapping, or a `MissingRequiredField` error.
    pub fn require_entry(&self) -> BuildResult<&Entry> {
        match &self.entry {
            Some(entry) if !entry.is_empty() => {
                if let Some((name, _)) = entry.iter().find(|(_, point)| point.is_empty()) {
                    return Err(BuildError::invalid_value(
                        "entry",
                        &format!("entry point '{}' has no module path", name),
                    ));
                }
                Ok(entry)
            }
            _ => Err(BuildError::missing_field("entry")),
        }
    }
}

/// Collaborator values for one build, stable for its duration.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub paths: PathRegistry,
    pub env: EnvironmentFlags,
}

impl BuildContext {
    pub fn new(paths: PathRegistry, env: EnvironmentFlags) -> Self {
        Self { paths, env }
    }
}

/// Build the configuration of `target`.
pub fn build(target: Target, options: &ConfigOptions, ctx: &BuildContext) -> BuildResult<LayeredConfig> {
    match target {
        Target::Client => client::build(options, ctx),
        Target::Server => server::build(options, ctx),
        Target::Universal => universal::build(options, ctx),
    }
}

/// Default rule set of `target`.
pub fn default_rules(target: Target, ctx: &BuildContext) -> NamedRuleSet {
    match target {
        Target::Client => client::default_rules(ctx),
        Target::Server => server::default_rules(ctx),
        Target::Universal => universal::default_rules(ctx),
    }
}
