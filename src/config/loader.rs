//! Configuration loader with tier-based merging.
//!
//! Loads configuration from multiple tiers and merges them field-by-field,
//! except rule mappings, which are merged rule-by-rule.

use super::merge::deep_merge_all;
use super::types::{CONFIG_FILE_NAMES, Config};
use crate::error::BuildError;
use crate::paths::PathRegistry;
use crate::rules::{NamedRuleSet, merge_rules};
use crate::targets::Target;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project file (bundle.config.yaml)
    Project = 1,
    /// Environment variables (highest priority)
    Environment = 2,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Where to look for the project configuration.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project root all directories are resolved against
    pub project_root: PathBuf,
    /// Explicit configuration file (skips discovery)
    pub config_file: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        // Project root: BUNDLE_CONFIG_PROJECT_DIR or $CWD
        let project_root = std::env::var("BUNDLE_CONFIG_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        // Explicit file: BUNDLE_CONFIG_PATH
        let config_file = std::env::var("BUNDLE_CONFIG_PATH").ok().map(PathBuf::from);

        Self {
            project_root,
            config_file,
        }
    }

    /// Create paths with an explicit project root and optional file.
    pub fn with_root(project_root: impl Into<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config_file,
        }
    }

    /// The configuration file to read, if any exists.
    ///
    /// An explicit file is returned even when missing so the load fails
    /// loudly instead of silently falling back to defaults.
    pub fn effective_config_file(&self) -> Option<PathBuf> {
        if let Some(ref file) = self.config_file {
            return Some(file.clone());
        }

        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.project_root.join(name))
            .find(|path| path.exists())
    }
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths used for discovery
    pub paths: ConfigPaths,
    /// Loaded configuration
    config: Config,
    /// Path to the config file that was used (if any)
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from all tiers with proper merging.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load configuration with explicit paths.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        // Collect configs from each tier
        let mut configs: Vec<Value> = Vec::new();

        // Tier 1: Defaults
        configs.push(serde_json::to_value(Config::default())?);

        // Tier 2: Project file
        let config_path = paths.effective_config_file();
        if let Some(ref file) = config_path {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let value: Value = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            info!(tier = %ConfigTier::Project, path = %file.display(), "Loaded configuration file");
            if !value.is_null() {
                configs.push(value);
            }
        } else {
            debug!(root = %paths.project_root.display(), "No configuration file found, using defaults");
        }

        // Merge all configs
        let merged = merge_tiers(configs)?;
        let mut config: Config =
            serde_json::from_value(merged).context("Invalid configuration")?;

        // Tier 3: Environment variable overrides
        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        Ok(Self {
            paths,
            config,
            config_path,
        })
    }

    /// Apply environment variable overrides to config.
    pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(output_dir) = lookup("BUNDLE_OUTPUT_DIR") {
            debug!(tier = %ConfigTier::Environment, output_dir = %output_dir, "Overriding output root");
            config.dirs.output.root = output_dir;
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the config file path that was used.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn project_root(&self) -> &Path {
        &self.paths.project_root
    }

    /// Resolve the configured directory layout against the project root.
    pub fn path_registry(&self) -> PathRegistry {
        PathRegistry::resolve(&self.paths.project_root, &self.config.dirs)
    }
}

/// Deep-merge tiers, merging each target's `rules` with the rule merger.
///
/// A plain deep merge would blend the fields of a project rule into the
/// default rule of the same name, and would treat a `null` rule as "not
/// specified" instead of "disabled".
fn merge_tiers(tiers: Vec<Value>) -> Result<Value> {
    let mut rules: HashMap<Target, NamedRuleSet> = HashMap::new();
    let mut stripped = Vec::with_capacity(tiers.len());

    for mut tier in tiers {
        for target in Target::ALL {
            let Some(section) = tier
                .get_mut(target.as_str())
                .and_then(Value::as_object_mut)
            else {
                continue;
            };
            let Some(tier_rules) = section.remove("rules") else {
                continue;
            };
            if tier_rules.is_null() {
                continue;
            }
            let tier_rules: NamedRuleSet = serde_json::from_value(tier_rules).map_err(|e| {
                BuildError::config(format!("{}.rules must be a mapping: {}", target, e))
                    .with_field(format!("{}.rules", target))
            })?;
            let current = rules.entry(target).or_default();
            *current = merge_rules(current, &tier_rules);
        }
        stripped.push(tier);
    }

    let mut merged = deep_merge_all(stripped);
    for (target, set) in rules {
        if let Some(section) = merged
            .get_mut(target.as_str())
            .and_then(Value::as_object_mut)
        {
            section.insert("rules".to_string(), serde_json::to_value(set)?);
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleDefinition;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        // Empty temp dir so no config file is found
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_root(temp.path(), None);

        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        let config = loader.config();

        assert!(loader.config_path().is_none());
        assert_eq!(config.dirs.output.root, "dist");
        assert_eq!(config.dirs.client.root, "client");
        assert!(config.client.entry.is_none());
        assert!(config.client.rules.is_empty());
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let config_content = r#"
dirs:
  client:
    root: web
    output:
      publicPath: /static/
client:
  entry:
    app: ./index.js
"#;
        std::fs::write(temp.path().join("bundle.config.yaml"), config_content).unwrap();

        let loader = ConfigLoader::load_with_paths(ConfigPaths::with_root(temp.path(), None)).unwrap();
        let config = loader.config();

        assert_eq!(config.dirs.client.root, "web");
        assert_eq!(config.dirs.client.output.public_path, "/static/");
        // Untouched siblings keep their defaults
        assert_eq!(config.dirs.client.sources, "src");
        assert_eq!(config.dirs.client.output.js, "js");
        assert!(loader.config_path().unwrap().ends_with("bundle.config.yaml"));
    }

    #[test]
    fn test_partial_dirs_keep_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("bundle.config.yaml"),
            "dirs:\n  client:\n    sources: app\n",
        )
        .unwrap();

        let loader = ConfigLoader::load_with_paths(ConfigPaths::with_root(temp.path(), None)).unwrap();
        let dirs = &loader.config().dirs;
        assert_eq!(dirs.client.sources, "app");
        assert_eq!(dirs.client.root, "client");
        assert_eq!(dirs.client.output.root, "client");
        assert_eq!(dirs.server.root, "server");
    }

    #[test]
    fn test_json_file_discovered() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("bundle.config.json"),
            r#"{"dirs": {"output": {"root": "out"}}}"#,
        )
        .unwrap();

        let loader = ConfigLoader::load_with_paths(ConfigPaths::with_root(temp.path(), None)).unwrap();
        assert_eq!(loader.config().dirs.output.root, "out");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_root(temp.path(), Some(temp.path().join("nope.yaml")));
        assert!(ConfigLoader::load_with_paths(paths).is_err());
    }

    #[test]
    fn test_malformed_rules_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bundle.config.yaml"), "client:\n  rules: [1, 2]\n").unwrap();
        let paths = ConfigPaths::with_root(temp.path(), None);
        let err = ConfigLoader::load_with_paths(paths).unwrap_err();
        let build_err = err.downcast_ref::<BuildError>().unwrap();
        assert_eq!(build_err.code, crate::error::ErrorCode::ConfigError);
        assert_eq!(build_err.field.as_deref(), Some("client.rules"));
    }

    #[test]
    fn test_merge_tiers_replaces_rules_wholesale() {
        let lower = json!({
            "client": {"rules": {
                "jsRule": {"test": "\\.js$", "include": ["src"]},
                "cssRule": {"test": "\\.css$"}
            }}
        });
        let upper = json!({
            "client": {"rules": {
                "jsRule": {"test": "\\.mjs$"},
                "cssRule": null
            }}
        });

        let merged = merge_tiers(vec![lower, upper]).unwrap();
        let rules: NamedRuleSet = serde_json::from_value(merged["client"]["rules"].clone()).unwrap();

        assert_eq!(
            rules.get("jsRule"),
            Some(&RuleDefinition::from_value(json!({"test": "\\.mjs$"})))
        );
        assert!(rules.get("cssRule").unwrap().is_disabled());
    }

    #[test]
    fn test_env_override_output_root() {
        let mut config = Config::default();
        ConfigLoader::apply_env_overrides(&mut config, |key| {
            (key == "BUNDLE_OUTPUT_DIR").then(|| "public".to_string())
        });
        assert_eq!(config.dirs.output.root, "public");
    }
}
