//! Bundler configuration composition.
//!
//! Assembles client, server and universal bundler configurations from a
//! common base, target-specific layers, environment flags and caller rule
//! overrides:
//!
//! ```
//! use bundle_config::env::{EnvironmentFlags, Mode};
//! use bundle_config::paths::{DirMap, PathRegistry};
//! use bundle_config::rules::{NamedRuleSet, RuleDefinition};
//! use bundle_config::targets::{self, BuildContext, ConfigOptions, Entry, EntryPoint, Target};
//!
//! let ctx = BuildContext::new(
//!     PathRegistry::resolve(std::path::Path::new("/app"), &DirMap::default()),
//!     EnvironmentFlags::new(Mode::Production, false),
//! );
//! let mut entry = Entry::new();
//! entry.insert("app".into(), EntryPoint::Single("./index.js".into()));
//! let options = ConfigOptions::new(entry)
//!     .with_rules(NamedRuleSet::new().with("cssNodeModulesRule", RuleDefinition::disabled()));
//!
//! let config = targets::build(Target::Client, &options, &ctx).unwrap();
//! assert_eq!(config.module_rules().len(), 3);
//! ```

pub mod cli;
pub mod compose;
pub mod config;
pub mod env;
pub mod error;
pub mod format;
pub mod loaders;
pub mod logging;
pub mod paths;
pub mod plugins;
pub mod rules;
pub mod targets;
