//! CLI command definitions for bundle-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::config::ConfigLoader;
use crate::env::Mode;
use crate::format::OutputFormat;
use crate::rules::{NamedRuleSet, merge_rules};
use crate::targets::{ConfigOptions, Entry, EntryPoint, Target};
use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::Path;

/// Build mode selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "prod")]
    Production,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Development => Mode::Development,
            ModeArg::Production => Mode::Production,
        }
    }
}

/// Compose client, server and universal bundler configurations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (skips discovery)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Project root directories are resolved against (default: current directory)
    #[arg(short, long, global = true)]
    pub project_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the composed configuration of a target
    Build(BuildArgs),

    /// Print the merged rule set of a target
    Rules(RulesArgs),

    /// Print the resolved directory layout
    Paths(FormatArgs),
}

/// Output format selection shared by all commands.
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format: json or yaml
    #[arg(short, long, default_value = "json", value_parser = parse_format)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Target to build: client, server or universal
    #[arg(value_parser = parse_target)]
    pub target: Target,

    /// Entry point as name=path (repeatable, repeated names form a list)
    #[arg(short, long = "entry", value_parser = parse_entry_arg)]
    pub entries: Vec<(String, String)>,

    /// YAML/JSON file with rule overrides
    #[arg(short, long)]
    pub rules: Option<String>,

    /// Build mode (overrides NODE_ENV)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Server-side rendering on or off (overrides SSR)
    #[arg(long)]
    pub ssr: Option<bool>,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Target whose rules to print
    #[arg(value_parser = parse_target)]
    pub target: Target,

    /// YAML/JSON file with rule overrides
    #[arg(short, long)]
    pub rules: Option<String>,

    /// Build mode (overrides NODE_ENV)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    #[command(flatten)]
    pub output: FormatArgs,
}

fn parse_target(s: &str) -> Result<Target, String> {
    s.parse::<Target>().map_err(|e| e.to_string())
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s).ok_or_else(|| format!("unknown format '{}' (expected json or yaml)", s))
}

fn parse_entry_arg(s: &str) -> Result<(String, String), String> {
    let (name, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=path, got '{}'", s))?;
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected name=path, got '{}'", s));
    }
    Ok((name.to_string(), path.to_string()))
}

/// Collect `name=path` pairs into an entry mapping.
///
/// Returns `None` when no entries were given so the project file value
/// stays in effect.
pub fn entries_to_entry(entries: &[(String, String)]) -> Option<Entry> {
    if entries.is_empty() {
        return None;
    }

    let mut entry = Entry::new();
    for (name, path) in entries {
        match entry.get_mut(name) {
            Some(point) => {
                let paths = match std::mem::replace(point, EntryPoint::Many(Vec::new())) {
                    EntryPoint::Single(first) => vec![first, path.clone()],
                    EntryPoint::Many(mut paths) => {
                        paths.push(path.clone());
                        paths
                    }
                };
                *point = EntryPoint::Many(paths);
            }
            None => {
                entry.insert(name.clone(), EntryPoint::Single(path.clone()));
            }
        }
    }
    Some(entry)
}

/// Read a rule override file.
pub fn load_rules_file(path: &Path) -> Result<NamedRuleSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(NamedRuleSet::new());
    }
    let rules: Option<NamedRuleSet> = serde_yaml::from_str(&content)
        .map_err(|e| anyhow!("Rules file {} is not a rule mapping: {}", path.display(), e))?;
    Ok(rules.unwrap_or_default())
}

/// Project options for `target` with command-line entries and rules layered on top.
///
/// Entries given on the command line replace the project entry; a rules
/// file is merged over the project rules.
pub fn target_options(
    loader: &ConfigLoader,
    target: Target,
    entries: &[(String, String)],
    rules_file: Option<&Path>,
) -> Result<ConfigOptions> {
    let mut options = loader.config().options(target).clone();

    if let Some(entry) = entries_to_entry(entries) {
        options.entry = Some(entry);
    }
    if let Some(file) = rules_file {
        let cli_rules = load_rules_file(file)?;
        options.rules = merge_rules(&options.rules, &cli_rules);
    }

    Ok(options)
}
