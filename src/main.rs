//! bundle-config
//!
//! Prints bundler configurations for the client, server and universal
//! targets of a project.

use anyhow::Result;
use bundle_config::cli::{BuildArgs, Cli, Command, FormatArgs, RulesArgs, target_options};
use bundle_config::config::{ConfigLoader, ConfigPaths};
use bundle_config::env::EnvironmentFlags;
use bundle_config::logging::{self, LogDestination};
use bundle_config::rules::merge_rules;
use bundle_config::targets::{self, BuildContext};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogDestination::parse(&cli.log), cli.verbose)?;

    // CLI flags take precedence over BUNDLE_CONFIG_* discovery
    let discovered = ConfigPaths::discover();
    let paths = ConfigPaths::with_root(
        cli.project_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or(discovered.project_root),
        cli.config.as_deref().map(PathBuf::from).or(discovered.config_file),
    );
    let loader = ConfigLoader::load_with_paths(paths)?;

    if let Some(path) = loader.config_path() {
        debug!(path = %path.display(), "Using configuration file");
    }

    match cli.command {
        Command::Build(args) => run_build(&loader, args),
        Command::Rules(args) => run_rules(&loader, args),
        Command::Paths(args) => run_paths(&loader, args),
    }
}

fn build_context(loader: &ConfigLoader, env: EnvironmentFlags) -> BuildContext {
    BuildContext::new(loader.path_registry(), env)
}

fn run_build(loader: &ConfigLoader, args: BuildArgs) -> Result<()> {
    let options = target_options(loader, args.target, &args.entries, args.rules.as_deref().map(Path::new))?;

    let mut env = EnvironmentFlags::from_env();
    if let Some(mode) = args.mode {
        env.mode = mode.into();
    }
    if let Some(ssr) = args.ssr {
        env.ssr = ssr;
    }

    info!(target_name = %args.target, mode = %env.mode, ssr = env.ssr, "Building configuration");
    let ctx = build_context(loader, env);
    let config = targets::build(args.target, &options, &ctx)?;
    debug!(module_rules = config.module_rules().len(), "Configuration composed");

    println!("{}", args.output.format.render(config.value())?);
    Ok(())
}

fn run_rules(loader: &ConfigLoader, args: RulesArgs) -> Result<()> {
    let options = target_options(loader, args.target, &[], args.rules.as_deref().map(Path::new))?;

    let mut env = EnvironmentFlags::from_env();
    if let Some(mode) = args.mode {
        env.mode = mode.into();
    }

    let ctx = build_context(loader, env);
    let defaults = targets::default_rules(args.target, &ctx);
    let merged = merge_rules(&defaults, &options.rules);

    println!("{}", args.output.format.render(&merged)?);
    Ok(())
}

fn run_paths(loader: &ConfigLoader, args: FormatArgs) -> Result<()> {
    let registry = loader.path_registry();
    println!("{}", args.format.render(&registry)?);
    Ok(())
}
