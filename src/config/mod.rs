//! Project configuration.
//!
//! Consolidates configuration from three tiers:
//! 1. **Defaults** - Built-in directory layout, no entries, no rule overrides
//! 2. **Project** - `bundle.config.yaml` (or `.yml` / `.json`) in the project root
//! 3. **Environment** - environment variables
//!
//! ## Merge Strategy
//! - Directory layout and target options: deep merge field-by-field
//! - `<target>.rules`: rule-by-rule, a later tier's rule replaces the earlier one
//!
//! ## Environment Variables
//! - `BUNDLE_CONFIG_PATH` - Explicit config file (skips discovery)
//! - `BUNDLE_CONFIG_PROJECT_DIR` - Project root (default: current directory)
//! - `BUNDLE_OUTPUT_DIR` - Output root relative to the project (default: `dist`)
//!
//! Build mode flags (`NODE_ENV`, `SSR`) are read separately by
//! [`EnvironmentFlags`](crate::env::EnvironmentFlags).

mod loader;
mod merge;
mod types;

pub use loader::{ConfigLoader, ConfigPaths, ConfigTier};
pub use merge::{
    ArrayMerge, deep_merge, deep_merge_all, deep_merge_with, layer_merge, layer_merge_all,
};
pub use types::*;
