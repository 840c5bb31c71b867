//! Environment-derived build flags.
//!
//! Flags are read once at the edge and handed to the builders. Nothing in
//! the merge or compose path reads the process environment.

use serde::{Deserialize, Serialize};

/// Build mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }

    /// Parse a `NODE_ENV`-style value. Only `production`/`prod` select production.
    pub fn from_node_env(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Mode::Production,
            _ => Mode::Development,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived flags used to pick rule and plugin variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentFlags {
    pub mode: Mode,
    /// Server-side rendering enabled.
    pub ssr: bool,
}

impl EnvironmentFlags {
    pub fn new(mode: Mode, ssr: bool) -> Self {
        Self { mode, ssr }
    }

    /// Read `NODE_ENV` and `SSR` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read flags through an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mode = lookup("NODE_ENV")
            .map(|v| Mode::from_node_env(&v))
            .unwrap_or_default();
        let ssr = lookup("SSR").map(|v| parse_flag(&v)).unwrap_or(false);
        Self { mode, ssr }
    }

    pub fn is_dev_mode(&self) -> bool {
        self.mode == Mode::Development
    }

    pub fn is_prod_mode(&self) -> bool {
        self.mode == Mode::Production
    }

    /// Pick `dev` in development mode, `prod` otherwise.
    pub fn if_dev_mode<T>(&self, dev: T, prod: T) -> T {
        if self.is_dev_mode() { dev } else { prod }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let flags = EnvironmentFlags::from_lookup(lookup(&[]));
        assert_eq!(flags.mode, Mode::Development);
        assert!(!flags.ssr);
    }

    #[test]
    fn test_production_and_ssr() {
        let flags = EnvironmentFlags::from_lookup(lookup(&[("NODE_ENV", "production"), ("SSR", "true")]));
        assert!(flags.is_prod_mode());
        assert!(flags.ssr);
    }

    #[test]
    fn test_unknown_node_env_is_development() {
        let flags = EnvironmentFlags::from_lookup(lookup(&[("NODE_ENV", "staging"), ("SSR", "nope")]));
        assert!(flags.is_dev_mode());
        assert!(!flags.ssr);
    }

    #[test]
    fn test_if_dev_mode() {
        let dev = EnvironmentFlags::new(Mode::Development, false);
        let prod = EnvironmentFlags::new(Mode::Production, false);
        assert_eq!(dev.if_dev_mode("style-loader", "extract"), "style-loader");
        assert_eq!(prod.if_dev_mode("style-loader", "extract"), "extract");
    }
}
