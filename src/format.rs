//! Output formatting for generated configurations.

use anyhow::Result;
use serde::Serialize;

/// Output format for printed configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }

    /// Render `value` in this format.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = match self {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        };
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("yml"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_str("toml"), None);
    }

    #[test]
    fn test_render_keeps_key_order() {
        let value = json!({"name": "client", "target": "web", "entry": {"app": "./index.js"}});
        let rendered = OutputFormat::Json.render(&value).unwrap();
        let name_pos = rendered.find("\"name\"").unwrap();
        let target_pos = rendered.find("\"target\"").unwrap();
        let entry_pos = rendered.find("\"entry\"").unwrap();
        assert!(name_pos < target_pos && target_pos < entry_pos);
    }

    #[test]
    fn test_render_yaml() {
        let rendered = OutputFormat::Yaml.render(&json!({"target": "node"})).unwrap();
        assert_eq!(rendered.trim(), "target: node");
    }
}
