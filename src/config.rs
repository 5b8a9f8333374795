//! TOML configuration
//!
//! Every field has a default, so an empty or partial file is valid:
//!
//! ```toml
//! [input]
//! min_chars = 3
//! max_chars = 10000
//!
//! [classify]
//! category_order = ["Meeting", "Finance", "Health", "Personal", "Work"]
//! extended_categories = true
//!
//! [llm]
//! enabled = false
//! model = "gpt-4o-mini"
//! timeout_secs = 10
//! api_key_env = "OPENAI_API_KEY"
//! ```

use crate::extract::{Category, ExtractOptions};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputLimits,
    pub classify: ClassifyConfig,
    pub llm: LlmConfig,
}

/// Bounds enforced by the request layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_chars: 3,
            max_chars: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Category names, earliest wins a score tie
    pub category_order: Vec<String>,
    pub extended_categories: bool,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            category_order: Category::DEFAULT_ORDER
                .iter()
                .map(|c| c.to_string())
                .collect(),
            extended_categories: true,
        }
    }
}

/// OpenAI-compatible chat completion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout_secs: 10,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl LlmConfig {
    /// API key from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    /// Load configuration from a TOML file, or defaults when no path is given
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.input.min_chars > self.input.max_chars {
            bail!(
                "input.min_chars ({}) exceeds input.max_chars ({})",
                self.input.min_chars,
                self.input.max_chars
            );
        }
        self.category_order()?;
        Ok(())
    }

    /// Parsed tie-break order; categories left out are appended in default order
    pub fn category_order(&self) -> Result<Vec<Category>> {
        let mut order = Vec::new();
        for name in &self.classify.category_order {
            let category: Category = name.parse().map_err(anyhow::Error::msg)?;
            if !order.contains(&category) {
                order.push(category);
            }
        }
        for category in Category::DEFAULT_ORDER {
            if !order.contains(&category) {
                order.push(category);
            }
        }
        Ok(order)
    }

    pub fn extract_options(&self) -> Result<ExtractOptions> {
        Ok(ExtractOptions {
            category_order: self.category_order()?,
            extended_categories: self.classify.extended_categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_path() {
        let config = Config::load(None::<&str>).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input.max_chars, 10_000);
        assert!(!config.llm.enabled);
        assert_eq!(
            config.extract_options().unwrap(),
            ExtractOptions::default()
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[classify]\ncategory_order = [\"work\", \"Personal\"]").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.input, InputLimits::default());
        assert_eq!(
            config.category_order().unwrap(),
            vec![
                Category::Work,
                Category::Personal,
                Category::Meeting,
                Category::Finance,
                Category::Health
            ]
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = Config::from_toml("[classify]\ncategory_order = [\"Errands\"]").unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid category 'Errands'"));
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let err = Config::from_toml("[input]\nmin_chars = 50\nmax_chars = 10").unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Config::load(Some("/nonexistent/flowpilot.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_llm_section() {
        let config = Config::from_toml(
            "[llm]\nenabled = true\nmodel = \"local-model\"\ntimeout_secs = 3\napi_key_env = \"FLOWPILOT_TEST_UNSET_KEY\"",
        )
        .unwrap();
        assert!(config.llm.enabled);
        assert_eq!(config.llm.model, "local-model");
        assert_eq!(config.llm.timeout_secs, 3);
        assert_eq!(config.llm.api_key(), None);
    }
}
