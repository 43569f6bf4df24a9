use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple configuration for packcraft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Quiet period before a changed pack triggers re-analysis, milliseconds
    #[serde(default = "default_debounce_ms")]
    pub analysis_debounce_ms: u64,

    #[serde(default)]
    pub advisor: AdvisorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Fast model: quick checks, structured analysis, suggestions
    #[serde(default = "default_fast_model")]
    pub fast_model: String,

    /// Deep model: reviews and chat
    #[serde(default = "default_deep_model")]
    pub deep_model: String,

    /// Search-grounded model
    #[serde(default = "default_search_model")]
    pub search_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis_debounce_ms: default_debounce_ms(),
            advisor: AdvisorConfig::default(),
        }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            fast_model: default_fast_model(),
            deep_model: default_deep_model(),
            search_model: default_search_model(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    1500
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_fast_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_deep_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_search_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Config {
    /// Load config from the default location or create it if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "packcraft", "packcraft") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.packcraft/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis_debounce_ms, 1500);
        assert_eq!(config.advisor.api_key_env, "GEMINI_API_KEY");
        assert!(!config.advisor.fast_model.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.analysis_debounce_ms, config.analysis_debounce_ms);
        assert_eq!(parsed.advisor.deep_model, config.advisor.deep_model);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("analysis_debounce_ms = 500").unwrap();
        assert_eq!(parsed.analysis_debounce_ms, 500);
        assert_eq!(parsed.advisor.fast_model, default_fast_model());
    }
}
