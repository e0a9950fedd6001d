//! Configuration management for nlterm.
//!
//! Loads configuration from ${NLTERM_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

pub mod paths {
    //! Path resolution for nlterm configuration and data directories.
    //!
    //! NLTERM_HOME resolution order:
    //! 1. NLTERM_HOME environment variable (if set)
    //! 2. ~/.config/nlterm (default)

    use std::path::PathBuf;

    /// Returns the nlterm home directory.
    ///
    /// Checks NLTERM_HOME env var first, falls back to ~/.config/nlterm
    pub fn nlterm_home() -> PathBuf {
        if let Ok(home) = std::env::var("NLTERM_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("nlterm"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        nlterm_home().join("config.toml")
    }

    /// Returns the path to the log file.
    pub fn log_path() -> PathBuf {
        nlterm_home().join("nlterm.log")
    }
}

/// Gemini provider configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiProviderConfig {
    /// API key (falls back to the GEMINI_API_KEY environment variable).
    pub api_key: Option<String>,
    /// Base URL override.
    pub base_url: Option<String>,
}

/// Provider configuration (keys, base URLs).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub gemini: GeminiProviderConfig,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The completion model used for translation
    pub model: String,

    /// Shell dialect the session targets
    pub dialect: Dialect,

    /// Maximum output tokens for translation replies (optional)
    pub max_output_tokens: Option<u32>,

    /// Timeout for command execution in seconds (0 disables)
    pub command_timeout_secs: u32,

    /// Provider configuration (API keys, base URLs).
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            dialect: Dialect::default(),
            max_output_tokens: None,
            command_timeout_secs: 0,
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_MODEL: &str = "gemini-1.5-flash";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a commented config template at `path`.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Command execution timeout, `None` when disabled.
    pub fn command_timeout(&self) -> Option<Duration> {
        if self.command_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.command_timeout_secs)))
        }
    }
}

fn default_config_template() -> &'static str {
    r#"# nlterm configuration

# Completion model used for natural-language translation
model = "gemini-1.5-flash"

# Shell dialect: "bash", "cmd", or "powershell"
# dialect = "bash"

# Maximum output tokens for translation replies
# max_output_tokens = 256

# Command execution timeout in seconds (0 disables)
command_timeout_secs = 0

[providers.gemini]
# API key (falls back to the GEMINI_API_KEY environment variable)
# api_key = ""
# base_url = "https://generativelanguage.googleapis.com/v1beta"
"#
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.command_timeout_secs, 0);
        assert!(config.command_timeout().is_none());
    }

    #[test]
    fn test_load_parses_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "model = \"gemini-2.0-flash\"\ndialect = \"powershell\"\ncommand_timeout_secs = 30\n\n[providers.gemini]\napi_key = \"k\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.dialect, Dialect::PowerShell);
        assert_eq!(config.command_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.providers.gemini.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_init_writes_template_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        Config::init(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("model ="));
        assert!(contents.contains("# max_output_tokens ="));

        // Parses back as a valid config.
        Config::load_from(&path).unwrap();

        assert!(Config::init(&path).is_err());
    }

    #[test]
    fn test_default_dialect_matches_platform() {
        let config = Config::default();
        if cfg!(windows) {
            assert_eq!(config.dialect, Dialect::Cmd);
        } else {
            assert_eq!(config.dialect, Dialect::Bash);
        }
    }
}
