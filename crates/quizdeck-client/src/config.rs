//! Configuration loading.
//!
//! `quizdeck.toml` in the current directory wins, then
//! `~/.config/quizdeck/config.toml`. `${VAR}` references inside values are
//! resolved from the environment, and `QUIZDECK_API_URL` /
//! `QUIZDECK_API_TOKEN` override whatever the file says.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Connection settings for the quiz API.
///
/// Note: Custom Debug impl masks the token to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the platform API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional bearer token.
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Top-level quizdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdeckConfig {
    /// Quiz API connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Where completion records are kept.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Where report artifacts are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./quizdeck-completions.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizdeck-reports")
}

impl Default for QuizdeckConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            store_path: default_store_path(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// Environment variable overrides: `QUIZDECK_API_URL`, `QUIZDECK_API_TOKEN`.
pub fn load_config() -> Result<QuizdeckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizdeckConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("QUIZDECK_API_URL") {
        config.api.base_url = url;
    }
    if let Ok(token) = std::env::var("QUIZDECK_API_TOKEN") {
        config.api.token = Some(token);
    }

    // Resolve env vars inside values
    config.api.base_url = resolve_env_vars(&config.api.base_url);
    config.api.token = config.api.token.as_deref().map(resolve_env_vars);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZDECK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZDECK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZDECK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_QUIZDECK_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizdeckConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 15);
        assert!(config.api.token.is_none());
    }

    #[test]
    fn parse_config_file() {
        let toml_str = r#"
store_path = "./state/completions.json"
output_dir = "./reports"

[api]
base_url = "https://lms.example.com"
token = "secret"
timeout_secs = 5
"#;
        let config: QuizdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://lms.example.com");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.store_path, PathBuf::from("./state/completions.json"));
    }

    #[test]
    fn explicit_missing_path_errors() {
        let result = load_config_from(Some(Path::new("/no/such/quizdeck.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizdeck.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://test:9\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "http://test:9");
    }

    #[test]
    fn debug_masks_token() {
        let config = ApiConfig {
            token: Some("very-secret".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("***"));
    }
}
