//! Client Configuration
//!
//! Settings for the chat client, loaded from an optional TOML file at
//! `~/.config/parley/client.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller through [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! backend = "http"            # or "demo-llm"
//! endpoint = "http://localhost:3000/api/chat"
//! demo_endpoint = "https://api.a0.dev/ai/llm"
//! probe_url = "http://localhost:3000/"
//! max_retries = 2
//! request_timeout_ms = 15000
//! probe_timeout_ms = 5000
//! fallback_delay_ms = 1000
//! max_input_chars = 500
//! start_offline = false
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::DEFAULT_DEMO_ENDPOINT;
use crate::fallback::DEFAULT_FALLBACK_RESPONSES;

/// Default chat endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/chat";

/// Default greeting shown when a session starts
pub const DEFAULT_GREETING: &str =
    "Merhaba! Ben proje planlama asistanınızım. Size nasıl yardımcı olabilirim?";

const ENV_BACKEND: &str = "PARLEY_BACKEND";
const ENV_ENDPOINT: &str = "PARLEY_ENDPOINT";
const ENV_DEMO_ENDPOINT: &str = "PARLEY_DEMO_ENDPOINT";
const ENV_PROBE_URL: &str = "PARLEY_PROBE_URL";
const ENV_MAX_RETRIES: &str = "PARLEY_MAX_RETRIES";
const ENV_REQUEST_TIMEOUT: &str = "PARLEY_REQUEST_TIMEOUT_MS";
const ENV_PROBE_TIMEOUT: &str = "PARLEY_PROBE_TIMEOUT_MS";
const ENV_FALLBACK_DELAY: &str = "PARLEY_FALLBACK_DELAY_MS";
const ENV_MAX_INPUT_CHARS: &str = "PARLEY_MAX_INPUT_CHARS";
const ENV_START_OFFLINE: &str = "PARLEY_START_OFFLINE";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the highest-priority value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// Backend Selection
// =============================================================================

/// Which service answers chat messages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Project backend at `endpoint` (`{"message"}` / `{"response"}`)
    #[default]
    Http,
    /// Public demo LLM at `demo_endpoint` (`{"messages"}` / `{"completion"}`)
    DemoLlm,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::DemoLlm => write!(f, "demo-llm"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "demo-llm" | "demo" => Ok(Self::DemoLlm),
            other => Err(ConfigError::ValidationError(format!(
                "unknown backend '{other}', expected 'http' or 'demo-llm'"
            ))),
        }
    }
}

// =============================================================================
// TOML Representation
// =============================================================================

/// On-disk form of the configuration; every field is optional
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientToml {
    /// Backend answering chat messages
    pub backend: Option<BackendKind>,
    /// Chat endpoint URL
    pub endpoint: Option<String>,
    /// Demo LLM endpoint URL
    pub demo_endpoint: Option<String>,
    /// URL probed at session start
    pub probe_url: Option<String>,
    /// Consecutive failures before offline mode
    pub max_retries: Option<u32>,
    /// Chat request timeout in milliseconds
    pub request_timeout_ms: Option<u64>,
    /// Connectivity probe timeout in milliseconds
    pub probe_timeout_ms: Option<u64>,
    /// Delay before a fallback reply in milliseconds
    pub fallback_delay_ms: Option<u64>,
    /// Longest draft the shell accepts
    pub max_input_chars: Option<usize>,
    /// Skip the probe and start in offline mode
    pub start_offline: Option<bool>,
    /// Greeting shown at session start
    pub greeting: Option<String>,
    /// Replacement fallback replies
    pub fallback_responses: Option<Vec<String>>,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Resolved chat client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend answering chat messages
    pub backend: BackendKind,
    /// Chat endpoint URL (HTTP backend)
    pub endpoint: String,
    /// Completion endpoint URL (demo LLM backend)
    pub demo_endpoint: String,
    /// URL probed at session start (the selected endpoint's origin when unset)
    pub probe_url: Option<String>,
    /// Consecutive failures before offline mode
    pub max_retries: u32,
    /// Bound on a chat request
    pub request_timeout: Duration,
    /// Bound on the connectivity probe
    pub probe_timeout: Duration,
    /// Delay before a fallback reply is shown
    pub fallback_delay: Duration,
    /// Longest draft the shell accepts, in characters
    pub max_input_chars: usize,
    /// Skip the probe and start in offline mode
    pub start_offline: bool,
    /// Greeting shown at session start
    pub greeting: String,
    /// Fallback replies
    pub fallback_responses: Vec<String>,
    /// File the configuration was read from, if any
    pub config_file_path: Option<PathBuf>,
    /// Highest-priority source that contributed a value
    pub source: ConfigSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            demo_endpoint: DEFAULT_DEMO_ENDPOINT.to_string(),
            probe_url: None,
            max_retries: 2,
            request_timeout: Duration::from_millis(15_000),
            probe_timeout: Duration::from_millis(5_000),
            fallback_delay: Duration::from_millis(1_000),
            max_input_chars: 500,
            start_offline: false,
            greeting: DEFAULT_GREETING.to_string(),
            fallback_responses: DEFAULT_FALLBACK_RESPONSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ClientConfig {
    /// Create configuration from defaults and environment variables only
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        config
    }

    /// URL of the selected backend
    pub fn active_endpoint(&self) -> &str {
        match self.backend {
            BackendKind::Http => &self.endpoint,
            BackendKind::DemoLlm => &self.demo_endpoint,
        }
    }

    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_http_url("endpoint", &self.endpoint)?;
        check_http_url("demo_endpoint", &self.demo_endpoint)?;
        if self.max_retries == 0 {
            return Err(ConfigError::ValidationError(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() || self.probe_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        if self.max_input_chars == 0 {
            return Err(ConfigError::ValidationError(
                "max_input_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{name} must not be empty"
        )));
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "{name} must be an http(s) URL, got {value}"
        )));
    }
    Ok(())
}

/// Get the default configuration file path
///
/// Returns `~/.config/parley/client.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("parley").join("client.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed,
/// or if the merged result fails validation. A missing file is not an error.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the merged result fails validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok(), &ConfigOverrides::new())
}

/// Merge file, environment (read through `lookup`) and CLI overrides
///
/// Validation runs once, on the fully merged result, so a higher-priority
/// source can replace a bad lower-priority value.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed,
/// or if the merged result fails validation.
pub fn load_config_with<F>(
    path: Option<PathBuf>,
    lookup: F,
    overrides: &ConfigOverrides,
) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ClientConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ClientToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_overrides(&mut config, lookup);
    overrides.apply(&mut config)?;

    Ok(config)
}

/// Apply TOML file values to the config
fn apply_toml_config(config: &mut ClientConfig, toml: ClientToml) {
    if let Some(backend) = toml.backend {
        config.backend = backend;
    }
    if let Some(endpoint) = toml.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(endpoint) = toml.demo_endpoint {
        config.demo_endpoint = endpoint;
    }
    if let Some(url) = toml.probe_url {
        config.probe_url = Some(url);
    }
    if let Some(n) = toml.max_retries {
        config.max_retries = n;
    }
    if let Some(ms) = toml.request_timeout_ms {
        config.request_timeout = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.probe_timeout_ms {
        config.probe_timeout = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.fallback_delay_ms {
        config.fallback_delay = Duration::from_millis(ms);
    }
    if let Some(n) = toml.max_input_chars {
        config.max_input_chars = n;
    }
    if let Some(offline) = toml.start_offline {
        config.start_offline = offline;
    }
    if let Some(greeting) = toml.greeting {
        config.greeting = greeting;
    }
    if let Some(responses) = toml.fallback_responses {
        if !responses.is_empty() {
            config.fallback_responses = responses;
        }
    }
}

/// Apply environment overrides read through `lookup`
///
/// Unparseable numeric values are ignored with a warning.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(backend) = parse_env::<BackendKind>(&lookup, ENV_BACKEND) {
        config.backend = backend;
        config.source = ConfigSource::Env;
    }
    if let Some(endpoint) = lookup(ENV_ENDPOINT) {
        config.endpoint = endpoint;
        config.source = ConfigSource::Env;
    }
    if let Some(endpoint) = lookup(ENV_DEMO_ENDPOINT) {
        config.demo_endpoint = endpoint;
        config.source = ConfigSource::Env;
    }
    if let Some(url) = lookup(ENV_PROBE_URL) {
        config.probe_url = Some(url);
        config.source = ConfigSource::Env;
    }
    if let Some(n) = parse_env::<u32>(&lookup, ENV_MAX_RETRIES) {
        config.max_retries = n;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_env::<u64>(&lookup, ENV_REQUEST_TIMEOUT) {
        config.request_timeout = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_env::<u64>(&lookup, ENV_PROBE_TIMEOUT) {
        config.probe_timeout = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_env::<u64>(&lookup, ENV_FALLBACK_DELAY) {
        config.fallback_delay = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
    if let Some(n) = parse_env::<usize>(&lookup, ENV_MAX_INPUT_CHARS) {
        config.max_input_chars = n;
        config.source = ConfigSource::Env;
    }
    if let Some(value) = lookup(ENV_START_OFFLINE) {
        config.start_offline = value == "1" || value.to_lowercase() == "true";
        config.source = ConfigSource::Env;
    }
}

fn parse_env<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Values supplied on the command line
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    backend: Option<BackendKind>,
    endpoint: Option<String>,
    start_offline: Option<bool>,
}

impl ConfigOverrides {
    /// Create an empty set of overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the backend
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Override the endpoint of the selected backend
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Force offline mode at startup
    pub fn with_start_offline(mut self, offline: bool) -> Self {
        self.start_offline = Some(offline);
        self
    }

    /// Apply overrides to a loaded config
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden config fails validation.
    pub fn apply(&self, config: &mut ClientConfig) -> Result<(), ConfigError> {
        if let Some(backend) = self.backend {
            config.backend = backend;
            config.source = ConfigSource::Cli;
        }
        if let Some(ref endpoint) = self.endpoint {
            match config.backend {
                BackendKind::Http => config.endpoint = endpoint.clone(),
                BackendKind::DemoLlm => config.demo_endpoint = endpoint.clone(),
            }
            config.source = ConfigSource::Cli;
        }
        if let Some(offline) = self.start_offline {
            config.start_offline = offline;
            config.source = ConfigSource::Cli;
        }
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.request_timeout, Duration::from_millis(15_000));
        assert_eq!(config.probe_timeout, Duration::from_millis(5_000));
        assert_eq!(config.fallback_delay, Duration::from_millis(1_000));
        assert_eq!(config.max_input_chars, 500);
        assert_eq!(config.fallback_responses.len(), 3);
        assert_eq!(config.source, ConfigSource::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("parley/client.toml"));
        }
    }

    #[test]
    fn test_parse_partial_toml() {
        let mut config = ClientConfig::default();
        let toml: ClientToml = toml::from_str(
            r#"
endpoint = "http://example.test/api/chat"
max_retries = 3
fallback_delay_ms = 0
"#,
        )
        .unwrap();

        apply_toml_config(&mut config, toml);

        assert_eq!(config.endpoint, "http://example.test/api/chat");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.fallback_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_millis(15_000));
    }

    #[test]
    fn test_empty_fallback_list_keeps_defaults() {
        let mut config = ClientConfig::default();
        let toml: ClientToml = toml::from_str("fallback_responses = []").unwrap();

        apply_toml_config(&mut config, toml);

        assert_eq!(config.fallback_responses.len(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_toml(
            r#"
probe_url = "http://localhost:3000/api/health"
request_timeout_ms = 2000
"#,
        );

        let config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(
            config.probe_url.as_deref(),
            Some("http://localhost:3000/api/health")
        );
        assert_eq!(config.config_file_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_missing_file_graceful() {
        let path = PathBuf::from("/nonexistent/path/client.toml");
        let config = load_config_from_path(Some(path)).unwrap();
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_malformed_toml_error() {
        let file = write_toml("max_retries = \"two\"\n[broken");

        let result = load_config_from_path(Some(file.path().to_path_buf()));

        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_file_value_fails_validation() {
        let file = write_toml("max_retries = 0");

        let result = load_config_from_path(Some(file.path().to_path_buf()));

        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ClientConfig::default();
        let lookup = lookup_from(&[
            ("PARLEY_ENDPOINT", "https://chat.example.test/api/chat"),
            ("PARLEY_MAX_RETRIES", "4"),
            ("PARLEY_REQUEST_TIMEOUT_MS", "3000"),
            ("PARLEY_START_OFFLINE", "true"),
        ]);

        apply_env_overrides(&mut config, lookup);

        assert_eq!(config.endpoint, "https://chat.example.test/api/chat");
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.request_timeout, Duration::from_millis(3000));
        assert!(config.start_offline);
        assert_eq!(config.source, ConfigSource::Env);
    }

    #[test]
    fn test_unparseable_env_value_is_ignored() {
        let mut config = ClientConfig::default();

        apply_env_overrides(&mut config, lookup_from(&[("PARLEY_MAX_RETRIES", "lots")]));

        assert_eq!(config.max_retries, 2);
        assert_eq!(config.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides_env() {
        let mut config = ClientConfig::default();
        apply_env_overrides(
            &mut config,
            lookup_from(&[("PARLEY_ENDPOINT", "http://env.test/api/chat")]),
        );

        ConfigOverrides::new()
            .with_endpoint("http://cli.test/api/chat".to_string())
            .with_start_offline(true)
            .apply(&mut config)
            .unwrap();

        assert_eq!(config.endpoint, "http://cli.test/api/chat");
        assert!(config.start_offline);
        assert_eq!(config.source, ConfigSource::Cli);
    }

    #[test]
    fn test_empty_overrides_no_change() {
        let mut config = ClientConfig::default();
        ConfigOverrides::new().apply(&mut config).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_endpoint() {
        let config = ClientConfig {
            endpoint: "localhost:3000".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_cli_endpoint_repairs_bad_env_endpoint() {
        let lookup = lookup_from(&[("PARLEY_ENDPOINT", "localhost:3000")]);
        let overrides =
            ConfigOverrides::new().with_endpoint("http://cli.test/api/chat".to_string());

        let config = load_config_with(None, lookup, &overrides).unwrap();

        assert_eq!(config.endpoint, "http://cli.test/api/chat");
        assert_eq!(config.source, ConfigSource::Cli);
    }

    #[test]
    fn test_bad_env_endpoint_fails_without_override() {
        let lookup = lookup_from(&[("PARLEY_ENDPOINT", "localhost:3000")]);

        let result = load_config_with(None, lookup, &ConfigOverrides::new());

        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_backend_kind_parsing() {
        assert_eq!("http".parse::<BackendKind>().unwrap(), BackendKind::Http);
        assert_eq!("demo-llm".parse::<BackendKind>().unwrap(), BackendKind::DemoLlm);
        assert_eq!(" Demo ".parse::<BackendKind>().unwrap(), BackendKind::DemoLlm);
        assert!("ollama".parse::<BackendKind>().is_err());
        assert_eq!(BackendKind::DemoLlm.to_string(), "demo-llm");
    }

    #[test]
    fn test_backend_selection_from_each_source() {
        let toml: ClientToml = toml::from_str(
            r#"
backend = "demo-llm"
demo_endpoint = "http://llm.test/ai/llm"
"#,
        )
        .unwrap();
        let mut config = ClientConfig::default();
        apply_toml_config(&mut config, toml);
        assert_eq!(config.backend, BackendKind::DemoLlm);
        assert_eq!(config.active_endpoint(), "http://llm.test/ai/llm");

        apply_env_overrides(&mut config, lookup_from(&[("PARLEY_BACKEND", "http")]));
        assert_eq!(config.backend, BackendKind::Http);
        assert_eq!(config.active_endpoint(), DEFAULT_ENDPOINT);

        ConfigOverrides::new()
            .with_backend(BackendKind::DemoLlm)
            .with_endpoint("http://cli.test/ai/llm".to_string())
            .apply(&mut config)
            .unwrap();
        assert_eq!(config.demo_endpoint, "http://cli.test/ai/llm");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Cli.to_string(), "CLI");
        assert_eq!(ConfigSource::Env.to_string(), "environment");
        assert_eq!(ConfigSource::File.to_string(), "config file");
        assert_eq!(ConfigSource::Default.to_string(), "default");
    }
}
