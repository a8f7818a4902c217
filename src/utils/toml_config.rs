//! TOML-based configuration for J.A.R.V.I.S
//!
//! This module provides declarative configuration for the HTTP server, the
//! language-model provider, agent prompt overrides, the search sources and the
//! live data services via a TOML file (`jarvis.toml`).
//!
//! Secrets never live in the file itself. Every credential is referenced by the
//! name of the environment variable that holds it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Agent keys the registry knows how to build
pub const KNOWN_AGENT_KEYS: &[&str] = &["planner", "task", "tool", "api", "search"];

/// Root configuration structure loaded from jarvis.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JarvisConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Language-model provider shared by the planner, agents and summarizer
    #[serde(default)]
    pub llm: ProviderConfig,

    /// Per-agent prompt and description overrides
    #[serde(default)]
    pub agents: HashMap<String, AgentConfig>,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub live_data: LiveDataConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Allow any origin through CORS
    #[serde(default = "default_true")]
    pub cors_allow_any: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            cors_allow_any: true,
        }
    }
}

// ============= Rate Limiting =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds a client has to wait before its quota replenishes
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    #[serde(default = "default_burst_size")]
    pub burst_size: u32,
}

fn default_cooldown_secs() -> u64 {
    2
}

fn default_burst_size() -> u32 {
    1
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_secs: default_cooldown_secs(),
            burst_size: default_burst_size(),
        }
    }
}

// ============= Provider Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAI {
        /// Environment variable containing API key
        #[serde(default = "default_openai_key_env")]
        api_key_env: String,
        #[serde(default = "default_openai_base")]
        api_base: String,
        #[serde(default = "default_openai_model")]
        model: String,
        #[serde(default = "default_temperature")]
        temperature: f32,
        #[serde(default = "default_max_tokens")]
        max_tokens: u32,
        #[serde(default = "default_top_p")]
        top_p: f32,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        model: String,
    },
}

fn default_openai_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_openai_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_openai_model() -> String {
    "llama3-70b-8192".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_top_p() -> f32 {
    0.9
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::OpenAI {
            api_key_env: default_openai_key_env(),
            api_base: default_openai_base(),
            model: default_openai_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

// ============= Agent Configuration =============

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Replaces the built-in system prompt for this agent
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Replaces the built-in description shown by `/agents`
    #[serde(default)]
    pub description: Option<String>,
}

// ============= Search Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Per-source call timeout
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_instant_answer_url")]
    pub instant_answer_url: String,

    #[serde(default = "default_encyclopedia_api_url")]
    pub encyclopedia_api_url: String,

    #[serde(default = "default_encyclopedia_rest_url")]
    pub encyclopedia_rest_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_service_timeout() -> u64 {
    10
}

fn default_instant_answer_url() -> String {
    "https://api.duckduckgo.com/".to_string()
}

fn default_encyclopedia_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_encyclopedia_rest_url() -> String {
    "https://en.wikipedia.org/api/rest_v1/page/summary".to_string()
}

fn default_user_agent() -> String {
    concat!("jarvis-server/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_service_timeout(),
            instant_answer_url: default_instant_answer_url(),
            encyclopedia_api_url: default_encyclopedia_api_url(),
            encyclopedia_rest_url: default_encyclopedia_rest_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============= Live Data Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveDataConfig {
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_news_page_size")]
    pub news_page_size: u32,

    #[serde(default = "default_weather_key_env")]
    pub weather_api_key_env: String,

    #[serde(default = "default_news_key_env")]
    pub news_api_key_env: String,

    #[serde(default = "default_stock_key_env")]
    pub stock_api_key_env: String,

    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    #[serde(default = "default_news_url")]
    pub news_url: String,

    #[serde(default = "default_stock_url")]
    pub stock_url: String,
}

fn default_news_page_size() -> u32 {
    5
}

fn default_weather_key_env() -> String {
    "OPENWEATHER_API_KEY".to_string()
}

fn default_news_key_env() -> String {
    "NEWSAPI_KEY".to_string()
}

fn default_stock_key_env() -> String {
    "ALPHAVANTAGE_KEY".to_string()
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_news_url() -> String {
    "https://newsapi.org/v2/everything".to_string()
}

fn default_stock_url() -> String {
    "https://www.alphavantage.co/query".to_string()
}

impl Default for LiveDataConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_service_timeout(),
            news_page_size: default_news_page_size(),
            weather_api_key_env: default_weather_key_env(),
            news_api_key_env: default_news_key_env(),
            stock_api_key_env: default_stock_key_env(),
            weather_url: default_weather_url(),
            news_url: default_news_url(),
            stock_url: default_stock_url(),
        }
    }
}

impl LiveDataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============= Configuration Loading & Validation =============

/// Configuration warnings that don't prevent operation but may indicate issues
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub kind: ConfigWarningKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarningKind {
    MissingLiveDataKey,
    UnknownAgent,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(err: ConfigError) -> Self {
        crate::types::AppError::Configuration(err.to_string())
    }
}

impl JarvisConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file without validating it
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ProviderConfig::OpenAI { api_key_env, .. } = &self.llm {
            self.validate_env_var(api_key_env)?;
        }

        if self.search.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "search.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.live_data.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "live_data.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.rate_limit.enabled
            && (self.rate_limit.cooldown_secs == 0 || self.rate_limit.burst_size == 0)
        {
            return Err(ConfigError::ValidationError(
                "rate_limit.cooldown_secs and rate_limit.burst_size must be greater than zero"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Validate configuration with warnings for optional pieces that are missing
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();

        for env in [
            &self.live_data.weather_api_key_env,
            &self.live_data.news_api_key_env,
            &self.live_data.stock_api_key_env,
        ] {
            if self.resolve_env(env).is_none() {
                warnings.push(ConfigWarning {
                    kind: ConfigWarningKind::MissingLiveDataKey,
                    message: format!(
                        "Environment variable '{}' is not set; the matching live data lookup will be unavailable",
                        env
                    ),
                });
            }
        }

        let mut unknown: Vec<&String> = self
            .agents
            .keys()
            .filter(|name| !KNOWN_AGENT_KEYS.contains(&name.as_str()))
            .collect();
        unknown.sort();
        warnings.extend(unknown.into_iter().map(|name| ConfigWarning {
            kind: ConfigWarningKind::UnknownAgent,
            message: format!(
                "Agent '{}' is configured but is not one of: {}",
                name,
                KNOWN_AGENT_KEYS.join(", ")
            ),
        }));

        Ok(warnings)
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        self.resolve_env(name)
            .map(|_| ())
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Get agent overrides by key
    pub fn get_agent(&self, name: &str) -> Option<&AgentConfig> {
        self.agents.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ollama_config() -> &'static str {
        r#"
[server]
host = "0.0.0.0"
port = 8080
log_format = "json"

[llm]
type = "ollama"
model = "llama3.2"

[agents.task]
system_prompt = "You manage reminders."

[search]
timeout_secs = 3
"#
    }

    #[test]
    fn test_parse_config() {
        let config: JarvisConfig = toml::from_str(ollama_config()).expect("Failed to parse config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert!(matches!(config.llm, ProviderConfig::Ollama { ref base_url, .. } if base_url == "http://localhost:11434"));
        assert_eq!(
            config.get_agent("task").and_then(|a| a.system_prompt.as_deref()),
            Some("You manage reminders.")
        );
        assert_eq!(config.search.timeout(), Duration::from_secs(3));
        assert_eq!(config.live_data.news_page_size, 5);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: JarvisConfig = toml::from_str("").unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.search.timeout_secs, 10);
        assert_eq!(config.rate_limit.cooldown_secs, 2);
        assert!(matches!(config.llm, ProviderConfig::OpenAI { ref api_key_env, .. } if api_key_env == "GROQ_API_KEY"));
    }

    #[test]
    fn test_validation_missing_llm_key() {
        let content = r#"
[llm]
type = "openai"
api_key_env = "JARVIS_TEST_KEY_THAT_IS_NEVER_SET"
"#;

        let config: JarvisConfig = toml::from_str(content).unwrap();
        let result = config.validate();

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref name)) if name == "JARVIS_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let content = r#"
[llm]
type = "ollama"
model = "llama3.2"

[search]
timeout_secs = 0
"#;

        let config: JarvisConfig = toml::from_str(content).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_warnings_for_unknown_agent_and_missing_keys() {
        let content = r#"
[llm]
type = "ollama"
model = "llama3.2"

[agents.astrologer]
system_prompt = "Read the stars."

[live_data]
weather_api_key_env = "JARVIS_TEST_WEATHER_NEVER_SET"
news_api_key_env = "JARVIS_TEST_NEWS_NEVER_SET"
stock_api_key_env = "JARVIS_TEST_STOCK_NEVER_SET"
"#;

        let config: JarvisConfig = toml::from_str(content).unwrap();
        let warnings = config.validate_with_warnings().unwrap();

        assert_eq!(
            warnings
                .iter()
                .filter(|w| w.kind == ConfigWarningKind::MissingLiveDataKey)
                .count(),
            3
        );
        assert!(warnings.iter().any(|w| w.kind == ConfigWarningKind::UnknownAgent
            && w.message.contains("astrologer")));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ollama_config().as_bytes()).unwrap();

        let config = JarvisConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_missing_file() {
        let result = JarvisConfig::load("/definitely/not/here/jarvis.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_parse_file_skips_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"[llm]\ntype = \"openai\"\napi_key_env = \"JARVIS_PARSE_ONLY_KEY_NEVER_SET\"\n",
        )
        .unwrap();

        let config = JarvisConfig::parse_file(file.path()).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingEnvVar(ref name)) if name == "JARVIS_PARSE_ONLY_KEY_NEVER_SET"
        ));
        assert!(JarvisConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_parse_file_reports_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[server\nport = 1").unwrap();

        let err = JarvisConfig::parse_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Failed to parse TOML"));
    }
}
