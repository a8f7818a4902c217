//! LLM Client abstractions and provider management
//!
//! This module provides a unified interface for the language-model collaborator:
//! - **OpenAI**: any OpenAI-compatible endpoint (Groq by default)
//! - **Ollama**: local inference through an Ollama server
//!
//! The rest of the crate treats the model as an opaque text-in/text-out service.

use crate::types::{AppError, Result};
use crate::utils::toml_config::{JarvisConfig, ProviderConfig};
use async_trait::async_trait;
use std::sync::Arc;

/// Stream of text chunks produced by a streaming completion
pub type TextStream = Box<dyn futures::Stream<Item = Result<String>> + Send + Unpin>;

/// Generic LLM client trait for provider abstraction
///
/// All LLM providers implement this trait, allowing for easy swapping
/// between providers without changing application code.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate with system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Stream a completion with system prompt
    async fn stream_with_system(&self, system: &str, prompt: &str) -> Result<TextStream>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Sampling parameters forwarded to OpenAI-compatible endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            top_p: 0.9,
        }
    }
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI API provider (including Groq and other compatible APIs)
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenAI {
    ///     api_key: "gsk-...".to_string(),
    ///     api_base: "https://api.groq.com/openai/v1".to_string(),
    ///     model: "llama3-70b-8192".to_string(),
    ///     params: ModelParams::default(),
    /// };
    /// ```
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
        params: ModelParams,
    },

    /// Ollama local LLM provider
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Resolve a provider from configuration, reading secrets from the environment
    pub fn from_config(config: &JarvisConfig) -> Result<Self> {
        match &config.llm {
            ProviderConfig::OpenAI {
                api_key_env,
                api_base,
                model,
                temperature,
                max_tokens,
                top_p,
            } => {
                let api_key = config.resolve_env(api_key_env).ok_or_else(|| {
                    AppError::Configuration(format!(
                        "Environment variable '{}' is required for the OpenAI-compatible provider",
                        api_key_env
                    ))
                })?;

                Ok(Provider::OpenAI {
                    api_key,
                    api_base: api_base.clone(),
                    model: model.clone(),
                    params: ModelParams {
                        temperature: *temperature,
                        max_tokens: *max_tokens,
                        top_p: *top_p,
                    },
                })
            }
            ProviderConfig::Ollama { base_url, model } => Ok(Provider::Ollama {
                base_url: base_url.clone(),
                model: model.clone(),
            }),
        }
    }

    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's cargo feature is not compiled in
    /// or the client cannot be constructed.
    pub async fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            #[cfg(feature = "openai")]
            Provider::OpenAI {
                api_key,
                api_base,
                model,
                params,
            } => Ok(Box::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                *params,
            ))),

            #[cfg(not(feature = "openai"))]
            Provider::OpenAI { model, .. } => Err(AppError::Configuration(format!(
                "OpenAI provider requested for model '{}' but the 'openai' feature is not enabled",
                model
            ))),

            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone()).await?,
            )),

            #[cfg(not(feature = "ollama"))]
            Provider::Ollama { model, .. } => Err(AppError::Configuration(format!(
                "Ollama provider requested for model '{}' but the 'ollama' feature is not enabled",
                model
            ))),
        }
    }

    /// Check if this provider is compiled into the binary
    pub fn is_enabled(&self) -> bool {
        match self {
            Provider::OpenAI { .. } => cfg!(feature = "openai"),
            Provider::Ollama { .. } => cfg!(feature = "ollama"),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }
}

/// Configuration-based client factory
///
/// Creates the shared client once at startup; every agent and the
/// summarizer hold the same `Arc`.
pub struct LLMClientFactory {
    default_provider: Provider,
}

impl LLMClientFactory {
    /// Create a new factory with the specified default provider
    pub fn new(default_provider: Provider) -> Self {
        Self { default_provider }
    }

    /// Create a client using the default provider
    pub async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        self.default_provider.create_client().await
    }

    /// Create a shareable client using the default provider
    pub async fn create_shared(&self) -> Result<Arc<dyn LLMClient>> {
        Ok(Arc::from(self.create_default().await?))
    }

    /// Get a reference to the default provider
    pub fn default_provider(&self) -> &Provider {
        &self.default_provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let openai = Provider::OpenAI {
            api_key: "".to_string(),
            api_base: "".to_string(),
            model: "".to_string(),
            params: ModelParams::default(),
        };
        assert_eq!(openai.name(), "OpenAI");

        let ollama = Provider::Ollama {
            base_url: "".to_string(),
            model: "".to_string(),
        };
        assert_eq!(ollama.name(), "Ollama");
    }

    #[test]
    fn test_provider_from_ollama_config() {
        let config: JarvisConfig = toml::from_str(
            r#"
[llm]
type = "ollama"
base_url = "http://gpu-box:11434"
model = "llama3.2"
"#,
        )
        .unwrap();

        let provider = Provider::from_config(&config).unwrap();
        match provider {
            Provider::Ollama { base_url, model } => {
                assert_eq!(base_url, "http://gpu-box:11434");
                assert_eq!(model, "llama3.2");
            }
            _ => panic!("Expected Ollama provider"),
        }
    }

    #[test]
    fn test_provider_from_openai_config_requires_key() {
        let config: JarvisConfig = toml::from_str(
            r#"
[llm]
type = "openai"
api_key_env = "JARVIS_PROVIDER_TEST_KEY_NEVER_SET"
"#,
        )
        .unwrap();

        let err = Provider::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("JARVIS_PROVIDER_TEST_KEY_NEVER_SET"));
    }

    #[test]
    fn test_factory_default_provider() {
        let provider = Provider::Ollama {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
        };

        let factory = LLMClientFactory::new(provider);
        assert_eq!(factory.default_provider().name(), "Ollama");
        assert_eq!(
            factory.default_provider().is_enabled(),
            cfg!(feature = "ollama")
        );
    }
}
