//! Model call settings shared by backends and agents.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Which model to call and how.
///
/// # Examples
///
/// ```
/// use showrunner_core::ModelSettings;
///
/// let settings = ModelSettings::default();
/// assert_eq!(settings.api_key_env(), "OPENAI_API_KEY");
/// assert_eq!(*settings.timeout_secs(), 120);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ModelSettings {
    /// Model identifier sent with every request
    model: String,
    /// Base URL of an OpenAI-compatible chat completions API
    base_url: String,
    /// Environment variable holding the API key
    api_key_env: String,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Maximum tokens per reply
    max_tokens: Option<u32>,
    /// Request timeout in seconds
    timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: None,
            max_tokens: None,
            timeout_secs: 120,
        }
    }
}

impl ModelSettings {
    /// Replace the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replace the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the reply token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Retry policy for transient model failures.
///
/// `max_retries = 0`, the default, disables retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct RetrySettings {
    /// Attempts after the first failure
    max_retries: usize,
    /// First backoff delay in milliseconds
    initial_backoff_ms: u64,
    /// Upper bound on any single delay in seconds
    max_delay_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 2000,
            max_delay_secs: 60,
        }
    }
}

impl RetrySettings {
    /// Retry policy with explicit parameters.
    pub fn new(max_retries: usize, initial_backoff_ms: u64, max_delay_secs: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            max_delay_secs,
        }
    }

    /// Policy that never retries.
    pub fn disabled() -> Self {
        Self::new(0, 0, 0)
    }

    /// True when retrying is enabled.
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }
}
