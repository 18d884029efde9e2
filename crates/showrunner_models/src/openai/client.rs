//! OpenAI-compatible chat completions client.

use super::conversion;
use super::dto::{OpenAIChatResponse, OpenAIErrorBody};
use async_trait::async_trait;
use reqwest::Client;
use showrunner_core::{GenerateRequest, GenerateResponse, ModelSettings};
use showrunner_error::{ModelError, ModelErrorKind, ShowrunnerResult};
use showrunner_interface::ModelDriver;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for any API that speaks the chat completions protocol.
#[derive(Debug, Clone)]
pub struct OpenAIChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAIChatClient {
    /// Creates a client, reading the API key from the environment variable
    /// named by `settings.api_key_env()`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is not set in the environment
    /// - The HTTP client cannot be initialized
    #[instrument(skip_all, fields(model = %settings.model()))]
    pub fn from_settings(settings: &ModelSettings) -> ShowrunnerResult<Self> {
        let api_key = std::env::var(settings.api_key_env()).map_err(|_| {
            ModelError::new(ModelErrorKind::MissingApiKey(
                settings.api_key_env().clone(),
            ))
        })?;

        Self::with_api_key(api_key, settings)
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip(api_key, settings), fields(model = %settings.model()))]
    pub fn with_api_key(api_key: String, settings: &ModelSettings) -> ShowrunnerResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(*settings.timeout_secs()))
            .build()
            .map_err(|e| ModelError::new(ModelErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            client,
            api_key,
            base_url: settings.base_url().trim_end_matches('/').to_string(),
            model: settings.model().clone(),
            temperature: *settings.temperature(),
            max_tokens: *settings.max_tokens(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ModelDriver for OpenAIChatClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> ShowrunnerResult<GenerateResponse> {
        let body =
            conversion::to_openai_request(req, &self.model, self.temperature, self.max_tokens)?;

        let url = self.endpoint();
        debug!(url = %url, messages = body.messages().len(), "Sending chat completions request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    ModelErrorKind::Timeout(e.to_string())
                } else {
                    ModelErrorKind::Transport(e.to_string())
                };
                ModelError::new(kind)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAIErrorBody>(&error_text)
                .map(|body| body.error.message)
                .unwrap_or(error_text);
            return Err(ModelError::new(ModelErrorKind::Api {
                status_code: status.as_u16(),
                message,
            })
            .into());
        }

        let parsed: OpenAIChatResponse = response.json().await.map_err(|e| {
            ModelError::new(ModelErrorKind::InvalidResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        if let Some(usage) = parsed.usage() {
            debug!(
                prompt_tokens = usage.prompt_tokens(),
                completion_tokens = usage.completion_tokens(),
                "Chat completion usage"
            );
        }

        conversion::from_openai_response(&parsed)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
