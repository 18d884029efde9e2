//! Chat completions data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// Chat message in a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct OpenAIMessage {
    /// Message role
    role: OpenAIRole,
    /// Message content
    content: String,
}

impl OpenAIMessage {
    /// Creates a new builder for `OpenAIMessage`.
    pub fn builder() -> OpenAIMessageBuilder {
        OpenAIMessageBuilder::default()
    }
}

/// Schema payload for `response_format.type = "json_schema"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct OpenAIJsonSchema {
    /// Schema name
    name: String,
    /// JSON schema
    schema: serde_json::Value,
    /// Strict schema adherence
    strict: bool,
}

impl OpenAIJsonSchema {
    /// Build a schema payload.
    pub fn new(name: String, schema: serde_json::Value, strict: bool) -> Self {
        Self {
            name,
            schema,
            strict,
        }
    }
}

/// Requested reply format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAIResponseFormat {
    /// Plain text
    Text,
    /// Any JSON object
    JsonObject,
    /// JSON matching a schema
    JsonSchema {
        /// The schema payload
        json_schema: OpenAIJsonSchema,
    },
}

/// Chat completions request body.
#[derive(Debug, Clone, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct OpenAIChatRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<OpenAIMessage>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Temperature for sampling
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Reply format constraint
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAIResponseFormat>,
}

impl OpenAIChatRequest {
    /// Creates a new builder for `OpenAIChatRequest`.
    pub fn builder() -> OpenAIChatRequestBuilder {
        OpenAIChatRequestBuilder::default()
    }
}

/// Message returned inside a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAIResponseMessage {
    /// Reply text; absent on refusals
    #[serde(default)]
    content: Option<String>,
    /// Refusal explanation, if the model declined
    #[serde(default)]
    refusal: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAIChoice {
    /// Choice index
    #[serde(default)]
    index: u32,
    /// The generated message
    message: OpenAIResponseMessage,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct OpenAIUsage {
    /// Prompt tokens consumed
    #[serde(default)]
    prompt_tokens: u32,
    /// Completion tokens generated
    #[serde(default)]
    completion_tokens: u32,
}

/// Chat completions response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAIChatResponse {
    /// Completion choices
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    /// Token usage
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

/// Error body returned on non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenAIErrorBody {
    pub(crate) error: OpenAIErrorDetail,
}

/// Error detail inside an error body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OpenAIErrorDetail {
    pub(crate) message: String,
}
