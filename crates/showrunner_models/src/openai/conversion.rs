//! Type conversions between Showrunner and chat completions types.

use super::dto::{
    OpenAIChatRequest, OpenAIChatResponse, OpenAIJsonSchema, OpenAIMessage, OpenAIResponseFormat,
    OpenAIRole,
};
use showrunner_core::{GenerateRequest, GenerateResponse, Message, Output, ResponseFormat, Role};
use showrunner_error::{BuilderError, ModelError, ModelErrorKind, ShowrunnerResult};

/// Converts a GenerateRequest into a chat completions request.
///
/// Request-level model, temperature and token limits win over the client defaults.
pub fn to_openai_request(
    request: &GenerateRequest,
    model: &str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> ShowrunnerResult<OpenAIChatRequest> {
    let messages = request
        .messages()
        .iter()
        .map(to_openai_message)
        .collect::<ShowrunnerResult<Vec<_>>>()?;

    let model = request.model().clone().unwrap_or_else(|| model.to_string());

    OpenAIChatRequest::builder()
        .model(model)
        .messages(messages)
        .temperature(request.temperature().or(temperature))
        .max_tokens(request.max_tokens().or(max_tokens))
        .response_format(request.response_format().as_ref().map(to_openai_format))
        .build()
        .map_err(|e| {
            BuilderError::from(format!("Failed to build chat completions request: {}", e)).into()
        })
}

/// Converts a chat completions response into a GenerateResponse.
///
/// Only the first choice is used.
pub fn from_openai_response(response: &OpenAIChatResponse) -> ShowrunnerResult<GenerateResponse> {
    let choice = response
        .choices()
        .first()
        .ok_or_else(|| ModelError::new(ModelErrorKind::EmptyResponse))?;

    if let Some(refusal) = choice.message().refusal() {
        return Err(ModelError::new(ModelErrorKind::InvalidResponse(format!(
            "model refused: {}",
            refusal
        )))
        .into());
    }

    let text = choice.message().content().clone().unwrap_or_default();
    Ok(GenerateResponse {
        outputs: vec![Output::Text(text)],
    })
}

fn to_openai_message(message: &Message) -> ShowrunnerResult<OpenAIMessage> {
    OpenAIMessage::builder()
        .role(to_openai_role(message.role))
        .content(message.content.clone())
        .build()
        .map_err(|e| BuilderError::from(format!("Failed to build chat message: {}", e)).into())
}

fn to_openai_role(role: Role) -> OpenAIRole {
    match role {
        Role::System => OpenAIRole::System,
        Role::User => OpenAIRole::User,
        Role::Assistant => OpenAIRole::Assistant,
    }
}

fn to_openai_format(format: &ResponseFormat) -> OpenAIResponseFormat {
    match format {
        ResponseFormat::Text => OpenAIResponseFormat::Text,
        ResponseFormat::JsonObject => OpenAIResponseFormat::JsonObject,
        ResponseFormat::JsonSchema {
            name,
            schema,
            strict,
        } => OpenAIResponseFormat::JsonSchema {
            json_schema: OpenAIJsonSchema::new(name.clone(), schema.clone(), *strict),
        },
    }
}
