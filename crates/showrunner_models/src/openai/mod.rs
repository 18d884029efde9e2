//! OpenAI-compatible chat completions backend.

mod client;
mod conversion;
mod dto;

pub use client::OpenAIChatClient;
pub use dto::{
    OpenAIChatRequest, OpenAIChatRequestBuilder, OpenAIChatResponse, OpenAIMessage,
    OpenAIResponseFormat, OpenAIRole,
};
