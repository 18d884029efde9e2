//! Language model backends for Showrunner.
//!
//! - [`OpenAIChatClient`] talks to any OpenAI-compatible chat completions API.
//! - [`RetryingDriver`] wraps any [`ModelDriver`](showrunner_interface::ModelDriver)
//!   with bounded exponential backoff on transient failures.
//!
//! ```no_run
//! use showrunner_core::{GenerateRequest, Message, ModelSettings, RetrySettings};
//! use showrunner_interface::ModelDriver;
//! use showrunner_models::{OpenAIChatClient, RetryingDriver};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAIChatClient::from_settings(&ModelSettings::default())?;
//! let driver = RetryingDriver::new(client, RetrySettings::new(3, 2000, 60));
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Say hello")])
//!     .build()?;
//! let response = driver.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;
mod retry;

pub use openai::{
    OpenAIChatClient, OpenAIChatRequest, OpenAIChatRequestBuilder, OpenAIChatResponse,
    OpenAIMessage, OpenAIResponseFormat, OpenAIRole,
};
pub use retry::RetryingDriver;
