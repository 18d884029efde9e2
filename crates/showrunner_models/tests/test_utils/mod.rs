//! Test utilities for model backend tests.

use showrunner_core::{GenerateRequest, Message};

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockBehavior, MockDriver};

/// Helper to create a single-message request.
pub fn create_test_request(prompt: &str) -> GenerateRequest {
    GenerateRequest::builder()
        .messages(vec![Message::user(prompt)])
        .max_tokens(Some(16))
        .build()
        .expect("Failed to build test request")
}
