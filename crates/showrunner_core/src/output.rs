//! Output types from model responses.

use serde::{Deserialize, Serialize};

/// One piece of a model reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output, produced when a backend decodes the reply itself.
    Json(serde_json::Value),
}
