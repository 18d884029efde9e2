//! Requested reply formats.

use serde::{Deserialize, Serialize};

/// Constrains the shape of a model reply.
///
/// # Examples
///
/// ```
/// use showrunner_core::{ResponseFormat, ShotList};
///
/// let format = ResponseFormat::json_schema("shot_list", ShotList::json_schema());
/// assert!(format.is_structured());
/// assert!(!ResponseFormat::Text.is_structured());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text
    Text,
    /// Any JSON object
    JsonObject,
    /// JSON matching the given schema
    JsonSchema {
        /// Schema name reported to the backend
        name: String,
        /// The JSON schema itself
        schema: serde_json::Value,
        /// Whether the backend must reject replies that do not match
        strict: bool,
    },
}

impl ResponseFormat {
    /// Strict JSON schema format.
    pub fn json_schema(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self::JsonSchema {
            name: name.into(),
            schema,
            strict: true,
        }
    }

    /// True for any JSON format.
    pub fn is_structured(&self) -> bool {
        !matches!(self, Self::Text)
    }
}
