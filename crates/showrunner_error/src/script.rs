//! Errors for structured script replies.

/// Reasons a structured reply could not become a shot list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScriptErrorKind {
    /// No JSON object or array in the reply text
    #[display("No JSON found in response: {}", _0)]
    NoJsonFound(String),
    /// JSON present but not shaped like a shot list
    #[display("Response does not match the shot list schema: {}", _0)]
    SchemaMismatch(String),
    /// Reply parsed but contained zero shots
    #[display("Shot list is empty")]
    EmptyShotList,
    /// Stored record could not be read or written
    #[display("Shot list record error: {}", _0)]
    Record(String),
}

/// Malformed structured response with location tracking.
///
/// # Examples
///
/// ```
/// use showrunner_error::{ScriptError, ScriptErrorKind};
///
/// let err = ScriptError::new(ScriptErrorKind::EmptyShotList);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Script Error: {} at line {} in {}", kind, line, file)]
pub struct ScriptError {
    /// The specific error kind
    pub kind: ScriptErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ScriptError {
    /// Create a new script error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ScriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
