//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, JsonError, ModelError, ProductionError, SceneError,
    ScriptError,
};

/// Every error condition a Showrunner crate can report.
///
/// # Examples
///
/// ```
/// use showrunner_error::{ModelError, ModelErrorKind, ShowrunnerError};
///
/// let model_err = ModelError::new(ModelErrorKind::Transport("connection reset".into()));
/// let err: ShowrunnerError = model_err.into();
/// assert!(format!("{}", err).contains("Model Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ShowrunnerErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Model call failure
    #[from(ModelError)]
    Model(ModelError),
    /// Malformed structured reply
    #[from(ScriptError)]
    Script(ScriptError),
    /// Scene loop error
    #[from(SceneError)]
    Scene(SceneError),
    /// Asset production error
    #[from(ProductionError)]
    Production(ProductionError),
}

/// Showrunner error with kind discrimination.
///
/// # Examples
///
/// ```
/// use showrunner_error::{ConfigError, ShowrunnerResult};
///
/// fn might_fail() -> ShowrunnerResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Showrunner Error: {}", _0)]
pub struct ShowrunnerError(Box<ShowrunnerErrorKind>);

impl ShowrunnerError {
    /// Create a new error from a kind.
    pub fn new(kind: ShowrunnerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ShowrunnerErrorKind {
        &self.0
    }

    /// True when a model call failed, transport errors included.
    pub fn is_model_call_failure(&self) -> bool {
        matches!(self.kind(), ShowrunnerErrorKind::Model(_))
    }

    /// True when a structured reply could not be parsed into a shot list.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self.kind(), ShowrunnerErrorKind::Script(_))
    }

    /// True when a scenario or agent definition was rejected.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self.kind(), ShowrunnerErrorKind::Config(_))
    }
}

// Generic From implementation for any type that converts to ShowrunnerErrorKind
impl<T> From<T> for ShowrunnerError
where
    T: Into<ShowrunnerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Showrunner operations.
pub type ShowrunnerResult<T> = std::result::Result<T, ShowrunnerError>;
