//! Scene loop errors.

/// Specific error conditions raised by the scene loop itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SceneErrorKind {
    /// Agent name not present in the cast
    #[display("Unknown agent: {}", _0)]
    UnknownAgent(String),
    /// Human input could not be read
    #[display("Failed to read input: {}", _0)]
    Input(String),
    /// Scene log or shot list could not be written
    #[display("Failed to export: {}", _0)]
    Export(String),
    /// Story beat starts past the end of the scene log
    #[display("Story beat {} is past the end of the scene log ({} entries)", beat, entries)]
    BeatOutOfRange {
        /// Requested beat
        beat: usize,
        /// Entries in the log
        entries: usize,
    },
    /// Saved shot list could not be read
    #[display("Failed to import shot list: {}", _0)]
    Import(String),
}

/// Scene loop error with location tracking.
///
/// # Examples
///
/// ```
/// use showrunner_error::{SceneError, SceneErrorKind};
///
/// let err = SceneError::new(SceneErrorKind::UnknownAgent("carol".into()));
/// assert!(format!("{}", err).contains("carol"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scene Error: {} at line {} in {}", kind, line, file)]
pub struct SceneError {
    /// The specific error kind
    pub kind: SceneErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl SceneError {
    /// Create a new scene error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SceneErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
