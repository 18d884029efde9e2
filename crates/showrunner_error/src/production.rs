//! Asset production errors.

/// Failures while turning a shot list into media.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProductionErrorKind {
    /// Output directory could not be prepared
    #[display("Failed to prepare output directory '{}': {}", path, message)]
    Directory {
        /// Directory path
        path: String,
        /// Error message
        message: String,
    },
    /// Image generation backend failed
    #[display("Image generation failed: {}", _0)]
    Image(String),
    /// Video generation backend failed
    #[display("Video generation failed: {}", _0)]
    Video(String),
    /// Speech synthesis backend failed
    #[display("Speech synthesis failed: {}", _0)]
    Speech(String),
    /// Combining or concatenating clips failed
    #[display("Media assembly failed: {}", _0)]
    Assembly(String),
}

/// Asset production error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Production Error: {} at line {} in {}", kind, line, file)]
pub struct ProductionError {
    /// The specific error kind
    pub kind: ProductionErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ProductionError {
    /// Create a new production error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ProductionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
