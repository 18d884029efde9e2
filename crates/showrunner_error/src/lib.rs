//! Error types for the Showrunner workspace.
//!
//! Every crate in the workspace reports failures through [`ShowrunnerError`].
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Three categories matter to callers of the scene loop:
//! - [`ModelError`]: a model call failed (transport, API, timeout)
//! - [`ScriptError`]: a structured reply could not be parsed into shots
//! - [`ConfigError`]: a scenario or agent definition is invalid
//!
//! # Examples
//!
//! ```
//! use showrunner_error::{ConfigError, ShowrunnerResult};
//!
//! fn load() -> ShowrunnerResult<String> {
//!     Err(ConfigError::new("agent 'narrator' has no persona"))?
//! }
//!
//! let err = load().unwrap_err();
//! assert!(err.is_configuration_error());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod json;
mod model;
mod production;
mod scene;
mod script;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{ShowrunnerError, ShowrunnerErrorKind, ShowrunnerResult};
pub use json::JsonError;
pub use model::{ModelError, ModelErrorKind, RetryableError};
pub use production::{ProductionError, ProductionErrorKind};
pub use scene::{SceneError, SceneErrorKind};
pub use script::{ScriptError, ScriptErrorKind};
