//! Trait definitions for the Showrunner toolkit.
//!
//! A scene run talks to exactly one kind of collaborator, a [`ModelDriver`].
//! The asset stage talks to four more: [`ImageGenerator`], [`VideoGenerator`],
//! [`SpeechSynthesizer`] and [`MediaAssembler`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageGenerator, MediaAssembler, ModelDriver, SpeechSynthesizer, VideoGenerator};
