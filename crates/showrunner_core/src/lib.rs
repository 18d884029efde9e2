//! Core data types for the Showrunner scene simulation toolkit.
//!
//! This crate provides the types shared by every other crate: chat messages,
//! generation requests and responses, the shot list a scene produces, and
//! the settings that shape model calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod format;
mod media;
mod message;
mod output;
mod request;
mod role;
mod settings;
mod shot;

pub use format::ResponseFormat;
pub use media::{MediaAsset, MediaKind};
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use settings::{ModelSettings, RetrySettings};
pub use shot::{Shot, ShotList};
