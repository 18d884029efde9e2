//! Showrunner - multi-agent scene simulation that writes shot lists
//!
//! A cast of language-model agents plays out a scene over a fixed number of
//! turns. Characters speak, a script writer turns the scene into a list of
//! shots, and a producer critiques each draft until the run ends. The final
//! shot list can then be handed to the asset stage, which turns every shot
//! into an image, a clip and a voice-over.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use showrunner::{
//!     Dispatcher, ModelDriver, OpenAIChatClient, RetryingDriver, RunOutcome, Scenario,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scenario = Scenario::load("scenario.toml")?;
//!     let client = OpenAIChatClient::from_settings(scenario.model())?;
//!     let driver: Arc<dyn ModelDriver> = Arc::new(RetryingDriver::new(client, *scenario.retry()));
//!
//!     let mut dispatcher = Dispatcher::from_scenario(&scenario, driver)?;
//!     if let RunOutcome::Complete { shot_list: Some(shots), .. } = dispatcher.advance(None).await? {
//!         println!("{}", shots.to_text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Showrunner is organized as a workspace with focused crates:
//!
//! - `showrunner_error` - Error types
//! - `showrunner_core` - Messages, requests, shots and settings
//! - `showrunner_interface` - `ModelDriver` and media backend traits
//! - `showrunner_models` - OpenAI-compatible client and retry decorator
//! - `showrunner_scene` - Agents, memory, scenarios and the turn dispatcher
//! - `showrunner_production` - Prompt augmentation and the asset pipeline
//!
//! This crate (`showrunner`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use showrunner_core::*;
pub use showrunner_error::*;
pub use showrunner_interface::*;
pub use showrunner_models::*;
pub use showrunner_production::*;
pub use showrunner_scene::*;

pub mod telemetry;
