//! Multi-agent scene simulation for Showrunner.
//!
//! A scene is a fixed number of turns. On each turn every agent in the
//! declared order reads the shared [`SceneLog`], calls the model once, and
//! appends its reply. Characters speak in free text, the script writer
//! answers with a structured [`ShotList`](showrunner_core::ShotList), and the
//! producer critiques the latest script so the writer can revise it on the
//! next turn.
//!
//! The [`Dispatcher`] owns the log and the turn counter and is driven through
//! a single entry point, [`Dispatcher::advance`]. In interactive mode it
//! pauses after each turn and waits for the caller to supply an observation.
//!
//! # Example
//!
//! ```no_run
//! use showrunner_scene::{Dispatcher, RunOutcome, Scenario};
//! use showrunner_interface::ModelDriver;
//! use std::sync::Arc;
//!
//! # async fn run(driver: Arc<dyn ModelDriver>) -> Result<(), Box<dyn std::error::Error>> {
//! let scenario = Scenario::from_file("scenario.toml")?;
//! let mut dispatcher = Dispatcher::from_scenario(&scenario, driver)?;
//!
//! let mut input: Option<String> = None;
//! loop {
//!     match dispatcher.advance(input.as_deref()).await? {
//!         RunOutcome::AwaitingInput { .. } => input = Some(String::new()),
//!         RunOutcome::Complete { shot_list, .. } => {
//!             if let Some(shots) = shot_list {
//!                 println!("{}", shots.to_text());
//!             }
//!             break;
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod cast;
mod dispatcher;
mod export;
mod extraction;
mod memory;
mod profile;
mod prompts;
mod role;
mod scenario;
mod scene_log;

pub use agent::{Agent, SceneContext};
pub use cast::Cast;
pub use dispatcher::{
    Dispatcher, INTERACTIVE_SENTINEL, RunConfig, RunConfigBuilder, RunMode, RunOutcome, RunState,
    RunStatus, SCENE_COMPLETE, TurnEvent,
};
pub use export::{read_shot_list, write_scene_log, write_shot_list, write_shot_list_text};
pub use extraction::{extract_json, parse_shot_list};
pub use memory::Memory;
pub use profile::AgentProfile;
pub use role::AgentRole;
pub use scenario::{Scenario, SceneSettings};
pub use scene_log::SceneLog;
