//! Shared helpers for scene integration tests.

#![allow(dead_code)]

mod scripted_driver;

pub use scripted_driver::ScriptedDriver;

use showrunner_scene::{
    Agent, AgentProfile, AgentRole, Cast, Dispatcher, RunConfig, RunMode,
};
use std::sync::Arc;

pub const OPENING: &str = "bob walks into the living room and sees alex on the couch";

/// Shot list JSON with one shot per action.
pub fn shot_json(actions: &[&str]) -> String {
    let shots: Vec<String> = actions
        .iter()
        .map(|action| {
            format!(
                r#"{{"action": "{}", "image_prompt": "{} key frame", "voice_over": "{} line"}}"#,
                action, action, action
            )
        })
        .collect();
    format!(r#"{{"shots": [{}]}}"#, shots.join(", "))
}

pub fn character(name: &str) -> AgentProfile {
    AgentProfile::new(name, AgentRole::Character, format!("{} is a character in a sitcom.", name))
}

pub fn script_writer() -> AgentProfile {
    AgentProfile::new(
        "writer",
        AgentRole::ScriptWriter,
        "You write short animated scenes.",
    )
    .with_style_keyword("toonstyle")
    .with_caption("red scarf, blue coat")
}

pub fn producer() -> AgentProfile {
    AgentProfile::new("producer", AgentRole::Producer, "You are a demanding producer.")
}

pub fn helper(name: &str) -> AgentProfile {
    AgentProfile::new(
        name,
        AgentRole::PromptHelper,
        "Rewrite prompts for an image model.",
    )
}

pub fn cast(driver: &Arc<ScriptedDriver>, profiles: Vec<AgentProfile>) -> Cast {
    let agents = profiles
        .into_iter()
        .map(|profile| {
            let mut agent = Agent::new(profile.clone(), driver.clone());
            agent.load_observations(profile.base_observations().iter().cloned());
            agent
        })
        .collect();
    Cast::new(agents, None).expect("valid cast")
}

pub fn config(iterations: usize) -> RunConfig {
    RunConfig::builder()
        .narrative(OPENING)
        .iterations(iterations)
        .build()
        .expect("valid run config")
}

pub fn dispatcher(
    driver: &Arc<ScriptedDriver>,
    profiles: Vec<AgentProfile>,
    config: RunConfig,
    mode: RunMode,
) -> Dispatcher {
    Dispatcher::new(cast(driver, profiles), config, mode)
}
