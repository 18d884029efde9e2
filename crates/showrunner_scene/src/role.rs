//! Agent roles.

use serde::{Deserialize, Serialize};

/// What an agent does on its turn.
///
/// # Examples
///
/// ```
/// use showrunner_scene::AgentRole;
/// use std::str::FromStr;
///
/// let role = AgentRole::from_str("script_writer").unwrap();
/// assert_eq!(role, AgentRole::ScriptWriter);
/// assert_eq!(role.to_string(), "script_writer");
/// assert!(!AgentRole::PromptHelper.retains_memory());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgentRole {
    /// Speaks and acts inside the scene
    Character,
    /// Turns the scene into a shot list and revises it on feedback
    ScriptWriter,
    /// Critiques the latest script
    Producer,
    /// Rewrites prompts on request; keeps no memory
    PromptHelper,
}

impl AgentRole {
    /// Whether replies from this role are kept in short-term memory.
    pub fn retains_memory(&self) -> bool {
        !matches!(self, Self::PromptHelper)
    }

    /// Whether this role joins the turn order when none is declared.
    pub fn in_default_order(&self) -> bool {
        !matches!(self, Self::PromptHelper)
    }
}
