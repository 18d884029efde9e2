//! Agent identity as loaded from configuration.

use crate::AgentRole;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use showrunner_error::ConfigError;

/// Who an agent is: name, role, persona and optional style hints.
///
/// Field aliases accept older agent files (`system_prompt`,
/// `lora_key_word`, `flux_caption`).
///
/// # Examples
///
/// ```
/// use showrunner_scene::{AgentProfile, AgentRole};
///
/// let alex = AgentProfile::new("alex", AgentRole::Character, "A retired sailor who hums sea shanties.")
///     .with_style_keyword("alexsailor")
///     .with_base_observations(["alex lives with bob"]);
///
/// assert_eq!(alex.name(), "alex");
/// assert!(alex.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct AgentProfile {
    /// Unique name within a cast
    name: String,
    /// What the agent does on its turn
    role: AgentRole,
    /// Persona and standing instructions sent as the system prompt
    #[serde(alias = "system_prompt")]
    persona: String,
    /// Style trigger word prepended to image prompts
    #[serde(default, alias = "lora_key_word")]
    style_keyword: Option<String>,
    /// Visual description appended to image prompts
    #[serde(default, alias = "flux_caption")]
    caption: Option<String>,
    /// Observations loaded into short-term memory when the agent is created
    #[serde(default)]
    base_observations: Vec<String>,
}

impl AgentProfile {
    /// A profile with no style hints or base observations.
    pub fn new(name: impl Into<String>, role: AgentRole, persona: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role,
            persona: persona.into(),
            style_keyword: None,
            caption: None,
            base_observations: Vec::new(),
        }
    }

    /// Set the style trigger word.
    pub fn with_style_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.style_keyword = Some(keyword.into());
        self
    }

    /// Set the visual caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the observations seeded into memory.
    pub fn with_base_observations<I, S>(mut self, observations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_observations = observations.into_iter().map(Into::into).collect();
        self
    }

    /// Check that the identity fields are present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name or persona is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::new(format!(
                "{} agent is missing a name",
                self.role
            )));
        }
        if self.persona.trim().is_empty() {
            return Err(ConfigError::new(format!(
                "agent '{}' is missing a persona",
                self.name
            )));
        }
        Ok(())
    }
}
