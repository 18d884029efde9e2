//! Scenario configuration: the scene, the model, and the cast.
//!
//! Scenarios are TOML files loaded through the `config` crate with this
//! precedence (later sources win):
//! - Bundled defaults (include_str! from showrunner.toml)
//! - `~/.config/showrunner/showrunner.toml`
//! - `./showrunner.toml`
//! - The scenario file itself
//! - `SHOWRUNNER__*` environment variables

use crate::{AgentProfile, AgentRole, cast};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use showrunner_core::{ModelSettings, RetrySettings};
use showrunner_error::{ConfigError, ShowrunnerError, ShowrunnerResult};
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../showrunner.toml");

/// How a run proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct SceneSettings {
    /// Opening narrative; seeds the scene log and the script writer's first prompt
    narrative: String,
    /// Number of turns
    iterations: usize,
    /// Pause for human input after every turn
    interactive: bool,
    /// Characters reflect before they speak
    reflect: bool,
    /// Agents summarize their short-term memory after every turn
    summarize_each_turn: bool,
    /// Ask the script writer for one more revision after the last turn
    final_revision: bool,
    /// Turn order by agent name; defaults to every non-helper agent
    order: Option<Vec<String>>,
    /// Requested number of shots, passed to the script writer as a hint
    shot_count: Option<usize>,
    /// Prompt helper that rewrites image prompts for the asset stage
    image_helper: Option<String>,
    /// Prompt helper that writes video prompts for the asset stage
    video_helper: Option<String>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            narrative: String::new(),
            iterations: 3,
            interactive: false,
            reflect: false,
            summarize_each_turn: false,
            final_revision: false,
            order: None,
            shot_count: None,
            image_helper: None,
            video_helper: None,
        }
    }
}

impl SceneSettings {
    /// Replace the opening narrative.
    pub fn with_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.narrative = narrative.into();
        self
    }

    /// Replace the number of turns.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Turn interactive mode on or off.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

/// A complete scenario: scene settings, model settings, retry policy, cast.
///
/// # Examples
///
/// ```
/// use showrunner_scene::Scenario;
///
/// let scenario = Scenario::from_toml_str(r#"
///     [scene]
///     narrative = "bob walks into the living room"
///     iterations = 1
///
///     [[agents]]
///     name = "alex"
///     role = "character"
///     persona = "A retired sailor."
///
///     [[agents]]
///     name = "bob"
///     role = "character"
///     persona = "Alex's anxious roommate."
/// "#).unwrap();
///
/// assert_eq!(*scenario.scene().iterations(), 1);
/// assert_eq!(scenario.agents().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Scenario {
    /// Scene settings
    #[serde(default)]
    scene: SceneSettings,
    /// Model settings
    #[serde(default)]
    model: ModelSettings,
    /// Retry policy for model calls
    #[serde(default)]
    retry: RetrySettings,
    /// The cast, in declaration order
    #[serde(default)]
    agents: Vec<AgentProfile>,
}

impl Scenario {
    /// A scenario built in code.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the cast is invalid.
    pub fn new(scene: SceneSettings, agents: Vec<AgentProfile>) -> ShowrunnerResult<Self> {
        let scenario = Self {
            scene,
            model: ModelSettings::default(),
            retry: RetrySettings::default(),
            agents,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file on top of the bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read, parsed, or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ShowrunnerResult<Self> {
        debug!("Loading scenario from file");
        let builder = defaults().add_source(File::from(path.as_ref()));
        finish(builder, &path.as_ref().display().to_string())
    }

    /// Parse a scenario from TOML text on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text cannot be parsed or validated.
    pub fn from_toml_str(toml: &str) -> ShowrunnerResult<Self> {
        let builder = defaults().add_source(File::from_str(toml, FileFormat::Toml));
        finish(builder, "inline scenario")
    }

    /// Load a scenario with the full precedence chain: bundled defaults,
    /// user config, working-directory config, the scenario file, then
    /// `SHOWRUNNER__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any source is malformed or the
    /// result does not validate.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> ShowrunnerResult<Self> {
        debug!("Loading scenario with user overrides");

        let mut builder = defaults();
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/showrunner/showrunner.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }
        builder = builder
            .add_source(File::with_name("showrunner").required(false))
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix("SHOWRUNNER").separator("__"));

        finish(builder, &path.as_ref().display().to_string())
    }

    /// Check the cast against the scene settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when:
    /// - an agent has a blank name or persona
    /// - two agents share a name
    /// - the turn order is empty or names an unknown agent
    /// - a configured helper is missing or is not a prompt helper
    pub fn validate(&self) -> Result<(), ConfigError> {
        let profiles: Vec<&AgentProfile> = self.agents.iter().collect();
        cast::resolve_order(&profiles, self.scene.order.as_deref())?;

        for (setting, helper) in [
            ("image_helper", &self.scene.image_helper),
            ("video_helper", &self.scene.video_helper),
        ] {
            let Some(name) = helper else { continue };
            match self.agent(name) {
                Some(profile) if *profile.role() == AgentRole::PromptHelper => {}
                Some(_) => {
                    return Err(ConfigError::new(format!(
                        "{} '{}' must have role prompt_helper",
                        setting, name
                    )));
                }
                None => {
                    return Err(ConfigError::new(format!(
                        "{} names unknown agent '{}'",
                        setting, name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up an agent profile by name.
    pub fn agent(&self, name: &str) -> Option<&AgentProfile> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// Replace the scene settings.
    pub fn with_scene(mut self, scene: SceneSettings) -> Self {
        self.scene = scene;
        self
    }

    /// Replace the model settings.
    pub fn with_model(mut self, model: ModelSettings) -> Self {
        self.model = model;
        self
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn finish(builder: ConfigBuilder<DefaultState>, source: &str) -> ShowrunnerResult<Scenario> {
    let scenario: Scenario = builder
        .build()
        .map_err(|e| {
            ShowrunnerError::from(ConfigError::new(format!(
                "Failed to read scenario from {}: {}",
                source, e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            ShowrunnerError::from(ConfigError::new(format!(
                "Failed to parse scenario from {}: {}",
                source, e
            )))
        })?;

    scenario.validate()?;
    debug!(
        agents = scenario.agents.len(),
        iterations = scenario.scene.iterations,
        "Scenario loaded"
    );
    Ok(scenario)
}
