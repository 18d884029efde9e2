//! The turn dispatcher: an explicit state machine over a run.

use crate::{AgentRole, Cast, Memory, Scenario, SceneContext, SceneLog, SceneSettings, prompts};
use derive_builder::Builder;
use derive_getters::Getters;
use showrunner_core::ShotList;
use showrunner_error::ShowrunnerResult;
use showrunner_interface::ModelDriver;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Input that switches the session to interactive mode.
pub const INTERACTIVE_SENTINEL: &str = "interactive";

/// Terminal signal reported once when a run completes.
pub const SCENE_COMPLETE: &str = "The scene is complete";

/// Whether the dispatcher pauses between turns.
///
/// The mode belongs to the session, not the run: it survives resets and
/// restarts. Once interactive, always interactive.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum RunMode {
    /// Run every remaining turn in one `advance`
    #[default]
    Autonomous,
    /// Pause after each turn for an observation
    Interactive,
}

/// Where a run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Nothing has run yet
    Idle,
    /// Turn `turn` is in progress
    Running {
        /// Zero-based turn index
        turn: usize,
    },
    /// Paused after a turn, waiting for the caller
    AwaitingInput {
        /// Turn that runs on the next `advance`
        next_turn: usize,
    },
    /// Every turn has run
    Complete,
}

/// Per-run knobs, usually taken from [`SceneSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Builder, Getters)]
#[builder(setter(into))]
pub struct RunConfig {
    /// Opening narrative
    #[builder(default)]
    narrative: String,
    /// Number of turns
    iterations: usize,
    /// Characters reflect before speaking
    #[builder(default)]
    reflect: bool,
    /// Summarize memories at the end of every turn
    #[builder(default)]
    summarize_each_turn: bool,
    /// One more script revision once every turn has run
    #[builder(default)]
    final_revision: bool,
    /// Shot count hint for the script writer
    #[builder(default)]
    shot_count: Option<usize>,
}

impl RunConfig {
    /// Start building a run configuration.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }
}

impl From<&SceneSettings> for RunConfig {
    fn from(scene: &SceneSettings) -> Self {
        Self {
            narrative: scene.narrative().clone(),
            iterations: *scene.iterations(),
            reflect: *scene.reflect(),
            summarize_each_turn: *scene.summarize_each_turn(),
            final_revision: *scene.final_revision(),
            shot_count: *scene.shot_count(),
        }
    }
}

/// Everything a run accumulates. Replaced wholesale on reset.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct RunState {
    /// Identifier for log correlation
    run_id: Uuid,
    /// The shared scene log
    scene_log: SceneLog,
    /// Number of completed turns
    turn: usize,
    /// Where the run is
    status: RunStatus,
    /// What the next agent responds to
    observation: String,
    /// The latest shot list from the script writer
    latest_script: Option<ShotList>,
    /// The shot list from the final revision, when enabled
    final_script: Option<ShotList>,
}

impl RunState {
    fn fresh(narrative: &str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            scene_log: SceneLog::with_opening(narrative),
            turn: 0,
            status: RunStatus::Idle,
            observation: narrative.to_string(),
            latest_script: None,
            final_script: None,
        }
    }
}

/// Something that happened during `advance`, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// Caller input appended to the scene log
    Observation(String),
    /// A character's reflection; not part of the scene log
    Thought {
        /// Agent name
        agent: String,
        /// Reflection text
        text: String,
    },
    /// A character's line
    Line {
        /// Agent name
        agent: String,
        /// Reply text
        text: String,
    },
    /// A new shot list from the script writer
    Script {
        /// Agent name
        agent: String,
        /// The shots
        shots: ShotList,
    },
    /// Producer feedback on the latest script
    Critique {
        /// Agent name
        agent: String,
        /// Feedback text
        text: String,
    },
    /// A prompt helper's rewrite
    Assist {
        /// Agent name
        agent: String,
        /// Rewritten text
        text: String,
    },
    /// An agent folded its short-term memory into long-term memory
    Summary {
        /// Agent name
        agent: String,
        /// The new long-term entry
        text: String,
    },
    /// Every turn has run
    SceneComplete,
}

impl fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Observation(text) => write!(f, "{}", text),
            Self::Thought { agent, text } => write!(f, "({} thinks) {}", agent, text),
            Self::Line { agent, text }
            | Self::Critique { agent, text }
            | Self::Assist { agent, text } => write!(f, "{}: {}", agent, text),
            Self::Script { agent, shots } => write!(f, "{}:\n{}", agent, shots.to_text()),
            Self::Summary { agent, text } => write!(f, "({} remembers) {}", agent, text),
            Self::SceneComplete => write!(f, "{}", SCENE_COMPLETE),
        }
    }
}

/// What `advance` returns.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Paused after a turn
    AwaitingInput {
        /// Number of completed turns
        turn: usize,
        /// What happened during this call
        events: Vec<TurnEvent>,
    },
    /// Every turn has run
    Complete {
        /// What happened during this call; empty once complete
        events: Vec<TurnEvent>,
        /// The final shot list, if the cast has a script writer
        shot_list: Option<ShotList>,
    },
}

impl RunOutcome {
    /// Events reported by this call.
    pub fn events(&self) -> &[TurnEvent] {
        match self {
            Self::AwaitingInput { events, .. } | Self::Complete { events, .. } => events,
        }
    }

    /// True once the run is over.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }
}

/// Owns the cast and the run state, and moves the run forward.
///
/// Agent calls are awaited one at a time. Any failure aborts the run: the
/// run state is replaced with a fresh one, agent memories are rolled back to
/// where they were when the run started, and the error is returned.
#[derive(Debug)]
pub struct Dispatcher {
    cast: Cast,
    config: RunConfig,
    mode: RunMode,
    state: RunState,
    checkpoint: Option<Vec<Memory>>,
}

impl Dispatcher {
    /// Create an idle dispatcher.
    pub fn new(cast: Cast, config: RunConfig, mode: RunMode) -> Self {
        let state = RunState::fresh(&config.narrative);
        Self {
            cast,
            config,
            mode,
            state,
            checkpoint: None,
        }
    }

    /// Create an idle dispatcher for a scenario, every agent sharing one driver.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the scenario's cast is invalid.
    pub fn from_scenario(
        scenario: &Scenario,
        driver: Arc<dyn ModelDriver>,
    ) -> ShowrunnerResult<Self> {
        let cast = Cast::from_scenario(scenario, driver)?;
        let mode = if *scenario.scene().interactive() {
            RunMode::Interactive
        } else {
            RunMode::Autonomous
        };
        Ok(Self::new(cast, RunConfig::from(scenario.scene()), mode))
    }

    /// The cast.
    pub fn cast(&self) -> &Cast {
        &self.cast
    }

    /// The run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The session mode.
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// The current run state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// The scene log so far.
    pub fn scene_log(&self) -> &SceneLog {
        &self.state.scene_log
    }

    /// Where the run is.
    pub fn status(&self) -> RunStatus {
        self.state.status
    }

    /// The final revision if there is one, otherwise the latest script.
    pub fn shot_list(&self) -> Option<&ShotList> {
        self.state
            .final_script
            .as_ref()
            .or(self.state.latest_script.as_ref())
    }

    /// Discard the current run and start a fresh one. The session mode is kept.
    ///
    /// An unfinished run rolls agent memories back to where they were when it
    /// started. A completed run keeps everything its agents committed.
    pub fn restart(&mut self) {
        self.reset();
    }

    /// Move the run forward.
    ///
    /// `input` is applied first, when the run is idle or awaiting input:
    /// - the interactive sentinel switches the session to interactive mode
    /// - blank input changes nothing
    /// - anything else becomes the observation and is appended to the scene log
    ///
    /// Then turns run until the run completes or, in interactive mode, until
    /// a turn finishes with more turns to go. The last turn always completes.
    ///
    /// # Errors
    ///
    /// Returns the first agent failure. The run is reset before returning.
    #[instrument(skip(self, input), fields(run_id = %self.state.run_id, turn = self.state.turn, mode = %self.mode))]
    pub async fn advance(&mut self, input: Option<&str>) -> ShowrunnerResult<RunOutcome> {
        match self.state.status {
            RunStatus::Complete => {
                debug!("Run already complete");
                return Ok(RunOutcome::Complete {
                    events: Vec::new(),
                    shot_list: self.shot_list().cloned(),
                });
            }
            RunStatus::Running { turn } => {
                warn!(turn, "Previous advance did not finish, starting over");
                self.reset();
            }
            RunStatus::Idle | RunStatus::AwaitingInput { .. } => {}
        }

        let mut events = Vec::new();
        if let Some(input) = input {
            self.apply_input(input, &mut events);
        }

        if self.state.status == RunStatus::Idle {
            self.checkpoint = Some(self.cast.snapshot_memories());
            info!(
                agents = self.cast.turn_length(),
                iterations = self.config.iterations,
                "Starting run"
            );
        }

        match self.run_turns(events).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(error = %e, "Agent failed, run aborted");
                self.reset();
                Err(e)
            }
        }
    }

    fn apply_input(&mut self, input: &str, events: &mut Vec<TurnEvent>) {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case(INTERACTIVE_SENTINEL) {
            if self.mode != RunMode::Interactive {
                info!("Switching to interactive mode");
            }
            self.mode = RunMode::Interactive;
        } else if trimmed.is_empty() {
            debug!("Continuing without a new observation");
        } else {
            debug!(observation = %input, "New observation");
            self.state.observation = input.to_string();
            self.state.scene_log.push(input);
            events.push(TurnEvent::Observation(input.to_string()));
        }
    }

    async fn run_turns(&mut self, mut events: Vec<TurnEvent>) -> ShowrunnerResult<RunOutcome> {
        let total = self.config.iterations;
        while self.state.turn < total {
            let turn = self.state.turn;
            self.state.status = RunStatus::Running { turn };
            self.run_turn(turn, &mut events).await?;
            self.state.turn += 1;

            if self.state.turn < total && self.mode == RunMode::Interactive {
                self.state.status = RunStatus::AwaitingInput {
                    next_turn: self.state.turn,
                };
                debug!(next_turn = self.state.turn, "Awaiting input");
                return Ok(RunOutcome::AwaitingInput {
                    turn: self.state.turn,
                    events,
                });
            }
        }
        self.finish(events).await
    }

    #[instrument(skip(self, events))]
    async fn run_turn(&mut self, turn: usize, events: &mut Vec<TurnEvent>) -> ShowrunnerResult<()> {
        let total = self.config.iterations;
        let order = self.cast.order().to_vec();

        for index in order.iter().copied() {
            let agent = self.cast.agent_at_mut(index);
            let name = agent.name().to_string();
            match agent.role() {
                AgentRole::Character => {
                    if self.config.reflect {
                        let text = agent.reflect().await?;
                        events.push(TurnEvent::Thought {
                            agent: name.clone(),
                            text,
                        });
                    }
                    let context = SceneContext::new(&self.state.scene_log, turn, total);
                    let text = agent
                        .respond_free_text(&self.state.observation, &context)
                        .await?;
                    self.state.scene_log.push(text.as_str());
                    self.state.observation = text.clone();
                    events.push(TurnEvent::Line { agent: name, text });
                }
                AgentRole::ScriptWriter => {
                    let prompt = if turn == 0 {
                        if self.config.narrative.trim().is_empty() {
                            self.state.observation.clone()
                        } else {
                            self.config.narrative.clone()
                        }
                    } else {
                        prompts::revise_prompt(&self.state.observation)
                    };
                    let prompt = prompts::with_shot_hint(prompt, self.config.shot_count);
                    let context = SceneContext::new(&self.state.scene_log, turn, total);
                    let shots = agent.respond_structured(&prompt, &context).await?;

                    let text = shots.to_text();
                    self.state.scene_log.push(text.as_str());
                    self.state.observation = text;
                    self.state.latest_script = Some(shots.clone());
                    events.push(TurnEvent::Script { agent: name, shots });
                }
                AgentRole::Producer => {
                    let script = match &self.state.latest_script {
                        Some(shots) => shots.to_text(),
                        None => self.state.observation.clone(),
                    };
                    let prompt = prompts::critique_prompt(&script);
                    let context = SceneContext::new(&self.state.scene_log, turn, total);
                    let text = agent.respond_free_text(&prompt, &context).await?;
                    self.state.scene_log.push(text.as_str());
                    self.state.observation = text.clone();
                    events.push(TurnEvent::Critique { agent: name, text });
                }
                AgentRole::PromptHelper => {
                    let text = agent.basic_call(&self.state.observation).await?;
                    self.state.scene_log.push(text.as_str());
                    events.push(TurnEvent::Assist { agent: name, text });
                }
            }
        }

        if self.config.summarize_each_turn {
            let mut summarized = Vec::new();
            for index in order {
                if summarized.contains(&index) {
                    continue;
                }
                summarized.push(index);

                let agent = self.cast.agent_at_mut(index);
                if !agent.role().retains_memory() || agent.memory().is_short_term_empty() {
                    continue;
                }
                agent.summarize().await?;
                if let Some(text) = agent.memory().long_term().last() {
                    events.push(TurnEvent::Summary {
                        agent: agent.name().to_string(),
                        text: text.clone(),
                    });
                }
            }
        }

        debug!(log_entries = self.state.scene_log.len(), "Turn finished");
        Ok(())
    }

    async fn finish(&mut self, mut events: Vec<TurnEvent>) -> ShowrunnerResult<RunOutcome> {
        let total = self.config.iterations;
        let writer = if self.config.final_revision {
            self.cast.script_writer_index()
        } else {
            None
        };
        if let Some(index) = writer {
            let prompt = prompts::with_shot_hint(
                prompts::revise_prompt(&self.state.observation),
                self.config.shot_count,
            );
            let agent = self.cast.agent_at_mut(index);
            let name = agent.name().to_string();
            let context = SceneContext::new(&self.state.scene_log, total.saturating_sub(1), total);
            let shots = agent.respond_structured(&prompt, &context).await?;
            self.state.final_script = Some(shots.clone());
            events.push(TurnEvent::Script { agent: name, shots });
        }

        self.state.status = RunStatus::Complete;
        self.checkpoint = None;
        events.push(TurnEvent::SceneComplete);
        info!(
            log_entries = self.state.scene_log.len(),
            shots = self.shot_list().map_or(0, ShotList::len),
            "{}",
            SCENE_COMPLETE
        );
        Ok(RunOutcome::Complete {
            events,
            shot_list: self.shot_list().cloned(),
        })
    }

    fn reset(&mut self) {
        if let Some(snapshot) = self.checkpoint.take() {
            self.cast.restore_memories(snapshot);
        }
        self.state = RunState::fresh(&self.config.narrative);
    }
}
