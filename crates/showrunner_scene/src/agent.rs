//! A persona-bound model caller with its own memory.

use crate::{AgentProfile, AgentRole, Memory, SceneLog, extraction, prompts};
use showrunner_core::{GenerateRequest, Message, ResponseFormat, ShotList};
use showrunner_error::{BuilderError, ModelError, ModelErrorKind, ShowrunnerResult};
use showrunner_interface::ModelDriver;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// What an agent sees of the scene when it responds.
#[derive(Debug, Clone, Copy)]
pub struct SceneContext<'a> {
    log: &'a SceneLog,
    turn: usize,
    total_turns: usize,
}

impl<'a> SceneContext<'a> {
    /// Context for turn `turn` (zero-based) of `total_turns`.
    pub fn new(log: &'a SceneLog, turn: usize, total_turns: usize) -> Self {
        Self {
            log,
            turn,
            total_turns,
        }
    }

    /// The scene so far.
    pub fn log(&self) -> &'a SceneLog {
        self.log
    }

    /// Zero-based turn index.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Number of turns in the run.
    pub fn total_turns(&self) -> usize {
        self.total_turns
    }
}

/// An agent: identity, memory, and a handle to the model.
///
/// Agents never retry. Any model failure is returned to the caller and
/// leaves memory untouched.
pub struct Agent {
    profile: AgentProfile,
    memory: Memory,
    driver: Arc<dyn ModelDriver>,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("profile", &self.profile)
            .field("memory", &self.memory)
            .field("model", &self.driver.model_name())
            .finish()
    }
}

impl Agent {
    /// Create an agent with empty memory.
    pub fn new(profile: AgentProfile, driver: Arc<dyn ModelDriver>) -> Self {
        Self {
            profile,
            memory: Memory::new(),
            driver,
        }
    }

    /// Unique name.
    pub fn name(&self) -> &str {
        self.profile.name()
    }

    /// Role.
    pub fn role(&self) -> AgentRole {
        *self.profile.role()
    }

    /// Identity and persona.
    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Current memory.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Replace memory wholesale, used to roll back an aborted run.
    pub(crate) fn restore_memory(&mut self, memory: Memory) {
        self.memory = memory;
    }

    /// Seed short-term memory with observations.
    pub fn load_observations<I, S>(&mut self, observations: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.memory.remember_all(observations);
    }

    /// Free-text reply to `prompt` given the scene so far.
    ///
    /// The request carries the persona, short-term memory and scene context
    /// as the system message and `prompt` as the user message. Roles that
    /// retain memory remember the reply.
    ///
    /// # Errors
    ///
    /// Returns the model error unchanged if the call fails.
    #[instrument(skip(self, prompt, context), fields(agent = %self.name(), role = %self.role(), turn = context.turn()))]
    pub async fn respond_free_text(
        &mut self,
        prompt: &str,
        context: &SceneContext<'_>,
    ) -> ShowrunnerResult<String> {
        let system = prompts::beat_system_prompt(
            self.role(),
            self.profile.persona(),
            &self.memory.short_term_text(),
            context,
        );
        let request = self.request(system, prompt, None)?;
        let reply = self.call(&request).await?;

        if self.role().retains_memory() {
            self.memory.remember(reply.clone());
        }
        debug!(reply_length = reply.len(), "Agent replied");
        Ok(reply)
    }

    /// Structured reply: a shot list for `prompt` given the scene so far.
    ///
    /// # Errors
    ///
    /// Returns a model error if the call fails, or a script error if the
    /// reply cannot be parsed into a non-empty shot list. Memory is only
    /// touched on success.
    #[instrument(skip(self, prompt, context), fields(agent = %self.name(), turn = context.turn()))]
    pub async fn respond_structured(
        &mut self,
        prompt: &str,
        context: &SceneContext<'_>,
    ) -> ShowrunnerResult<ShotList> {
        let system = prompts::script_system_prompt(
            self.profile.persona(),
            &self.memory.short_term_text(),
            context,
        );
        let format = ResponseFormat::json_schema("shot_list", ShotList::json_schema());
        let request = self.request(system, prompt, Some(format))?;

        let response = self.driver.generate(&request).await?;
        if response.text().trim().is_empty() {
            return Err(ModelError::new(ModelErrorKind::EmptyResponse).into());
        }
        let shots = extraction::parse_shot_list(&response)?;

        if self.role().retains_memory() {
            self.memory.remember(shots.to_text());
        }
        debug!(shots = shots.len(), "Agent produced shot list");
        Ok(shots)
    }

    /// Fold short-term memory into one long-term entry and clear it.
    ///
    /// With nothing in short-term memory this does nothing and makes no call.
    ///
    /// # Errors
    ///
    /// Returns the model error if the call fails; memory is left as it was.
    #[instrument(skip(self), fields(agent = %self.name(), entries = self.memory.short_term().len()))]
    pub async fn summarize(&mut self) -> ShowrunnerResult<()> {
        if self.memory.is_short_term_empty() {
            debug!("Nothing to summarize");
            return Ok(());
        }

        let request = self.request(
            prompts::summarize_system_prompt(self.name()),
            &self.memory.short_term_text(),
            None,
        )?;
        let summary = self.call(&request).await?;

        self.memory.commit(summary);
        self.memory.clear_short_term();
        Ok(())
    }

    /// How the agent feels about everything it remembers.
    ///
    /// The reflection is added to long-term memory; short-term memory is kept.
    ///
    /// # Errors
    ///
    /// Returns the model error if the call fails.
    #[instrument(skip(self), fields(agent = %self.name()))]
    pub async fn reflect(&mut self) -> ShowrunnerResult<String> {
        let recollection = format!(
            "{} {}",
            self.memory.long_term_text(),
            self.memory.short_term_text()
        );
        let request = self.request(
            prompts::REFLECT_SYSTEM_PROMPT.to_string(),
            recollection.trim(),
            None,
        )?;
        let reflection = self.call(&request).await?;

        self.memory.commit(reflection.clone());
        Ok(reflection)
    }

    /// A confession-booth interview script written from long-term memory.
    ///
    /// Memory is read, never changed. An agent with no long-term memory is
    /// still interviewed; the model only gets its name.
    ///
    /// # Errors
    ///
    /// Returns the model error if the call fails.
    #[instrument(skip(self), fields(agent = %self.name(), entries = self.memory.long_term().len()))]
    pub async fn interview(&self) -> ShowrunnerResult<String> {
        let request = self.request(
            prompts::INTERVIEW_SYSTEM_PROMPT.to_string(),
            &prompts::interview_prompt(self.name(), &self.memory.long_term_text()),
            None,
        )?;
        let interview = self.call(&request).await?;
        debug!(interview_length = interview.len(), "Interview written");
        Ok(interview)
    }

    /// Condense the scene so far into a shorter context, with the persona
    /// as instructions.
    ///
    /// # Errors
    ///
    /// Returns the model error if the call fails.
    #[instrument(skip(self, log), fields(agent = %self.name(), entries = log.len()))]
    pub async fn condense_context(&self, log: &SceneLog) -> ShowrunnerResult<String> {
        let request = self.request(
            self.profile.persona().clone(),
            &prompts::condense_prompt(log.entries()),
            None,
        )?;
        self.call(&request).await
    }

    /// One-shot call with the persona as system prompt. Memory is not used
    /// or changed.
    ///
    /// # Errors
    ///
    /// Returns the model error if the call fails.
    #[instrument(skip(self, prompt), fields(agent = %self.name()))]
    pub async fn basic_call(&self, prompt: &str) -> ShowrunnerResult<String> {
        let request = self.request(self.profile.persona().clone(), prompt, None)?;
        self.call(&request).await
    }

    fn request(
        &self,
        system: String,
        user: &str,
        format: Option<ResponseFormat>,
    ) -> ShowrunnerResult<GenerateRequest> {
        GenerateRequest::builder()
            .messages(vec![Message::system(system), Message::user(user)])
            .response_format(format)
            .build()
            .map_err(|e| BuilderError::from(format!("Failed to build request: {}", e)).into())
    }

    /// Text of the reply. Blank text counts as no output.
    async fn call(&self, request: &GenerateRequest) -> ShowrunnerResult<String> {
        let response = self.driver.generate(request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(ModelError::new(ModelErrorKind::EmptyResponse).into());
        }
        Ok(text)
    }
}
