//! Prompt rewriting through prompt-helper agents.

use derive_getters::Getters;
use showrunner_core::{Shot, ShotList};
use showrunner_error::{SceneError, SceneErrorKind, ShowrunnerResult};
use showrunner_scene::{Agent, AgentProfile, AgentRole, Cast, SceneLog};
use tracing::{debug, instrument};

/// Style hints wrapped around every image prompt.
///
/// # Examples
///
/// ```
/// use showrunner_production::PromptStyle;
///
/// let style = PromptStyle::new(Some("toonstyle".into()), Some("red scarf".into()));
/// assert_eq!(
///     style.apply("a man in a doorway"),
///     "toonstyle,\n\na man in a doorway\n\nCostume: red scarf"
/// );
/// assert_eq!(PromptStyle::default().apply("a doorway"), "a doorway");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Getters)]
pub struct PromptStyle {
    /// Trigger word placed before the prompt
    keyword: Option<String>,
    /// Costume description placed after the prompt
    caption: Option<String>,
}

impl PromptStyle {
    /// Style from explicit hints.
    pub fn new(keyword: Option<String>, caption: Option<String>) -> Self {
        Self { keyword, caption }
    }

    /// Style carried by an agent profile.
    pub fn from_profile(profile: &AgentProfile) -> Self {
        Self::new(profile.style_keyword().clone(), profile.caption().clone())
    }

    /// Wrap `prompt` in the style hints.
    pub fn apply(&self, prompt: &str) -> String {
        let mut text = String::new();
        if let Some(keyword) = &self.keyword {
            text.push_str(keyword);
            text.push_str(",\n\n");
        }
        text.push_str(prompt);
        if let Some(caption) = &self.caption {
            text.push_str("\n\nCostume: ");
            text.push_str(caption);
        }
        text
    }
}

/// Rewrites shot prompts with the cast's prompt helpers.
///
/// Without a helper the prompt passes through unchanged.
#[derive(Debug, Clone, Default)]
pub struct PromptAugmenter<'a> {
    image_helper: Option<&'a Agent>,
    video_helper: Option<&'a Agent>,
    style: PromptStyle,
    characters: Vec<&'a Agent>,
}

impl<'a> PromptAugmenter<'a> {
    /// An augmenter from explicit helpers and style.
    pub fn new(
        image_helper: Option<&'a Agent>,
        video_helper: Option<&'a Agent>,
        style: PromptStyle,
    ) -> Self {
        Self {
            image_helper,
            video_helper,
            style,
            characters: Vec::new(),
        }
    }

    /// Characters whose captions are added to beat image prompts that
    /// mention them.
    pub fn with_characters(mut self, characters: Vec<&'a Agent>) -> Self {
        self.characters = characters;
        self
    }

    /// Look the helpers up by name in `cast`. The style comes from the
    /// cast's script writer and every character in the cast is known.
    ///
    /// # Errors
    ///
    /// Returns a scene error if a named helper is not in the cast.
    pub fn from_cast(
        cast: &'a Cast,
        image_helper: Option<&str>,
        video_helper: Option<&str>,
    ) -> ShowrunnerResult<Self> {
        let lookup = move |name: Option<&str>| -> ShowrunnerResult<Option<&'a Agent>> {
            let Some(name) = name else {
                return Ok(None);
            };
            match cast.agent(name) {
                Some(agent) => Ok(Some(agent)),
                None => Err(SceneError::new(SceneErrorKind::UnknownAgent(name.to_string())).into()),
            }
        };
        let style = cast
            .first_with_role(AgentRole::ScriptWriter)
            .map(|writer| PromptStyle::from_profile(writer.profile()))
            .unwrap_or_default();

        let characters = cast
            .agents()
            .iter()
            .filter(|agent| agent.role() == AgentRole::Character)
            .collect();

        Ok(Self::new(lookup(image_helper)?, lookup(video_helper)?, style).with_characters(characters))
    }

    /// The style applied to image prompts.
    pub fn style(&self) -> &PromptStyle {
        &self.style
    }

    /// Rewrite an image prompt through the image helper, then apply the style.
    ///
    /// # Errors
    ///
    /// Returns the helper's model error.
    #[instrument(skip(self, prompt))]
    pub async fn augment_image_prompt(&self, prompt: &str) -> ShowrunnerResult<String> {
        let augmented = rewrite(self.image_helper, prompt).await?;
        Ok(self.style.apply(&augmented))
    }

    /// Rewrite a shot's image prompt into a video prompt through the video helper.
    ///
    /// # Errors
    ///
    /// Returns the helper's model error.
    #[instrument(skip(self, prompt))]
    pub async fn augment_video_prompt(&self, prompt: &str) -> ShowrunnerResult<String> {
        rewrite(self.video_helper, prompt).await
    }

    /// Image prompt for one story beat, straight from the scene log.
    ///
    /// The window starts at entry `beat` and spans one entry per known
    /// character (at least one). It is rewritten through the image helper,
    /// then the caption of every character named in the result is appended.
    /// Names match case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a scene error if `beat` is past the end of the log, or the
    /// helper's model error.
    #[instrument(skip(self, log), fields(entries = log.len(), characters = self.characters.len()))]
    pub async fn beat_image_prompt(&self, log: &SceneLog, beat: usize) -> ShowrunnerResult<String> {
        let entries = log.entries();
        if beat >= entries.len() {
            return Err(SceneError::new(SceneErrorKind::BeatOutOfRange {
                beat,
                entries: entries.len(),
            })
            .into());
        }
        let width = self.characters.len().max(1);
        let end = (beat + width).min(entries.len());
        let actions = entries[beat..end].join(" ");

        let mut prompt = rewrite(self.image_helper, &actions).await?;
        let mentioned = prompt.to_lowercase();
        for character in &self.characters {
            if !mentioned.contains(&character.name().to_lowercase()) {
                continue;
            }
            if let Some(caption) = character.profile().caption() {
                prompt.push_str(", ");
                prompt.push_str(caption);
            }
        }
        Ok(prompt)
    }

    /// Rewrite every image prompt in `shots` through the image helper.
    ///
    /// Style hints are not applied; the record keeps plain prompts.
    ///
    /// # Errors
    ///
    /// Returns the first helper failure; no partial list is returned.
    #[instrument(skip(self, shots), fields(shots = shots.len()))]
    pub async fn augment_shot_list(&self, shots: &ShotList) -> ShowrunnerResult<ShotList> {
        let mut augmented = Vec::with_capacity(shots.len());
        for shot in shots.iter() {
            let prompt = rewrite(self.image_helper, shot.image_prompt()).await?;
            augmented.push(Shot::clone(shot).with_image_prompt(prompt));
        }
        Ok(ShotList::new(augmented))
    }
}

async fn rewrite(helper: Option<&Agent>, prompt: &str) -> ShowrunnerResult<String> {
    match helper {
        Some(helper) => {
            let rewritten = helper.basic_call(prompt).await?;
            debug!(helper = helper.name(), "Prompt rewritten");
            Ok(rewritten)
        }
        None => Ok(prompt.to_string()),
    }
}
