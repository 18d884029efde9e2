//! Shot records extracted from a script.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::json;
use showrunner_error::{JsonError, ScriptError, ScriptErrorKind};

/// One shot of a script: what happens, what the frame looks like, what is said.
///
/// Deserialization also accepts the field names `shot_action`,
/// `txt2img_prompt` and `vo` used by older script files.
///
/// # Examples
///
/// ```
/// use showrunner_core::Shot;
///
/// let shot = Shot::new(
///     "Bob enters the living room.",
///     "a man in a red coat stepping into a sunlit living room",
///     "Bob: Anyone home?",
/// );
/// assert_eq!(shot.voice_over(), "Bob: Anyone home?");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Shot {
    /// Stage direction for the shot
    #[serde(alias = "shot_action")]
    action: String,
    /// Prompt for the still image that anchors the shot
    #[serde(alias = "txt2img_prompt")]
    image_prompt: String,
    /// Line spoken over the shot
    #[serde(alias = "vo")]
    voice_over: String,
}

impl Shot {
    /// Create a shot from its three fields.
    pub fn new(
        action: impl Into<String>,
        image_prompt: impl Into<String>,
        voice_over: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            image_prompt: image_prompt.into(),
            voice_over: voice_over.into(),
        }
    }

    /// Same shot with a replacement image prompt.
    pub fn with_image_prompt(mut self, image_prompt: impl Into<String>) -> Self {
        self.image_prompt = image_prompt.into();
        self
    }

    /// Three-line text form: action, image prompt, voice-over.
    pub fn to_text(&self) -> String {
        format!("{}\n{}\n{}", self.action, self.image_prompt, self.voice_over)
    }
}

/// Ordered shots produced by one structured generation call.
///
/// # Examples
///
/// ```
/// use showrunner_core::{Shot, ShotList};
///
/// let shots = ShotList::new(vec![
///     Shot::new("Alex waves.", "a woman waving from a porch", "Alex: Hi!"),
///     Shot::new("Bob waves back.", "a man waving from a gate", "Bob: Hello."),
/// ]);
///
/// assert_eq!(shots.len(), 2);
/// assert_eq!(
///     shots.to_text(),
///     "Alex waves.\na woman waving from a porch\nAlex: Hi!\n\n\
///      Bob waves back.\na man waving from a gate\nBob: Hello."
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ShotList {
    /// The shots in screen order
    shots: Vec<Shot>,
}

/// Accepted record shapes: `{"shots": [...]}` or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ShotListRecord {
    Wrapped { shots: Vec<Shot> },
    Bare(Vec<Shot>),
}

impl ShotList {
    /// Wrap an ordered list of shots.
    pub fn new(shots: Vec<Shot>) -> Self {
        Self { shots }
    }

    /// Number of shots.
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// True when there are no shots.
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Iterate shots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Shot> {
        self.shots.iter()
    }

    /// Human-readable form: one three-line group per shot, groups separated
    /// by a blank line.
    pub fn to_text(&self) -> String {
        self.shots
            .iter()
            .map(Shot::to_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Persisted record form.
    pub fn to_record(&self) -> Result<String, JsonError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| JsonError::new(format!("Failed to serialize shot list: {}", e)))
    }

    /// Rebuild a shot list from its record form.
    pub fn from_record(record: &str) -> Result<Self, ScriptError> {
        let value: serde_json::Value = serde_json::from_str(record).map_err(|e| {
            ScriptError::new(ScriptErrorKind::Record(format!("invalid JSON: {}", e)))
        })?;
        Self::from_value(value)
    }

    /// Interpret a decoded JSON value as a shot list.
    ///
    /// All shots parse or the whole value is rejected.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ScriptError> {
        match serde_json::from_value::<ShotListRecord>(value) {
            Ok(ShotListRecord::Wrapped { shots }) | Ok(ShotListRecord::Bare(shots)) => {
                Ok(Self { shots })
            }
            Err(e) => Err(ScriptError::new(ScriptErrorKind::SchemaMismatch(
                e.to_string(),
            ))),
        }
    }

    /// JSON schema a backend is asked to satisfy for structured replies.
    pub fn json_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "shots": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "action": {
                                "type": "string",
                                "description": "What happens on screen in this shot"
                            },
                            "image_prompt": {
                                "type": "string",
                                "description": "Text-to-image prompt for the shot's key frame"
                            },
                            "voice_over": {
                                "type": "string",
                                "description": "Dialogue or narration spoken over the shot"
                            }
                        },
                        "required": ["action", "image_prompt", "voice_over"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["shots"],
            "additionalProperties": false
        })
    }
}

impl IntoIterator for ShotList {
    type Item = Shot;
    type IntoIter = std::vec::IntoIter<Shot>;

    fn into_iter(self) -> Self::IntoIter {
        self.shots.into_iter()
    }
}

impl<'a> IntoIterator for &'a ShotList {
    type Item = &'a Shot;
    type IntoIter = std::slice::Iter<'a, Shot>;

    fn into_iter(self) -> Self::IntoIter {
        self.shots.iter()
    }
}

impl FromIterator<Shot> for ShotList {
    fn from_iter<I: IntoIterator<Item = Shot>>(iter: I) -> Self {
        Self {
            shots: iter.into_iter().collect(),
        }
    }
}
