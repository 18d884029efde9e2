//! Mock media backends and helper drivers for production tests.

#![allow(dead_code)]

use async_trait::async_trait;
use showrunner_core::{GenerateRequest, GenerateResponse, MediaAsset, MediaKind};
use showrunner_error::{
    ProductionError, ProductionErrorKind, ShowrunnerError, ShowrunnerResult,
};
use showrunner_interface::{
    ImageGenerator, MediaAssembler, ModelDriver, SpeechSynthesizer, VideoGenerator,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Replies `"{tag}: {user prompt}"` so tests can see which helper ran.
#[derive(Debug)]
pub struct TaggingDriver {
    tag: String,
}

impl TaggingDriver {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

#[async_trait]
impl ModelDriver for TaggingDriver {
    async fn generate(&self, req: &GenerateRequest) -> ShowrunnerResult<GenerateResponse> {
        Ok(GenerateResponse::from_text(format!(
            "{}: {}",
            self.tag,
            req.user_prompt().unwrap_or_default()
        )))
    }

    fn provider_name(&self) -> &'static str {
        "tagging"
    }

    fn model_name(&self) -> &str {
        "tagging-model"
    }
}

/// One call into a mock backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Image { prompt: String, destination: PathBuf },
    Video { prompt: String, image: PathBuf, duration_secs: u32 },
    Speech { text: String },
    Combine { video: PathBuf, audio: PathBuf, destination: PathBuf },
    Concatenate { clips: Vec<PathBuf>, destination: PathBuf },
}

/// Every backend at once. Records calls and pretends to write files.
#[derive(Debug, Default)]
pub struct MockStudio {
    calls: Mutex<Vec<Call>>,
    fail_speech: bool,
}

impl MockStudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_speech() -> Self {
        Self {
            fail_speech: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ImageGenerator for MockStudio {
    async fn generate_image(
        &self,
        prompt: &str,
        destination: &Path,
    ) -> ShowrunnerResult<MediaAsset> {
        self.record(Call::Image {
            prompt: prompt.to_string(),
            destination: destination.to_path_buf(),
        });
        Ok(MediaAsset::new(MediaKind::Image, destination))
    }
}

#[async_trait]
impl VideoGenerator for MockStudio {
    async fn generate_video(
        &self,
        prompt: &str,
        image: &MediaAsset,
        duration_secs: u32,
        destination: &Path,
    ) -> ShowrunnerResult<MediaAsset> {
        self.record(Call::Video {
            prompt: prompt.to_string(),
            image: image.path().clone(),
            duration_secs,
        });
        Ok(MediaAsset::new(MediaKind::Video, destination))
    }
}

#[async_trait]
impl SpeechSynthesizer for MockStudio {
    async fn synthesize(&self, text: &str, destination: &Path) -> ShowrunnerResult<MediaAsset> {
        self.record(Call::Speech {
            text: text.to_string(),
        });
        if self.fail_speech {
            return Err(ShowrunnerError::from(ProductionError::new(
                ProductionErrorKind::Speech("quota exceeded".to_string()),
            )));
        }
        Ok(MediaAsset::new(MediaKind::Audio, destination))
    }
}

#[async_trait]
impl MediaAssembler for MockStudio {
    async fn combine(
        &self,
        video: &MediaAsset,
        audio: &MediaAsset,
        destination: &Path,
    ) -> ShowrunnerResult<MediaAsset> {
        self.record(Call::Combine {
            video: video.path().clone(),
            audio: audio.path().clone(),
            destination: destination.to_path_buf(),
        });
        Ok(MediaAsset::new(MediaKind::Video, destination))
    }

    async fn concatenate(
        &self,
        clips: &[MediaAsset],
        destination: &Path,
    ) -> ShowrunnerResult<MediaAsset> {
        self.record(Call::Concatenate {
            clips: clips.iter().map(|c| c.path().clone()).collect(),
            destination: destination.to_path_buf(),
        });
        Ok(MediaAsset::new(MediaKind::Video, destination))
    }
}
