//! Trait definitions for model backends and asset producers.

use async_trait::async_trait;
use showrunner_core::{GenerateRequest, GenerateResponse, MediaAsset};
use showrunner_error::ShowrunnerResult;
use std::path::Path;
use std::sync::Arc;

/// Core trait that every language model backend implements.
///
/// A driver turns a list of role-tagged messages into a reply. When the
/// request carries a response format, the driver asks the backend for a
/// reply of that shape but does not validate it; callers parse.
#[async_trait]
pub trait ModelDriver: Send + Sync {
    /// Generate a reply for the request.
    async fn generate(&self, req: &GenerateRequest) -> ShowrunnerResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: ModelDriver + ?Sized> ModelDriver for Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> ShowrunnerResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<D: ModelDriver + ?Sized> ModelDriver for Box<D> {
    async fn generate(&self, req: &GenerateRequest) -> ShowrunnerResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Text-to-image backend.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Render `prompt` into an image written at `destination`.
    async fn generate_image(&self, prompt: &str, destination: &Path)
    -> ShowrunnerResult<MediaAsset>;
}

/// Image-to-video backend.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Animate `image` following `prompt` into a clip written at `destination`.
    async fn generate_video(
        &self,
        prompt: &str,
        image: &MediaAsset,
        duration_secs: u32,
        destination: &Path,
    ) -> ShowrunnerResult<MediaAsset>;
}

/// Text-to-speech backend.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` into an audio file written at `destination`.
    async fn synthesize(&self, text: &str, destination: &Path) -> ShowrunnerResult<MediaAsset>;
}

/// Muxing and concatenation of media files.
#[async_trait]
pub trait MediaAssembler: Send + Sync {
    /// Lay `audio` over `video`, writing the result at `destination`.
    async fn combine(
        &self,
        video: &MediaAsset,
        audio: &MediaAsset,
        destination: &Path,
    ) -> ShowrunnerResult<MediaAsset>;

    /// Join `clips` end to end, writing the result at `destination`.
    async fn concatenate(
        &self,
        clips: &[MediaAsset],
        destination: &Path,
    ) -> ShowrunnerResult<MediaAsset>;
}
