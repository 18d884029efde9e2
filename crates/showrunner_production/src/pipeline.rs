//! Shot list to final video.

use crate::PromptAugmenter;
use derive_getters::Getters;
use showrunner_core::{MediaAsset, ShotList};
use showrunner_error::{ProductionError, ProductionErrorKind, ShowrunnerResult};
use showrunner_interface::{ImageGenerator, MediaAssembler, SpeechSynthesizer, VideoGenerator};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default length of every generated clip.
pub const CLIP_DURATION_SECS: u32 = 10;

/// Where each kind of asset is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct OutputLayout {
    /// Still images
    images: PathBuf,
    /// Silent clips
    videos: PathBuf,
    /// Voice-over tracks
    audio: PathBuf,
    /// Clips with voice-over
    combined: PathBuf,
    /// One joined video per variation
    finals: PathBuf,
}

impl OutputLayout {
    /// The standard layout under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            images: root.join("out_imgs"),
            videos: root.join("out_vids"),
            audio: root.join("out_audio"),
            combined: root.join("combined_assets"),
            finals: root.join("final_vids"),
        }
    }

    /// Create every directory that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a directory error naming the first path that could not be created.
    pub async fn prepare(&self) -> ShowrunnerResult<()> {
        for dir in [
            &self.images,
            &self.videos,
            &self.audio,
            &self.combined,
            &self.finals,
        ] {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                ProductionError::new(ProductionErrorKind::Directory {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })
            })?;
        }
        Ok(())
    }

    fn image_path(&self, shot: usize, variation: usize) -> PathBuf {
        self.images
            .join(format!("shot_{:04}_variation_{:04}.png", shot, variation))
    }

    fn video_path(&self, shot: usize, variation: usize) -> PathBuf {
        self.videos
            .join(format!("shot_{:04}_variation_{:04}.mp4", shot, variation))
    }

    fn audio_path(&self, shot: usize, variation: usize) -> PathBuf {
        self.audio
            .join(format!("shot_{:04}_variation_{:04}.mp3", shot, variation))
    }

    fn combined_path(&self, shot: usize, variation: usize) -> PathBuf {
        self.combined
            .join(format!("scene_{:04}_variation_{:04}.mp4", shot, variation))
    }

    fn final_path(&self, variation: usize) -> PathBuf {
        self.finals
            .join(format!("final_video_variation_{:04}.mp4", variation))
    }
}

/// Everything produced for one variation.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ProductionCut {
    /// Zero-based variation index
    variation: usize,
    /// Combined clips, one per shot, in shot order
    clips: Vec<MediaAsset>,
    /// The joined video
    final_video: MediaAsset,
}

/// Drives the media backends over a shot list.
///
/// Shots are produced one at a time, in order. The first backend failure
/// aborts the whole production.
pub struct ProductionPipeline {
    image: Arc<dyn ImageGenerator>,
    video: Arc<dyn VideoGenerator>,
    speech: Arc<dyn SpeechSynthesizer>,
    assembler: Arc<dyn MediaAssembler>,
    layout: OutputLayout,
    clip_duration_secs: u32,
}

impl fmt::Debug for ProductionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductionPipeline")
            .field("layout", &self.layout)
            .field("clip_duration_secs", &self.clip_duration_secs)
            .finish_non_exhaustive()
    }
}

impl ProductionPipeline {
    /// A pipeline writing into `layout` with the default clip length.
    pub fn new(
        image: Arc<dyn ImageGenerator>,
        video: Arc<dyn VideoGenerator>,
        speech: Arc<dyn SpeechSynthesizer>,
        assembler: Arc<dyn MediaAssembler>,
        layout: OutputLayout,
    ) -> Self {
        Self {
            image,
            video,
            speech,
            assembler,
            layout,
            clip_duration_secs: CLIP_DURATION_SECS,
        }
    }

    /// Use a different clip length.
    pub fn with_clip_duration(mut self, seconds: u32) -> Self {
        self.clip_duration_secs = seconds;
        self
    }

    /// Output directories.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Produce `variations` cuts of `shots`.
    ///
    /// For every variation and shot: image from the styled image prompt,
    /// clip from the image and the video prompt, voice-over from the shot's
    /// line, then the clip and voice-over combined. The combined clips are
    /// joined into the variation's final video.
    ///
    /// # Errors
    ///
    /// Returns the first failure from a helper agent, a backend, or the
    /// output directories.
    #[instrument(skip(self, shots, augmenter), fields(shots = shots.len()))]
    pub async fn produce(
        &self,
        shots: &ShotList,
        augmenter: &PromptAugmenter<'_>,
        variations: usize,
    ) -> ShowrunnerResult<Vec<ProductionCut>> {
        if shots.is_empty() {
            warn!("No shots to produce");
            return Ok(Vec::new());
        }
        self.layout.prepare().await?;

        let mut cuts = Vec::with_capacity(variations);
        for variation in 0..variations {
            let mut clips = Vec::with_capacity(shots.len());
            for (index, shot) in shots.iter().enumerate() {
                debug!(variation, shot = index, "Generating image");
                let image_prompt = augmenter.augment_image_prompt(shot.image_prompt()).await?;
                let image = self
                    .image
                    .generate_image(&image_prompt, &self.layout.image_path(index, variation))
                    .await?;

                debug!(variation, shot = index, "Generating video");
                let video_prompt = augmenter.augment_video_prompt(shot.image_prompt()).await?;
                let video = self
                    .video
                    .generate_video(
                        &video_prompt,
                        &image,
                        self.clip_duration_secs,
                        &self.layout.video_path(index, variation),
                    )
                    .await?;

                debug!(variation, shot = index, "Generating voice-over");
                let audio = self
                    .speech
                    .synthesize(shot.voice_over(), &self.layout.audio_path(index, variation))
                    .await?;

                let clip = self
                    .assembler
                    .combine(&video, &audio, &self.layout.combined_path(index, variation))
                    .await?;
                clips.push(clip);
            }

            let final_video = self
                .assembler
                .concatenate(&clips, &self.layout.final_path(variation))
                .await?;
            info!(variation, path = %final_video.path().display(), "Variation finished");
            cuts.push(ProductionCut {
                variation,
                clips,
                final_video,
            });
        }
        Ok(cuts)
    }
}
