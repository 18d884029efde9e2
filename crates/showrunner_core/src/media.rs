//! Media asset references produced by the asset stage.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of media file.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Video clip, with or without audio
    Video,
    /// Audio track
    Audio,
}

/// A media file on disk.
///
/// # Examples
///
/// ```
/// use showrunner_core::{MediaAsset, MediaKind};
///
/// let asset = MediaAsset::new(MediaKind::Image, "out_imgs/img_0_0.png");
/// assert_eq!(*asset.kind(), MediaKind::Image);
/// assert_eq!(asset.kind().to_string(), "image");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct MediaAsset {
    /// What the file holds
    kind: MediaKind,
    /// Where the file lives
    path: PathBuf,
}

impl MediaAsset {
    /// Reference a media file.
    pub fn new(kind: MediaKind, path: impl AsRef<Path>) -> Self {
        Self {
            kind,
            path: path.as_ref().to_path_buf(),
        }
    }
}
