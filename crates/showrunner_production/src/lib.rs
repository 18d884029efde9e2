//! Asset production for Showrunner shot lists.
//!
//! Downstream of the scene loop, each shot becomes a still image, a video
//! clip animated from that image, and a voice-over track. The clip and the
//! track are combined, and the combined clips are joined into one final
//! video per variation.
//!
//! Prompt helpers from the cast rewrite the prompts first; see
//! [`PromptAugmenter`]. The media backends themselves sit behind the
//! traits in `showrunner_interface`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod augment;
mod pipeline;

pub use augment::{PromptAugmenter, PromptStyle};
pub use pipeline::{CLIP_DURATION_SECS, OutputLayout, ProductionCut, ProductionPipeline};
