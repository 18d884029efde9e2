//! Tests for the production pipeline.

mod test_utils;

use showrunner_core::{Shot, ShotList};
use showrunner_production::{
    CLIP_DURATION_SECS, OutputLayout, ProductionPipeline, PromptAugmenter, PromptStyle,
};
use std::sync::Arc;
use test_utils::{Call, MockStudio};

fn shots() -> ShotList {
    ShotList::new(vec![
        Shot::new("Bob enters.", "a doorway", "Bob: Hi?"),
        Shot::new("Alex waves.", "a couch", "Alex: Hey."),
    ])
}

fn pipeline(studio: &Arc<MockStudio>, root: &std::path::Path) -> ProductionPipeline {
    ProductionPipeline::new(
        studio.clone(),
        studio.clone(),
        studio.clone(),
        studio.clone(),
        OutputLayout::new(root),
    )
}

#[tokio::test]
async fn test_produce_every_shot_and_variation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let studio = Arc::new(MockStudio::new());
    let augmenter = PromptAugmenter::new(
        None,
        None,
        PromptStyle::new(Some("toonstyle".to_string()), None),
    );

    let cuts = pipeline(&studio, dir.path())
        .produce(&shots(), &augmenter, 2)
        .await?;

    assert_eq!(cuts.len(), 2);
    assert_eq!(cuts[1].clips().len(), 2);
    assert_eq!(
        cuts[1].final_video().path(),
        &dir.path().join("final_vids/final_video_variation_0001.mp4")
    );
    assert!(dir.path().join("combined_assets").is_dir());

    let calls = studio.calls();
    assert_eq!(calls.len(), 2 * (2 * 4 + 1));
    assert_eq!(
        calls[0],
        Call::Image {
            prompt: "toonstyle,\n\na doorway".to_string(),
            destination: dir.path().join("out_imgs/shot_0000_variation_0000.png"),
        }
    );
    assert_eq!(
        calls[1],
        Call::Video {
            prompt: "a doorway".to_string(),
            image: dir.path().join("out_imgs/shot_0000_variation_0000.png"),
            duration_secs: CLIP_DURATION_SECS,
        }
    );
    assert_eq!(
        calls[2],
        Call::Speech {
            text: "Bob: Hi?".to_string()
        }
    );
    assert_eq!(
        calls[8],
        Call::Concatenate {
            clips: vec![
                dir.path().join("combined_assets/scene_0000_variation_0000.mp4"),
                dir.path().join("combined_assets/scene_0001_variation_0000.mp4"),
            ],
            destination: dir.path().join("final_vids/final_video_variation_0000.mp4"),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_backend_failure_aborts() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let studio = Arc::new(MockStudio::failing_speech());

    let err = pipeline(&studio, dir.path())
        .produce(&shots(), &PromptAugmenter::default(), 1)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("quota exceeded"));
    assert_eq!(studio.calls().len(), 3);
    assert!(
        !studio
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Concatenate { .. }))
    );
    Ok(())
}

#[tokio::test]
async fn test_empty_shot_list_produces_nothing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let studio = Arc::new(MockStudio::new());

    let cuts = pipeline(&studio, dir.path())
        .with_clip_duration(5)
        .produce(&ShotList::default(), &PromptAugmenter::default(), 3)
        .await?;

    assert!(cuts.is_empty());
    assert!(studio.calls().is_empty());
    assert!(!dir.path().join("out_imgs").exists());
    Ok(())
}
