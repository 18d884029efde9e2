//! Tests for prompt augmentation.

mod test_utils;

use showrunner_core::{Shot, ShotList};
use showrunner_production::{PromptAugmenter, PromptStyle};
use showrunner_scene::{Agent, AgentProfile, AgentRole, Cast, SceneLog};
use std::sync::Arc;
use test_utils::TaggingDriver;

fn cast() -> Cast {
    let writer = AgentProfile::new("writer", AgentRole::ScriptWriter, "You write scenes.")
        .with_style_keyword("toonstyle")
        .with_caption("red scarf");
    let img = AgentProfile::new("img_prompt", AgentRole::PromptHelper, "Rewrite image prompts.");
    let vid = AgentProfile::new("vid_prompt", AgentRole::PromptHelper, "Write video prompts.");
    Cast::new(
        vec![
            Agent::new(writer, Arc::new(TaggingDriver::new("writer"))),
            Agent::new(img, Arc::new(TaggingDriver::new("img"))),
            Agent::new(vid, Arc::new(TaggingDriver::new("vid"))),
        ],
        None,
    )
    .expect("valid cast")
}

#[tokio::test]
async fn test_image_prompt_is_rewritten_then_styled() -> anyhow::Result<()> {
    let cast = cast();
    let augmenter = PromptAugmenter::from_cast(&cast, Some("img_prompt"), Some("vid_prompt"))?;

    let image = augmenter.augment_image_prompt("a doorway").await?;
    let video = augmenter.augment_video_prompt("a doorway").await?;

    assert_eq!(image, "toonstyle,\n\nimg: a doorway\n\nCostume: red scarf");
    assert_eq!(video, "vid: a doorway");
    assert_eq!(
        augmenter.style(),
        &PromptStyle::new(Some("toonstyle".to_string()), Some("red scarf".to_string()))
    );
    Ok(())
}

#[tokio::test]
async fn test_without_helpers_prompts_pass_through() -> anyhow::Result<()> {
    let augmenter = PromptAugmenter::default();

    assert_eq!(augmenter.augment_image_prompt("a doorway").await?, "a doorway");
    assert_eq!(augmenter.augment_video_prompt("a doorway").await?, "a doorway");
    Ok(())
}

#[tokio::test]
async fn test_augment_shot_list_rewrites_image_prompts_only() -> anyhow::Result<()> {
    let cast = cast();
    let augmenter = PromptAugmenter::from_cast(&cast, Some("img_prompt"), None)?;
    let shots = ShotList::new(vec![
        Shot::new("Bob enters.", "a doorway", "Bob: Hi?"),
        Shot::new("Alex waves.", "a couch", "Alex: Hey."),
    ]);

    let augmented = augmenter.augment_shot_list(&shots).await?;

    let prompts: Vec<&str> = augmented.iter().map(|s| s.image_prompt().as_str()).collect();
    assert_eq!(prompts, ["img: a doorway", "img: a couch"]);
    let lines: Vec<&str> = augmented.iter().map(|s| s.voice_over().as_str()).collect();
    assert_eq!(lines, ["Bob: Hi?", "Alex: Hey."]);
    Ok(())
}

#[test]
fn test_unknown_helper() {
    let cast = cast();

    let err = PromptAugmenter::from_cast(&cast, Some("img_prompt"), Some("storyboard"))
        .unwrap_err();

    assert!(err.to_string().contains("storyboard"));
}

fn cast_with_characters() -> Cast {
    let bob = AgentProfile::new("Bob", AgentRole::Character, "Bob is a grump.")
        .with_caption("grey hoodie");
    let alex = AgentProfile::new("alex", AgentRole::Character, "Alex is cheerful.")
        .with_caption("yellow raincoat");
    let img = AgentProfile::new("img_prompt", AgentRole::PromptHelper, "Rewrite image prompts.");
    Cast::new(
        vec![
            Agent::new(bob, Arc::new(TaggingDriver::new("bob"))),
            Agent::new(alex, Arc::new(TaggingDriver::new("alex"))),
            Agent::new(img, Arc::new(TaggingDriver::new("img"))),
        ],
        None,
    )
    .expect("valid cast")
}

#[tokio::test]
async fn test_beat_image_prompt_adds_mentioned_captions() -> anyhow::Result<()> {
    let cast = cast_with_characters();
    let augmenter = PromptAugmenter::from_cast(&cast, Some("img_prompt"), None)?;
    let mut log = SceneLog::with_opening("bob walks in");
    log.push("bob sighs");
    log.push("Alex waves");

    let first = augmenter.beat_image_prompt(&log, 0).await?;
    let second = augmenter.beat_image_prompt(&log, 1).await?;
    let last = augmenter.beat_image_prompt(&log, 2).await?;

    assert_eq!(first, "img: bob walks in bob sighs, grey hoodie");
    assert_eq!(second, "img: bob sighs Alex waves, grey hoodie, yellow raincoat");
    assert_eq!(last, "img: Alex waves, yellow raincoat");
    Ok(())
}

#[tokio::test]
async fn test_beat_past_end_of_log() -> anyhow::Result<()> {
    let cast = cast_with_characters();
    let augmenter = PromptAugmenter::from_cast(&cast, None, None)?;
    let log = SceneLog::with_opening("bob walks in");

    let err = augmenter.beat_image_prompt(&log, 1).await.unwrap_err();

    assert!(err.to_string().contains("Story beat 1 is past the end"));
    Ok(())
}
