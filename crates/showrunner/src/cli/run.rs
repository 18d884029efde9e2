//! Scene run command handler.

use super::RunArgs;
use showrunner::{
    Dispatcher, ModelDriver, OpenAIChatClient, PromptAugmenter, RetryingDriver, RunOutcome,
    Scenario, SceneError, SceneErrorKind, ShowrunnerResult, write_scene_log, write_shot_list,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Run a scene and save what it produced.
///
/// Each turn's output is printed. In interactive mode a line is read from
/// stdin before the next turn: a blank line continues, anything else becomes
/// the next observation.
pub async fn run_scene(args: &RunArgs) -> ShowrunnerResult<()> {
    tracing::info!(path = %args.scenario.display(), "Loading scenario");
    let scenario = apply_overrides(Scenario::load(&args.scenario)?, args);

    let client = OpenAIChatClient::from_settings(scenario.model())?;
    let driver: Arc<dyn ModelDriver> = Arc::new(RetryingDriver::new(client, *scenario.retry()));
    tracing::info!(
        model = %driver.model_name(),
        agents = scenario.agents().len(),
        iterations = scenario.scene().iterations(),
        "Scenario loaded"
    );

    let mut dispatcher = Dispatcher::from_scenario(&scenario, driver)?;
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut input: Option<String> = None;

    let shot_list = loop {
        let outcome = dispatcher.advance(input.as_deref()).await?;
        for event in outcome.events() {
            println!("{}\n", event);
        }

        match outcome {
            RunOutcome::AwaitingInput { turn, .. } => {
                println!(
                    "[turn {} of {}] Add an observation, or press enter to continue:",
                    turn,
                    scenario.scene().iterations()
                );
                let line = stdin
                    .next_line()
                    .await
                    .map_err(|e| SceneError::new(SceneErrorKind::Input(e.to_string())))?;
                input = Some(line.unwrap_or_default());
            }
            RunOutcome::Complete { shot_list, .. } => break shot_list,
        }
    };

    if let Some(path) = &args.scene_log {
        write_scene_log(path, dispatcher.scene_log()).await?;
        tracing::info!(path = %path.display(), "Scene log saved");
    }

    let Some(shots) = shot_list else {
        tracing::warn!("The cast has no script writer, so there is no shot list to save");
        return Ok(());
    };

    let shots = if args.augment_prompts {
        if scenario.scene().image_helper().is_none() {
            tracing::warn!("--augment-prompts given but the scenario names no image_helper");
        }
        let augmenter = PromptAugmenter::from_cast(
            dispatcher.cast(),
            scenario.scene().image_helper().as_deref(),
            scenario.scene().video_helper().as_deref(),
        )?;
        augmenter.augment_shot_list(&shots).await?
    } else {
        shots
    };

    write_shot_list(&args.output, &shots).await?;
    tracing::info!(path = %args.output.display(), shots = shots.len(), "Shot list saved");
    Ok(())
}

fn apply_overrides(scenario: Scenario, args: &RunArgs) -> Scenario {
    let mut scene = scenario.scene().clone();
    if let Some(iterations) = args.iterations {
        scene = scene.with_iterations(iterations);
    }
    if let Some(narrative) = &args.narrative {
        scene = scene.with_narrative(narrative.clone());
    }
    if args.interactive {
        scene = scene.with_interactive(true);
    }
    scenario.with_scene(scene)
}
