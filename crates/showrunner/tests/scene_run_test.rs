//! End-to-end run through the facade with a canned model.

use async_trait::async_trait;
use showrunner::{
    Dispatcher, GenerateRequest, GenerateResponse, ModelDriver, RunOutcome, Scenario,
    ShowrunnerResult, read_shot_list, write_scene_log, write_shot_list,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const SCENARIO: &str = r#"
[scene]
narrative = "today we are writing a story about a young boy learning about the universe"
iterations = 2

[[agents]]
name = "script_writer"
role = "script_writer"
persona = "You write short animated scenes."

[[agents]]
name = "producer"
role = "producer"
persona = "You are a demanding producer."
"#;

/// Writes a one-shot script for structured requests and notes for the rest.
#[derive(Debug, Default)]
struct CannedDriver {
    calls: AtomicUsize,
}

#[async_trait]
impl ModelDriver for CannedDriver {
    async fn generate(&self, req: &GenerateRequest) -> ShowrunnerResult<GenerateResponse> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let text = if req.response_format().is_some() {
            format!(
                "```json\n{{\"shots\": [{{\"action\": \"draft {}\", \"image_prompt\": \"stars\", \"voice_over\": \"Look up.\"}}]}}\n```",
                n
            )
        } else {
            format!("note {}", n)
        };
        Ok(GenerateResponse::from_text(text))
    }

    fn provider_name(&self) -> &'static str {
        "canned"
    }

    fn model_name(&self) -> &str {
        "canned-model"
    }
}

#[tokio::test]
async fn test_scene_to_saved_record() -> anyhow::Result<()> {
    let scenario = Scenario::from_toml_str(SCENARIO)?;
    let driver = Arc::new(CannedDriver::default());
    let mut dispatcher = Dispatcher::from_scenario(&scenario, driver.clone())?;

    let outcome = dispatcher.advance(None).await?;
    let RunOutcome::Complete {
        shot_list: Some(shots),
        ..
    } = outcome
    else {
        panic!("expected a completed run with a shot list");
    };

    assert_eq!(driver.calls.load(Ordering::SeqCst), 4);
    assert_eq!(shots.iter().next().map(|s| s.action().as_str()), Some("draft 2"));
    assert_eq!(dispatcher.scene_log().len(), 5);

    let dir = tempfile::tempdir()?;
    let record = dir.path().join("script.json");
    let scenes = dir.path().join("scenes.txt");
    write_shot_list(&record, &shots).await?;
    write_scene_log(&scenes, dispatcher.scene_log()).await?;

    assert_eq!(read_shot_list(&record).await?, shots);
    let log = std::fs::read_to_string(&scenes)?;
    assert!(log.starts_with("today we are writing a story"));
    assert!(log.contains("note 3"));
    Ok(())
}
