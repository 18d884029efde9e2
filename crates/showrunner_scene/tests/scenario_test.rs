//! Tests for scenario loading and validation.

use showrunner_scene::{AgentRole, Cast, Dispatcher, RunMode, Scenario};
use std::io::Write;

const SCENARIO: &str = r#"
[scene]
narrative = "bob walks into the living room"
iterations = 2
order = ["writer", "producer"]
shot_count = 5
image_helper = "img_prompt"

[model]
model = "gpt-4o"
temperature = 0.7

[retry]
max_retries = 5

[[agents]]
name = "writer"
role = "script_writer"
system_prompt = "You write short animated scenes."
lora_key_word = "toonstyle"
flux_caption = "red scarf"

[[agents]]
name = "producer"
role = "producer"
persona = "You are a demanding producer."

[[agents]]
name = "img_prompt"
role = "prompt_helper"
persona = "Rewrite prompts for an image model."
"#;

#[test]
fn test_from_toml_str() -> anyhow::Result<()> {
    let scenario = Scenario::from_toml_str(SCENARIO)?;

    assert_eq!(*scenario.scene().iterations(), 2);
    assert_eq!(*scenario.scene().shot_count(), Some(5));
    assert!(!*scenario.scene().interactive());
    assert_eq!(scenario.model().model(), "gpt-4o");
    assert_eq!(scenario.model().base_url(), "https://api.openai.com/v1");
    assert_eq!(*scenario.model().temperature(), Some(0.7));
    assert_eq!(*scenario.retry().max_retries(), 5);
    assert_eq!(*scenario.retry().initial_backoff_ms(), 2000);

    let writer = scenario.agent("writer").expect("writer");
    assert_eq!(*writer.role(), AgentRole::ScriptWriter);
    assert_eq!(writer.persona(), "You write short animated scenes.");
    assert_eq!(writer.style_keyword().as_deref(), Some("toonstyle"));
    assert_eq!(writer.caption().as_deref(), Some("red scarf"));
    Ok(())
}

#[test]
fn test_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(SCENARIO.as_bytes())?;

    let scenario = Scenario::from_file(file.path())?;

    assert_eq!(scenario.agents().len(), 3);
    Ok(())
}

#[test]
fn test_default_order_skips_helpers() -> anyhow::Result<()> {
    let scenario = Scenario::from_toml_str(&SCENARIO.replace(r#"order = ["writer", "producer"]"#, ""))?;
    let driver = std::sync::Arc::new(NullDriver);

    let cast = Cast::from_scenario(&scenario, driver)?;

    assert_eq!(cast.order_names(), ["writer", "producer"]);
    assert!(cast.agent("img_prompt").is_some());
    Ok(())
}

#[test]
fn test_interactive_scenario_starts_interactive() -> anyhow::Result<()> {
    let scenario = Scenario::from_toml_str(&SCENARIO.replace("iterations = 2", "iterations = 2\ninteractive = true"))?;

    let dispatcher = Dispatcher::from_scenario(&scenario, std::sync::Arc::new(NullDriver))?;

    assert_eq!(dispatcher.mode(), RunMode::Interactive);
    assert_eq!(*dispatcher.config().iterations(), 2);
    Ok(())
}

#[test]
fn test_unknown_agent_in_order() {
    let err = Scenario::from_toml_str(&SCENARIO.replace(r#""writer", "producer""#, r#""writer", "carol""#))
        .unwrap_err();

    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("carol"));
}

#[test]
fn test_duplicate_names() {
    let err = Scenario::from_toml_str(&SCENARIO.replace(r#"name = "producer""#, r#"name = "writer""#))
        .unwrap_err();

    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn test_missing_persona() {
    let err = Scenario::from_toml_str(&SCENARIO.replace(
        r#"persona = "You are a demanding producer.""#,
        r#"persona = "   ""#,
    ))
    .unwrap_err();

    assert!(err.is_configuration_error());
}

#[test]
fn test_helper_must_be_prompt_helper() {
    let err = Scenario::from_toml_str(&SCENARIO.replace(
        r#"image_helper = "img_prompt""#,
        r#"image_helper = "producer""#,
    ))
    .unwrap_err();

    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("prompt_helper"));
}

#[test]
fn test_retry_disabled_by_default() -> anyhow::Result<()> {
    let scenario = Scenario::from_toml_str(&SCENARIO.replace("max_retries = 5", ""))?;

    assert!(!scenario.retry().is_enabled());
    Ok(())
}

#[test]
fn test_empty_cast_is_rejected() {
    let err = Scenario::from_toml_str("[scene]\niterations = 1\n").unwrap_err();

    assert!(err.is_configuration_error());
}

#[derive(Debug)]
struct NullDriver;

#[async_trait::async_trait]
impl showrunner_interface::ModelDriver for NullDriver {
    async fn generate(
        &self,
        _req: &showrunner_core::GenerateRequest,
    ) -> showrunner_error::ShowrunnerResult<showrunner_core::GenerateResponse> {
        Ok(showrunner_core::GenerateResponse::from_text(""))
    }

    fn provider_name(&self) -> &'static str {
        "null"
    }

    fn model_name(&self) -> &str {
        "null"
    }
}
