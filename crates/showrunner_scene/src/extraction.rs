//! Turning structured model replies into shot lists.
//!
//! Backends asked for JSON still wrap it in prose or markdown fences now and
//! then. Extraction finds the JSON payload, and parsing either yields a
//! complete [`ShotList`] or fails as a whole.

use showrunner_core::{GenerateResponse, ShotList};
use showrunner_error::{ScriptError, ScriptErrorKind};

/// Extract JSON from a reply that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces or brackets, whichever opens first
///
/// Returns the most likely span only; [`parse_shot_list`] falls back to the
/// others when it does not parse.
///
/// # Errors
///
/// Returns [`ScriptErrorKind::NoJsonFound`] when nothing JSON-shaped is present.
///
/// # Examples
///
/// ```
/// use showrunner_scene::extract_json;
///
/// let reply = "Here is the script:\n\
///     ```json\n\
///     {\"shots\": []}\n\
///     ```\n";
///
/// assert_eq!(extract_json(reply).unwrap(), "{\"shots\": []}");
/// ```
pub fn extract_json(response: &str) -> Result<String, ScriptError> {
    json_candidates(response).into_iter().next().ok_or_else(|| {
        tracing::error!(
            response_length = response.len(),
            "No JSON found in structured reply"
        );
        ScriptError::new(ScriptErrorKind::NoJsonFound(preview(response)))
    })
}

/// Every JSON-shaped span in a reply, in the order [`extract_json`] prefers
/// them: the fenced block, then balanced spans in order of their opening
/// delimiter.
fn json_candidates(response: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(json) = extract_from_code_block(response, "json") {
        candidates.push(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let ordered = match (bracket_pos, brace_pos) {
        (Some(b), Some(c)) if b < c => [('[', ']'), ('{', '}')],
        (Some(_), None) => [('[', ']'), ('{', '}')],
        _ => [('{', '}'), ('[', ']')],
    };

    for (open, close) in ordered {
        if let Some(json) = extract_balanced(response, open, close) {
            if !candidates.contains(&json) {
                candidates.push(json);
            }
        }
    }
    candidates
}

/// Parse a structured reply into a non-empty shot list.
///
/// Backends that decode JSON themselves return it as an output directly.
/// Text replies are scanned for JSON-shaped spans and the first one that
/// holds a non-empty shot list wins, so bracketed prose ahead of the payload
/// is skipped.
///
/// # Errors
///
/// Returns a [`ScriptError`] if no JSON is found, or if no candidate matches
/// the shot list shape with at least one shot. The error reported is the one
/// from the first candidate.
pub fn parse_shot_list(response: &GenerateResponse) -> Result<ShotList, ScriptError> {
    if let Some(value) = response.json() {
        return shot_list_from_value(value.clone());
    }

    let text = response.text();
    let candidates = json_candidates(&text);
    let mut first_error = None;
    for json in &candidates {
        let attempt = serde_json::from_str(json)
            .map_err(|e| {
                ScriptError::new(ScriptErrorKind::SchemaMismatch(format!(
                    "invalid JSON: {}",
                    e
                )))
            })
            .and_then(shot_list_from_value);
        match attempt {
            Ok(shots) => return Ok(shots),
            Err(e) => {
                tracing::debug!(error = %e, json_preview = %preview(json), "Skipping JSON candidate");
                first_error.get_or_insert(e);
            }
        }
    }

    let error = first_error
        .unwrap_or_else(|| ScriptError::new(ScriptErrorKind::NoJsonFound(preview(&text))));
    tracing::error!(
        error = %error,
        candidates = candidates.len(),
        "Structured reply does not contain a usable shot list"
    );
    Err(error)
}

fn shot_list_from_value(value: serde_json::Value) -> Result<ShotList, ScriptError> {
    let shots = ShotList::from_value(value)?;
    if shots.is_empty() {
        return Err(ScriptError::new(ScriptErrorKind::EmptyShotList));
    }
    Ok(shots)
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}

/// Content of the first fenced block, preferring one tagged with `language`.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);
    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        let content = match response[content_start..].find("```") {
            Some(end) => &response[content_start..content_start + end],
            // Truncated reply: take everything after the fence.
            None => &response[content_start..],
        };
        return Some(content.trim().to_string());
    }

    let start = response.find("```")?;
    let fence_end = start + 3;
    let body_start = response[fence_end..]
        .find('\n')
        .map(|n| fence_end + n + 1)
        .unwrap_or(fence_end);
    let content = match response[body_start..].find("```") {
        Some(end) => &response[body_start..body_start + end],
        None => &response[body_start..],
    };
    Some(content.trim().to_string())
}

/// Text from the first `open` to its matching `close`, ignoring delimiters
/// inside JSON strings.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use showrunner_core::Output;

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here's the script you asked for:

```json
{
  "shots": [{"action": "a", "image_prompt": "b", "voice_over": "c"}]
}
```

Let me know if you want changes!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"voice_over\": \"c\""));
    }

    #[test]
    fn test_extract_json_unlabelled_fence() {
        let response = "```\n[1, 2]\n```";
        assert_eq!(extract_json(response).unwrap(), "[1, 2]");
    }

    #[test]
    fn test_extract_json_balanced_braces_with_strings() {
        let response = r#"Sure: {"shots": [{"action": "bob says \"}\" loudly", "image_prompt": "x", "voice_over": "y"}]} done"#;
        let json = extract_json(response).unwrap();
        assert!(json.ends_with("]}"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["shots"][0]["action"], "bob says \"}\" loudly");
    }

    #[test]
    fn test_extract_json_array_first() {
        let response = r#"Shots: [{"action": "a", "image_prompt": "b", "voice_over": "c"}]"#;
        assert!(extract_json(response).unwrap().starts_with('['));
    }

    #[test]
    fn test_no_json() {
        let err = extract_json("alex shrugs and walks away.").unwrap_err();
        assert!(matches!(err.kind, ScriptErrorKind::NoJsonFound(_)));
    }

    #[test]
    fn test_parse_prefers_decoded_json_output() {
        let response = GenerateResponse {
            outputs: vec![Output::Json(serde_json::json!({
                "shots": [{"action": "a", "image_prompt": "b", "voice_over": "c"}]
            }))],
        };
        assert_eq!(parse_shot_list(&response).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_rejects_empty_list() {
        let response = GenerateResponse::from_text(r#"{"shots": []}"#);
        let err = parse_shot_list(&response).unwrap_err();
        assert_eq!(err.kind, ScriptErrorKind::EmptyShotList);
    }

    #[test]
    fn test_parse_rejects_truncated_json() {
        let response = GenerateResponse::from_text(r#"{"shots": [{"action": "a", "image_prompt""#);
        assert!(parse_shot_list(&response).is_err());
    }

    #[test]
    fn test_parse_skips_bracketed_prose_before_object() {
        let response = GenerateResponse::from_text(
            r#"[Revised draft] {"shots": [{"action": "a", "image_prompt": "b", "voice_over": "c"}]}"#,
        );
        let shots = parse_shot_list(&response).unwrap();
        assert_eq!(shots.len(), 1);
    }

    #[test]
    fn test_parse_reports_first_candidate_error() {
        let response = GenerateResponse::from_text("[draft] and {notes}");
        let err = parse_shot_list(&response).unwrap_err();
        assert!(matches!(err.kind, ScriptErrorKind::SchemaMismatch(_)));
    }
}
