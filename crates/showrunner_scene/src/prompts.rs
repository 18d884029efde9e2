//! Prompt text sent to the model for each agent operation.

use crate::{AgentRole, SceneContext};

const CHARACTER_DIRECTION: &str = "Given everything we know about this character and the \
current scene context, what are they doing, thinking, or saying next? Responses need to be a \
single sentence. Try to wrap up the scene in the given story beats.";

const SCRIPT_DIRECTION: &str = "Write the scene so far as an ordered list of shots. Every shot \
has an action, an image prompt describing the key frame, and a voice-over line. Respond only \
with JSON of the form {\"shots\": [{\"action\": \"...\", \"image_prompt\": \"...\", \
\"voice_over\": \"...\"}]}.";

const PRODUCER_DIRECTION: &str = "Read the script you are given and tell the script writer what \
they should change. Be specific and brief.";

const HELPER_DIRECTION: &str = "Rewrite the text you are given following your instructions. \
Respond with the rewritten text only.";

/// System prompt for a turn: beat position, scene so far, persona, memory, direction.
///
/// Beats are numbered from zero.
pub(crate) fn beat_system_prompt(
    role: AgentRole,
    persona: &str,
    short_term: &str,
    context: &SceneContext<'_>,
) -> String {
    let direction = match role {
        AgentRole::Character => CHARACTER_DIRECTION,
        AgentRole::ScriptWriter => SCRIPT_DIRECTION,
        AgentRole::Producer => PRODUCER_DIRECTION,
        AgentRole::PromptHelper => HELPER_DIRECTION,
    };
    format!(
        "story beat {} / {}, scene context: {}, purpose: {} {} {}",
        context.turn(),
        context.total_turns(),
        context.log().joined(),
        persona,
        short_term,
        direction
    )
}

/// Same as [`beat_system_prompt`] but pinned to the structured script direction.
pub(crate) fn script_system_prompt(
    persona: &str,
    short_term: &str,
    context: &SceneContext<'_>,
) -> String {
    beat_system_prompt(AgentRole::ScriptWriter, persona, short_term, context)
}

/// System prompt for folding short-term memory into one long-term entry.
pub(crate) fn summarize_system_prompt(name: &str) -> String {
    format!(
        "You are a bot that takes an input paragraph about events and actions and summarizes it \
         in at most three sentences. The response should be from the point of view of {}.",
        name
    )
}

/// System prompt for deriving how an agent feels about what it remembers.
pub(crate) const REFLECT_SYSTEM_PROMPT: &str = "You are a bot that takes an input text about a \
series of thoughts and events and determines how the subject feels about them.";

/// System prompt for a confession-booth interview written from long-term memory.
pub(crate) const INTERVIEW_SYSTEM_PROMPT: &str = "You are a bot that simulates a confession booth \
scene in reality tv shows. You take in a character name and the character's long-term memory, \
and generate a script of the character's confession. The output is a screenplay with dialogue \
from the character only. It always takes place in the INT. REALITY TV SHOW CONFESSION BOOTH. \
The format should look like the following:\n\
FADE IN:\n\
INT. DRISKILL HOTEL SEMINAR ROOM - DAY\n\
JOE and APRIL burst through the doors into a clean, well-lit seminar room.\n\
JOE\n\
Are we in time?\n\
APRIL\n\
How could they start without us?";

/// User prompt for an interview: the name and everything the agent has committed.
pub(crate) fn interview_prompt(name: &str, long_term: &str) -> String {
    format!("Name: {} Long-term memory: {}", name, long_term)
}

/// Scene entries as one passage for condensing.
pub(crate) fn condense_prompt(entries: &[String]) -> String {
    entries.join(" .")
}

/// User prompt asking the script writer to revise. Feedback passes through verbatim.
pub(crate) fn revise_prompt(feedback: &str) -> String {
    format!(
        "please make the following changes to the original script: {}",
        feedback
    )
}

/// User prompt asking the producer to critique a script.
pub(crate) fn critique_prompt(script: &str) -> String {
    format!(
        "what do you think of : {} tell the script writer what they should change",
        script
    )
}

/// Append the requested shot count as a hint.
pub(crate) fn with_shot_hint(prompt: String, shot_count: Option<usize>) -> String {
    match shot_count {
        Some(count) => format!("{}\nNumber of shots: {}", prompt, count),
        None => prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneLog;

    #[test]
    fn test_beat_prompt_layout() {
        let log = SceneLog::with_opening("bob walks in");
        let context = SceneContext::new(&log, 0, 3);
        let prompt = beat_system_prompt(AgentRole::Character, "A grumpy cat.", "saw a mouse", &context);

        assert!(prompt.starts_with("story beat 0 / 3, scene context: bob walks in, purpose: A grumpy cat. saw a mouse"));
        assert!(prompt.ends_with(CHARACTER_DIRECTION));
    }

    #[test]
    fn test_interview_prompt_layout() {
        assert_eq!(
            interview_prompt("bob", "I lost my keys. I found them."),
            "Name: bob Long-term memory: I lost my keys. I found them."
        );
        assert!(INTERVIEW_SYSTEM_PROMPT.contains("CONFESSION BOOTH"));
    }

    #[test]
    fn test_condense_prompt_joins_entries() {
        let entries = vec!["bob walks in".to_string(), "alex waves".to_string()];
        assert_eq!(condense_prompt(&entries), "bob walks in .alex waves");
    }

    #[test]
    fn test_revise_passes_feedback_verbatim() {
        let feedback = "  Cut shot 2.\nMake bob \"angrier\".  ";
        assert!(revise_prompt(feedback).ends_with(feedback));
    }

    #[test]
    fn test_shot_hint() {
        assert_eq!(with_shot_hint("go".to_string(), None), "go");
        assert_eq!(with_shot_hint("go".to_string(), Some(4)), "go\nNumber of shots: 4");
    }
}
