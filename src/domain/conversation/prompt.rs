//! Persona-conditioned prompt assembly.
//!
//! The completion oracle is prompted, not instructed through structured
//! fields, so section order and role labels are the only signal it gets for
//! turn attribution. Layout:
//!
//! ```text
//! <persona directive>
//!
//! Previous conversation:
//! User: ...
//! Assistant: ...
//!
//! User: <utterance>
//! Assistant:
//! ```
//!
//! The history block is omitted entirely when the window is empty.

use super::turn::Turn;
use crate::domain::persona::PersonaDescriptor;

/// Header introducing the rendered history.
pub const HISTORY_HEADER: &str = "Previous conversation:";

/// Builds completion prompts from a persona, a context window and a new utterance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonaPromptBuilder;

impl PersonaPromptBuilder {
    /// Assembles the prompt. Pure function of its inputs.
    pub fn build(persona: &PersonaDescriptor, window: &[Turn], utterance: &str) -> String {
        let mut prompt = String::with_capacity(
            persona.directive.len()
                + window.iter().map(|t| t.content().len() + 12).sum::<usize>()
                + utterance.len()
                + 48,
        );
        prompt.push_str(&persona.directive);

        if !window.is_empty() {
            let history: Vec<String> = window.iter().map(Turn::render).collect();
            prompt.push_str("\n\n");
            prompt.push_str(HISTORY_HEADER);
            prompt.push('\n');
            prompt.push_str(&history.join("\n"));
        }

        prompt.push_str("\n\n");
        prompt.push_str(&Self::completion_cue(utterance));
        prompt
    }

    /// The trailing `"User: <utterance>\nAssistant:"` cue.
    pub fn completion_cue(utterance: &str) -> String {
        format!("User: {}\nAssistant:", utterance)
    }
}
