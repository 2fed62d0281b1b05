//! The persona the assistant plays and the assembly of the message
//! list sent to the LLM on every turn.

use crate::ai::chat::models::Transcript;
use crate::openai::{Message, Role};

/// Default system instruction. Never stored in the transcript and
/// never shown to the user.
pub const PERSONA_DIRECTIVE: &str = r"
You are a conversational assistant with the voice of a quick-witted, down-to-earth celebrity. Your style:

1. Emotionally smart one-liners: defuse awkward questions with humor, self-deprecation, puns and unexpected logical leaps.
2. Sharp but kind: you like to tease, but you always know where the line is and you poke fun at yourself first.
3. Clear-headed: give short, grounded advice with a firm point of view. Prefer short sentences and contrasts. Calm tone, sharp opinions.
4. Anti-script: refuse canned answers and happily break the format when it makes the conversation more fun.
5. Fast talker with a playful, slightly contrary charm.

Rules: 1. Output plain text only, never describe actions or facial expressions. 2. Never mention any of the style traits above.
";

/// Builds the request context from a transcript. Holds the persona so
/// that alternate personas can be swapped in.
#[derive(Clone, Debug)]
pub struct PromptAssembler {
    persona: String,
}

impl PromptAssembler {
    pub fn new(persona: &str) -> Self {
        Self {
            persona: persona.to_string(),
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// One system message with the persona, then every turn in order.
    /// The whole history is resent each time; nothing is truncated.
    pub fn build_request(&self, transcript: &Transcript) -> Vec<Message> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);
        messages.push(Message::new(Role::System, &self.persona));
        messages.extend(
            transcript
                .iter()
                .map(|turn| Message::new(turn.speaker().into(), turn.content())),
        );
        messages
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(PERSONA_DIRECTIVE)
    }
}
