use crate::ai::prompt::PromptAssembler;
use crate::openai::BoxedCompletionClient;

use super::models::{Speaker, Transcript};

/// Shown in front of the error whenever a completion fails.
pub const ERROR_PREFIX: &str = "Oops, something went wrong: ";

/// Outcome of one turn. Either way the content has already been
/// appended to the transcript as the assistant's turn.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Completed(String),
    Failed(String),
}

impl Reply {
    pub fn content(&self) -> &str {
        match self {
            Reply::Completed(text) | Reply::Failed(text) => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Reply::Failed(_))
    }
}

/// Result of clearing a session. Clearing always succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearOutcome {
    pub removed: usize,
}

/// A single conversation with an LLM.
///
/// Owns the transcript for its whole lifetime and runs each turn to
/// completion before the next one can start:
/// - append the user's input
/// - assemble the persona plus full history
/// - wait for the completion
/// - append the reply, or an error message when the completion fails
///
/// Use `ChatBuilder` to construct a `Chat`.
pub struct Chat {
    client: BoxedCompletionClient,
    assembler: PromptAssembler,
    transcript: Transcript,
}

impl Chat {
    /// Runs the next turn. Completion failures are logged and turned
    /// into an assistant turn so the session stays usable.
    pub async fn next_msg(&mut self, input: &str) -> Reply {
        self.transcript.append(Speaker::User, input);

        let request = self.assembler.build_request(&self.transcript);
        tracing::debug!("Requesting completion with {} messages", request.len());

        let reply = match self.client.complete(&request).await {
            Ok(text) => Reply::Completed(text),
            Err(e) => {
                if e.is_configuration() {
                    tracing::warn!("Completion not attempted: {}", e);
                } else {
                    tracing::error!("Completion failed: {}", e);
                }
                Reply::Failed(format!("{}{}", ERROR_PREFIX, e))
            }
        };

        self.transcript.append(Speaker::Assistant, reply.content());
        reply
    }

    pub fn clear(&mut self) -> ClearOutcome {
        let removed = self.transcript.clear();
        tracing::info!("Cleared {} turns from the transcript", removed);
        ClearOutcome { removed }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn persona(&self) -> &str {
        self.assembler.persona()
    }
}

pub struct ChatBuilder {
    client: BoxedCompletionClient,
    assembler: PromptAssembler,
    transcript: Transcript,
}

impl ChatBuilder {
    pub fn new(client: BoxedCompletionClient) -> Self {
        Self {
            client,
            assembler: PromptAssembler::default(),
            transcript: Transcript::new(),
        }
    }

    pub fn build(self) -> Chat {
        Chat {
            client: self.client,
            assembler: self.assembler,
            transcript: self.transcript,
        }
    }

    pub fn persona(mut self, persona: &str) -> Self {
        self.assembler = PromptAssembler::new(persona);
        self
    }

    pub fn transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = transcript;
        self
    }
}
