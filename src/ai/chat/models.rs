//! The core models for managing a stateful chat with an LLM.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::openai::Role;

/// Who said a turn. The system persona is never a speaker, it only
/// exists at request time.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl From<Speaker> for Role {
    fn from(speaker: Speaker) -> Role {
        match speaker {
            Speaker::User => Role::User,
            Speaker::Assistant => Role::Assistant,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "you"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Turn {
    speaker: Speaker,
    content: String,
}

impl Turn {
    pub fn new(speaker: Speaker, content: &str) -> Self {
        Self {
            speaker,
            content: content.to_string(),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered, append-only record of the conversation. The only other
/// mutation is a full `clear`.
#[derive(Default, Debug)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn new_with_turns(turns: Vec<Turn>) -> Self {
        Self(turns)
    }

    pub fn append(&mut self, speaker: Speaker, content: &str) {
        self.0.push(Turn::new(speaker, content))
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    /// Empties the transcript and returns how many turns were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.0.len();
        self.0.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.0.iter()
    }
}
