pub mod core;
pub mod models;

pub use self::core::{Chat, ChatBuilder, ClearOutcome, ERROR_PREFIX, Reply};
pub use models::{Speaker, Transcript, Turn};
