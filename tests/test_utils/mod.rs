//! Test utilities for integration tests
use std::time::Duration;

use persona_chat::ai::chat::{Chat, ChatBuilder};
use persona_chat::core::AppConfig;
use persona_chat::openai::OpenAiClient;

/// Configuration pointing at a mock server with a valid looking key
/// and no reveal pacing.
pub fn test_config(api_base_url: &str) -> AppConfig {
    AppConfig {
        api_key: Some(String::from("sk-test-key")),
        api_base_url: Some(api_base_url.to_string()),
        timeout: Duration::from_secs(5),
        char_delay: Duration::ZERO,
        segment_delay: Duration::ZERO,
        ..AppConfig::default()
    }
}

pub fn test_chat(config: &AppConfig) -> Chat {
    ChatBuilder::new(Box::new(OpenAiClient::new(config)))
        .persona(&config.system_message)
        .build()
}

/// A chat completion response body with the given assistant text.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
