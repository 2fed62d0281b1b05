use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Request options that stay the same for every call in a session.
#[derive(Clone, Debug)]
pub struct CompletionOptions<'a> {
    pub api_base_url: &'a str,
    pub api_key: &'a str,
    pub model: &'a str,
    pub temperature: f64,
    pub timeout: Duration,
}

pub fn completions_url(api_base_url: &str) -> String {
    format!("{}/chat/completions", api_base_url.trim_end_matches("/"))
}

/// Sends a non-streaming chat completion request to an OpenAI
/// compatible API and returns the raw JSON response. Non-2xx
/// responses are returned as errors with the response body attached.
pub async fn completion(
    client: &reqwest::Client,
    messages: &[Message],
    opts: &CompletionOptions<'_>,
) -> Result<Value, Error> {
    let payload = json!({
        "model": opts.model,
        "messages": messages,
        "temperature": opts.temperature,
        "stream": false,
    });
    let url = completions_url(opts.api_base_url);

    tracing::debug!(
        "POST {} model={} messages={}",
        url,
        opts.model,
        messages.len()
    );

    let response = client
        .post(url)
        .bearer_auth(opts.api_key)
        .header("Content-Type", "application/json")
        .timeout(opts.timeout)
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("HTTP {}: {}", status, body.trim()));
    }

    Ok(response.json().await?)
}

/// Pulls the assistant text out of a chat completion response.
pub fn response_content(resp: &Value) -> Result<&str, Error> {
    resp["choices"][0]["message"]["content"]
        .as_str()
        .ok_or(anyhow!("No message content in response: {}", resp))
}
