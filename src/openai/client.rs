use std::sync::OnceLock;

use async_trait::async_trait;

use super::core::{CompletionOptions, Message, completion, response_content};
use super::error::CompletionError;
use crate::core::AppConfig;

/// Anything that can turn a list of messages into the assistant's
/// reply. Failures never escape as panics or `anyhow` errors, they
/// are always a `CompletionError`.
#[async_trait]
pub trait CompletionClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError>;
}

pub type BoxedCompletionClient = Box<dyn CompletionClient + Send + Sync + 'static>;

/// Completion client for OpenAI compatible chat completion APIs
/// (DeepSeek by default).
///
/// Construction never fails. The credential and endpoint are checked
/// and the HTTP client is built on the first call to `complete`, so a
/// misconfigured client reports the problem at the point of use and
/// never sends a request.
pub struct OpenAiClient {
    api_key: Option<String>,
    api_base_url: Option<String>,
    model: String,
    temperature: f64,
    timeout: std::time::Duration,
    http: OnceLock<Result<reqwest::Client, CompletionError>>,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout,
            http: OnceLock::new(),
        }
    }

    fn http(&self) -> Result<&reqwest::Client, CompletionError> {
        self.http
            .get_or_init(|| {
                reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(|e| {
                        CompletionError::configuration(format!(
                            "failed to initialize HTTP client: {}",
                            e
                        ))
                    })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn options(&self) -> Result<CompletionOptions<'_>, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CompletionError::configuration("API key is not configured (set DEEPSEEK_API_KEY)")
        })?;
        let api_base_url = self.api_base_url.as_deref().ok_or_else(|| {
            CompletionError::configuration("API base URL is not configured (set DEEPSEEK_BASE_URL)")
        })?;
        Ok(CompletionOptions {
            api_base_url,
            api_key,
            model: &self.model,
            temperature: self.temperature,
            timeout: self.timeout,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError> {
        let opts = self.options()?;
        let http = self.http()?;

        let resp = completion(http, messages, &opts).await?;
        let content = response_content(&resp)?;
        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::{CompletionErrorKind, Role};
    use std::time::Duration;

    fn config(url: Option<String>, key: Option<&str>) -> AppConfig {
        AppConfig {
            api_key: key.map(String::from),
            api_base_url: url,
            timeout: Duration::from_secs(5),
            ..AppConfig::default()
        }
    }

    fn messages() -> Vec<Message> {
        vec![
            Message::new(Role::System, "Be brief."),
            Message::new(Role::User, "Hi"),
        ]
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "Hey. What's up"}}]}"#)
            .create();

        let client = OpenAiClient::new(&config(Some(server.url()), Some("sk-test")));
        let result = client.complete(&messages()).await;

        mock.assert();
        assert_eq!(result.unwrap(), "Hey. What's up");
    }

    #[tokio::test]
    async fn test_missing_api_key_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create();

        let client = OpenAiClient::new(&config(Some(server.url()), None));
        let err = client.complete(&messages()).await.unwrap_err();

        mock.assert();
        assert_eq!(err.kind, CompletionErrorKind::Configuration);
        assert!(err.message.contains("DEEPSEEK_API_KEY"));
    }

    #[tokio::test]
    async fn test_missing_base_url() {
        let client = OpenAiClient::new(&config(None, Some("sk-test")));
        let err = client.complete(&messages()).await.unwrap_err();

        assert!(err.is_configuration());
        assert!(err.message.contains("DEEPSEEK_BASE_URL"));
    }

    #[tokio::test]
    async fn test_auth_failure_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Authentication Fails"}}"#)
            .create();

        let client = OpenAiClient::new(&config(Some(server.url()), Some("sk-bad")));
        let err = client.complete(&messages()).await.unwrap_err();

        mock.assert();
        assert_eq!(err.kind, CompletionErrorKind::Transport);
        assert!(err.message.contains("401"));
    }

    #[tokio::test]
    async fn test_malformed_response_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create();

        let client = OpenAiClient::new(&config(Some(server.url()), Some("sk-test")));
        let err = client.complete(&messages()).await.unwrap_err();

        mock.assert();
        assert_eq!(err.kind, CompletionErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Nothing listens on port 9 on the loopback interface
        let client = OpenAiClient::new(&config(
            Some("http://127.0.0.1:9".to_string()),
            Some("sk-test"),
        ));
        let err = client.complete(&messages()).await.unwrap_err();

        assert_eq!(err.kind, CompletionErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        // Connections land in the listen backlog and are never answered
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let client = OpenAiClient::new(&AppConfig {
            timeout: Duration::from_secs(1),
            ..config(Some(url), Some("sk-test"))
        });

        let err = client.complete(&messages()).await.unwrap_err();

        assert_eq!(err.kind, CompletionErrorKind::Transport);
        assert!(err.message.contains("timed out"), "{}", err.message);
        drop(listener);
    }

    #[tokio::test]
    async fn test_no_retry_on_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .expect(1)
            .create();

        let client = OpenAiClient::new(&config(Some(server.url()), Some("sk-test")));
        let result = client.complete(&messages()).await;

        mock.assert();
        assert!(result.is_err());
    }
}
