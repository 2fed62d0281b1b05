use std::env;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::ai::prompt::PERSONA_DIRECTIVE;

pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CHAR_DELAY_MS: u64 = 10;
pub const DEFAULT_SEGMENT_DELAY_MS: u64 = 100;

/// Sampling temperatures accepted by OpenAI compatible APIs. Also
/// rules out NaN and infinities, which serialize as `null`.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=2.0;

/// Everything the chat session needs, resolved once at startup.
///
/// Building an `AppConfig` never fails. A missing credential or
/// endpoint is reported by the completion client when a request is
/// actually attempted.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub timeout: Duration,
    pub system_message: String,
    pub char_delay: Duration,
    pub segment_delay: Duration,
}

impl AppConfig {
    /// Load `.env` from the working directory (if there is one) and
    /// then read the environment.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::from_env()
    }

    /// Same as `load` but with an explicit `.env` path.
    pub fn load_from(path: &Path) -> Self {
        if let Err(e) = dotenvy::from_path(path) {
            tracing::warn!("Ignoring env file {}: {}", path.display(), e);
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let api_key = non_empty_var("DEEPSEEK_API_KEY");
        let api_base_url = non_empty_var("DEEPSEEK_BASE_URL");
        let model = non_empty_var("DEEPSEEK_MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let temperature = parsed_var("DEEPSEEK_TEMPERATURE", DEFAULT_TEMPERATURE, |t| {
            TEMPERATURE_RANGE.contains(t)
        });
        let timeout = Duration::from_secs(parsed_var(
            "DEEPSEEK_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
            |secs| *secs > 0,
        ));
        let system_message = non_empty_var("PERSONA_CHAT_SYSTEM_MESSAGE")
            .unwrap_or_else(|| PERSONA_DIRECTIVE.to_string());
        let char_delay = Duration::from_millis(parsed_var(
            "PERSONA_CHAT_CHAR_DELAY_MS",
            DEFAULT_CHAR_DELAY_MS,
            |_| true,
        ));
        let segment_delay = Duration::from_millis(parsed_var(
            "PERSONA_CHAT_SEGMENT_DELAY_MS",
            DEFAULT_SEGMENT_DELAY_MS,
            |_| true,
        ));

        Self {
            api_key,
            api_base_url,
            model,
            temperature,
            timeout,
            system_message,
            char_delay,
            segment_delay,
        }
    }

    pub fn status(&self) -> ConfigStatus<'_> {
        ConfigStatus(self)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            system_message: PERSONA_DIRECTIVE.to_string(),
            char_delay: Duration::from_millis(DEFAULT_CHAR_DELAY_MS),
            segment_delay: Duration::from_millis(DEFAULT_SEGMENT_DELAY_MS),
        }
    }
}

/// Human readable configuration report. Only ever shows a short
/// prefix of the API key.
pub struct ConfigStatus<'a>(&'a AppConfig);

impl fmt::Display for ConfigStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        match &config.api_key {
            Some(key) => {
                let prefix: String = key.chars().take(5).collect();
                writeln!(f, "API key:     set ({}...)", prefix)?;
            }
            None => writeln!(f, "API key:     not set (DEEPSEEK_API_KEY)")?,
        }
        match &config.api_base_url {
            Some(url) => writeln!(f, "Base URL:    {}", url)?,
            None => writeln!(f, "Base URL:    not set (DEEPSEEK_BASE_URL)")?,
        }
        writeln!(f, "Model:       {}", config.model)?;
        writeln!(f, "Temperature: {}", config.temperature)?;
        write!(f, "Timeout:     {}s", config.timeout.as_secs())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses `name` and falls back to `default` with a warning when the
/// value doesn't parse or `accept` rejects it.
fn parsed_var<T>(name: &str, default: T, accept: impl Fn(&T) -> bool) -> T
where
    T: FromStr + Copy + fmt::Display,
{
    let Some(raw) = non_empty_var(name) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if accept(&value) => value,
        _ => {
            tracing::warn!("Invalid value for {}: {:?}, using {}", name, raw, default);
            default
        }
    }
}
