use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod ask;
pub mod chat;
pub mod config;

use crate::core::AppConfig;
use crate::core::config::TEMPERATURE_RANGE;

#[derive(Args, Clone, Debug, Default)]
pub struct SessionArgs {
    /// Override the model identifier
    #[arg(long)]
    model: Option<String>,

    /// Override the sampling temperature
    #[arg(long)]
    temperature: Option<f64>,

    /// Print responses in one go instead of revealing them gradually
    #[arg(long, action, default_value = "false")]
    no_reveal: bool,
}

impl SessionArgs {
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        match self.temperature {
            Some(t) if TEMPERATURE_RANGE.contains(&t) => config.temperature = t,
            Some(t) => tracing::warn!(
                "Ignoring --temperature {}, keeping {}",
                t,
                config.temperature
            ),
            None => {}
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive chat session (default)
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Send a single message and print the reply
    Ask {
        #[arg(long)]
        message: String,

        #[command(flatten)]
        session: SessionArgs,
    },
    /// Show which configuration values were found
    Config {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=warn", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    init_tracing();
    let config = AppConfig::load();

    // Handle each sub command
    match args.command {
        Some(Command::Chat { session }) => {
            chat::run(session.apply(config), session.no_reveal).await?;
        }
        Some(Command::Ask { message, session }) => {
            ask::run(session.apply(config), &message, session.no_reveal).await?;
        }
        Some(Command::Config {}) => {
            config::run(&config);
        }
        None => {
            chat::run(config, false).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_overrides() {
        let cli = Cli::try_parse_from([
            "persona-chat",
            "chat",
            "--model",
            "deepseek-reasoner",
            "--temperature",
            "1.2",
            "--no-reveal",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Chat { session }) => {
                assert!(session.no_reveal);
                let config = session.apply(AppConfig::default());
                assert_eq!(config.model, "deepseek-reasoner");
                assert_eq!(config.temperature, 1.2);
            }
            _ => panic!("Expected Chat command"),
        }
    }

    #[test]
    fn test_out_of_range_temperature_is_ignored() {
        let cli = Cli::try_parse_from(["persona-chat", "chat", "--temperature", "NaN"]).unwrap();
        match cli.command {
            Some(Command::Chat { session }) => {
                let config = session.apply(AppConfig::default());
                assert_eq!(config.temperature, 0.3);
            }
            _ => panic!("Expected Chat command"),
        }
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["persona-chat", "ask", "--message", "Hi"]).unwrap();
        match cli.command {
            Some(Command::Ask { message, session }) => {
                assert_eq!(message, "Hi");
                assert!(!session.no_reveal);
                let config = session.apply(AppConfig::default());
                assert_eq!(config.model, "deepseek-chat");
            }
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_chat() {
        let cli = Cli::try_parse_from(["persona-chat"]).unwrap();
        assert!(cli.command.is_none());
    }
}
