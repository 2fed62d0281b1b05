use std::io::{self, Write};

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::chat::{Chat, ChatBuilder, Reply, Speaker};
use crate::core::AppConfig;
use crate::openai::OpenAiClient;
use crate::reveal::Typewriter;

const THINKING: &str = "Thinking...";
const HELP: &str = "Commands: /clear to start over, /history to reprint the conversation, /quit to exit";

/// Builds a session that talks to the configured endpoint.
pub fn session(config: &AppConfig) -> Chat {
    ChatBuilder::new(Box::new(OpenAiClient::new(config)))
        .persona(&config.system_message)
        .build()
}

pub fn typewriter(config: &AppConfig, no_reveal: bool) -> Typewriter {
    if no_reveal {
        Typewriter::instant()
    } else {
        Typewriter::from_config(config)
    }
}

/// Runs one turn and renders the reply. A "Thinking..." indicator is
/// shown until the reply starts to appear. Errors are printed as is,
/// only successful answers are revealed gradually.
pub async fn respond<W: Write>(
    chat: &mut Chat,
    input: &str,
    typewriter: &Typewriter,
    out: &mut W,
) -> Result<Reply> {
    write!(out, "{}: {}", Speaker::Assistant, THINKING)?;
    out.flush()?;

    let reply = chat.next_msg(input).await;

    // Erase the indicator line
    write!(out, "\r\x1b[2K{}: ", Speaker::Assistant)?;
    match &reply {
        Reply::Completed(text) => {
            typewriter.play(text, out).await?;
        }
        Reply::Failed(text) => write!(out, "{}", text)?,
    }
    writeln!(out)?;
    out.flush()?;

    Ok(reply)
}

pub fn print_history<W: Write>(chat: &Chat, out: &mut W) -> Result<()> {
    if chat.transcript().is_empty() {
        writeln!(out, "(no messages yet)")?;
        return Ok(());
    }
    for turn in chat.transcript().iter() {
        writeln!(out, "{}: {}", turn.speaker(), turn.content())?;
    }
    Ok(())
}

/// Environment variables that must be set before a completion can
/// succeed.
pub fn missing_settings(config: &AppConfig) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.api_key.is_none() {
        missing.push("DEEPSEEK_API_KEY");
    }
    if config.api_base_url.is_none() {
        missing.push("DEEPSEEK_BASE_URL");
    }
    missing
}

pub async fn run(config: AppConfig, no_reveal: bool) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut chat = session(&config);
    let typewriter = typewriter(&config, no_reveal);
    let mut stdout = io::stdout();

    let missing = missing_settings(&config);
    if !missing.is_empty() {
        println!(
            "Not configured: set {}, or run `persona-chat config`.",
            missing.join(" and ")
        );
    }
    println!("{}", HELP);
    tracing::info!("Chat session started with model {}", config.model);

    loop {
        let readline = rl.readline(&format!("{}: ", Speaker::User));
        match readline {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match input {
                    "/quit" | "/exit" => break,
                    "/clear" => {
                        chat.clear();
                        println!("Conversation cleared.");
                    }
                    "/history" => print_history(&chat, &mut stdout)?,
                    "/help" => println!("{}", HELP),
                    _ => {
                        respond(&mut chat, input, &typewriter, &mut stdout).await?;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    tracing::info!(
        "Chat session ended after {} turns",
        chat.transcript().len()
    );
    Ok(())
}
