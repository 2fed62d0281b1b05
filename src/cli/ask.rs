use std::io;

use anyhow::{Result, bail};

use super::chat::{respond, session, typewriter};
use crate::core::AppConfig;

/// One-shot version of the chat loop: a fresh session, one message.
pub async fn run(config: AppConfig, message: &str, no_reveal: bool) -> Result<()> {
    let mut chat = session(&config);
    let typewriter = typewriter(&config, no_reveal);

    let reply = respond(&mut chat, message, &typewriter, &mut io::stdout()).await?;
    if reply.is_failed() {
        bail!("{}", reply.content());
    }
    Ok(())
}
