//! Interactive chat loop.
//!
//! Reads lines from stdin and prints each reply as it lands. `/image
//! <path>` submits a photo for analysis; an empty line or EOF exits.

use crate::commands::await_replies;
use crate::render;
use anyhow::{Context, Result};
use farmbot_core::message::ImageRef;
use farmbot_engine::SessionHandle;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(session: &SessionHandle) -> Result<()> {
    for message in &session.snapshot().messages {
        render::print_message(message);
    }
    println!("(type a question, '/image <path>' to analyze a photo, or an empty line to quit)");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            break;
        }

        let seen = session.snapshot().messages.len();
        if let Some(path) = line.strip_prefix("/image ") {
            let bytes = std::fs::read(path.trim())
                .with_context(|| format!("reading image {}", path.trim()))?;
            session.submit_image(ImageRef::Bytes(bytes))?;
        } else {
            session.submit_text(&line)?;
        }

        // Skip echoing the user's own message back.
        for message in await_replies(session, seen + 1).await {
            render::print_message(&message);
        }
    }

    println!("Goodbye! Wishing you a good harvest.");
    Ok(())
}
