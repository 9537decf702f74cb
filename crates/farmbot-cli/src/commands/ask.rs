//! One-shot question.

use crate::commands::await_replies;
use crate::render;
use anyhow::{bail, Result};
use farmbot_engine::SessionHandle;

pub async fn run(session: &SessionHandle, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        bail!("question must not be empty");
    }
    let seen = session.snapshot().messages.len();
    session.submit_text(question)?;

    for message in await_replies(session, seen + 1).await {
        render::print_message(&message);
    }
    Ok(())
}
