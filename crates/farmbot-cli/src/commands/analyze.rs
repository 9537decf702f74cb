//! Simulated photo diagnosis.

use crate::commands::await_replies;
use crate::render;
use anyhow::{Context, Result};
use farmbot_core::message::ImageRef;
use farmbot_engine::SessionHandle;
use std::path::Path;

pub async fn run(session: &SessionHandle, image: &Path) -> Result<()> {
    let bytes = std::fs::read(image)
        .with_context(|| format!("reading image {}", image.display()))?;
    let seen = session.snapshot().messages.len();
    session.submit_image(ImageRef::Bytes(bytes))?;

    println!("Analyzing {} ...", image.display());
    for message in await_replies(session, seen + 1).await {
        render::print_message(&message);
    }
    Ok(())
}
