//! farmbot: terminal surface for the advisory engine.

mod commands;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use farmbot_core::config::EngineConfig;
use farmbot_core::random::SeededRandom;
use farmbot_core::user::Role;
use farmbot_engine::{Engine, SessionHandle};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "farmbot", version, about = "Kerala farming advisory assistant")]
struct Cli {
    /// Marketplace role of the current user. The assistant is
    /// producer-only.
    #[arg(long, global = true, default_value = "producer")]
    role: Role,

    /// Seed for reproducible sessions.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Path to farmbot.toml. Defaults to the platform config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat session.
    Chat,
    /// One-shot question, printed reply.
    Ask {
        /// The question to ask.
        question: String,
    },
    /// Run a simulated diagnosis over a crop photo.
    Analyze {
        /// Path to the image file.
        image: PathBuf,
    },
    /// Show the seasonal planting guide and example queries.
    Guide,
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("farmbot")
            .join("farmbot.toml")
    })
}

fn open_session(cli: &Cli, engine: &Engine) -> SessionHandle {
    match cli.seed {
        Some(seed) => engine.create_session_with(Box::new(SeededRandom::from_seed(seed))),
        None => engine.create_session(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli.role.is_producer() {
        bail!(
            "the advisory assistant is available to producers only (current role: {})",
            cli.role
        );
    }

    let path = config_path(&cli);
    let config = EngineConfig::load_or_default(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    let engine = Engine::new(config);

    match &cli.command {
        Command::Chat => commands::chat::run(&open_session(&cli, &engine)).await,
        Command::Ask { question } => commands::ask::run(&open_session(&cli, &engine), question).await,
        Command::Analyze { image } => {
            commands::analyze::run(&open_session(&cli, &engine), image).await
        }
        Command::Guide => commands::guide::run(&engine),
    }
}
