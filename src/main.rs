use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod bank;

/// The size of the channel for processing commands.
const CHANNEL_SIZE: usize = 100;

/// The script replayed when no input file is given.
const WALKTHROUGH: &str = include_str!("../demos/walkthrough.csv");

#[derive(Parser)]
#[command(name = "bank-account")]
#[command(about = "Replays a script of account commands", long_about = None)]
struct Cli {
    /// CSV script with `type,holder,amount` columns; the bundled walkthrough runs when omitted
    script: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let script = match &cli.script {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            println!("---Testing Account Class ---");
            WALKTHROUGH.as_bytes().to_vec()
        }
    };

    let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
    let mut session = bank::Session::new(receiver, std::io::stdout());

    let handle = tokio::spawn(async move { session.run().await });

    let sent = bank::send_script(&script, &sender).await;
    info!(sent, "script loaded");

    drop(sender); // Close the sender so the session loop ends after the last command
    handle
        .await
        .context("failed to join the session task")?
        .context("failed to write transcript")?;
    Ok(())
}
