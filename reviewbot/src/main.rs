//! JSON-line stdio transport for a single review session.
//!
//! Reads `{"type":"userMessage","text":...}` envelopes from stdin, one per
//! line, and writes `{"type":"botReply","text":...}` envelopes to stdout.
//! The hosting surface renders them; this binary only owns the session.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use reviewbot::gateway::GeminiGateway;
use reviewbot::{Envelope, Session, SessionConfig};

#[derive(Parser)]
#[command(
    name = "reviewbot",
    about = "Conversational code-review assistant speaking JSON-line envelopes on stdio"
)]
struct Args {
    /// Project root to review and apply fixes under (defaults to the
    /// current directory).
    #[arg(long)]
    root: Option<PathBuf>,
    /// Model identifier for the generation service.
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = SessionConfig::from_env();
    config.root = match args.root {
        Some(root) => Some(root),
        None => std::env::current_dir().ok(),
    };
    if let Some(model) = args.model {
        config.model = model;
    }

    let gateway = Arc::new(GeminiGateway::new(
        config.api_key.clone().unwrap_or_default(),
        config.model.clone(),
    ));
    let session = Session::new(config, gateway);
    info!("session open; awaiting userMessage envelopes on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let envelope: Envelope = match serde_json::from_str(&line) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "ignoring unparseable envelope");
                continue;
            }
        };
        let Envelope::UserMessage { text } = envelope else {
            warn!("ignoring non-userMessage envelope");
            continue;
        };

        let reply = session.handle(&text).await;
        let out = serde_json::to_string(&Envelope::BotReply { text: reply })
            .context("failed to serialize reply envelope")?;
        stdout.write_all(out.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    // Stdin closed — the surface is gone, tear the session down.
    session.close().await;
    Ok(())
}
