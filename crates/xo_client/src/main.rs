//! xo_client - terminal tic-tac-toe kept in sync with a remote game service.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use xo_client::{ClientConfig, HttpTransport, IdentityFile};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::load_or_default(&cli.config)?.with_env_overrides();
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url);
    }

    initialize_tracing(&config)?;
    info!(server_url = %config.server_url(), "Starting xo_client");

    // Read before raw mode: the file may need to be created interactively.
    let identity_file = IdentityFile::new(config.identity_file());
    let session_id = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        identity_file
            .load_or_create(&mut input, &mut std::io::stdout())
            .inspect_err(|e| error!(error = %e, "Cannot start without a session id"))?
    };

    let transport = Arc::new(HttpTransport::new(config.server_url())?);
    xo_client::tui::run_tui(&config, transport, session_id).await
}

/// Logs to a file so output does not interfere with the terminal UI.
fn initialize_tracing(config: &ClientConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,xo_client=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
