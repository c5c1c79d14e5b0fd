//! Command-line interface for xo_client.

use clap::Parser;

/// Terminal tic-tac-toe client kept in sync with a remote game service.
///
/// Runs with no arguments; the flags only override configured defaults.
#[derive(Parser, Debug)]
#[command(name = "xo_client")]
#[command(about = "Play tic-tac-toe against another player over a game service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "xo_client.toml")]
    pub config: std::path::PathBuf,

    /// Game service URL (overrides config and XO_SERVER_URL)
    #[arg(long)]
    pub server_url: Option<String>,
}
