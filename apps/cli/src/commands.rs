//! CLI argument definitions, tracing setup, and startup.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use guestbook_shared::load_config;
use guestbook_storage::EntryStore;
use tracing::{info, warn};

use crate::shell::Shell;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Guestbook — leave a note, read the notes others left.
#[derive(Parser)]
#[command(
    name = "guestbook",
    version,
    about = "Interactive terminal guestbook backed by a libSQL table.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Path to the config file (defaults to ~/.guestbook/guestbook.toml).
    #[arg(long, env = "GUESTBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Filter directive for a given `-v` count. `RUST_LOG` takes precedence.
fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "guestbook=warn",
        1 => "guestbook=info",
        2 => "guestbook=debug",
        _ => "guestbook=trace",
    }
}

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr so they never land in the middle of the menu.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(cli.verbose)));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

/// Load configuration, prepare the table, and hand control to the shell.
///
/// Only configuration problems end the process with an error; storage
/// failures are reported from inside the shell.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let store = EntryStore::new(config)?;
    info!(db = ?store.target(), "starting guestbook");

    if let Err(e) = store.ensure_schema().await {
        warn!(error = %e, "could not prepare the guestbook table");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(&store, stdin.lock(), stdout.lock()).run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ambient_flags() {
        let cli = Cli::try_parse_from(["guestbook", "-vv", "--config", "gb.toml", "--log-format", "json"])
            .expect("parse");
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("gb.toml")));
        assert!(matches!(cli.log_format, LogFormat::Json));
    }

    #[test]
    fn rejects_subcommands() {
        assert!(Cli::try_parse_from(["guestbook", "add"]).is_err());
    }

    #[test]
    fn verbosity_maps_to_filters() {
        assert_eq!(verbosity_filter(0), "guestbook=warn");
        assert_eq!(verbosity_filter(1), "guestbook=info");
        assert_eq!(verbosity_filter(2), "guestbook=debug");
        assert_eq!(verbosity_filter(9), "guestbook=trace");
    }
}
