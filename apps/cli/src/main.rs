//! Guestbook CLI — sign and browse a guestbook from the terminal.
//!
//! Entries are kept in a single libSQL table; markup in any field is
//! censored before it is stored.

mod commands;
mod shell;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
