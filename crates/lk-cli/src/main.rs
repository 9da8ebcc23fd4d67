use std::io::{self, IsTerminal};

use clap::Parser;
use tracing::Level;

mod cli;
mod commands;
mod settings;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    commands::run_command(cli, &mut stdout.lock(), color)
}
