use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lkinspect",
    about = "Inspect Linux kernel build artifacts: .config files and symbol tables",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a kernel config in canonical form
    Canon(CanonArgs),
    /// Show the differences between two kernel configs
    Diff(DiffArgs),
    /// Apply a saved diff to a kernel config
    Apply(ApplyArgs),
    /// Look up kernel symbols by name
    Syms(SymsArgs),
}

#[derive(Args)]
pub struct CanonArgs {
    pub path: PathBuf,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ApplyArgs {
    pub base: PathBuf,
    pub diff: PathBuf,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SymsArgs {
    pub name: String,
    /// Symbol table to read instead of the configured one
    #[arg(long)]
    pub path: Option<PathBuf>,
}
