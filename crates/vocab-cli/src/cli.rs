use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vocab",
    about = "Factor similar JSON documents into a shared master and per-document deltas",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
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
    /// Factor the JSON documents of a directory into a master and deltas
    Struct(StructArgs),
    /// Rebuild one document from a master and its delta
    Restore(RestoreArgs),
    /// Print every leaf of a document with its path
    Flatten(FlattenArgs),
}

/// Overrides for the splitter section of the configuration.
#[derive(Args, Clone, Debug, Default)]
pub struct SplitterArgs {
    #[arg(long)]
    pub key_delimiter: Option<String>,
    #[arg(long)]
    pub list_marker: Option<String>,
    /// Treat sequences as single leaves
    #[arg(long)]
    pub no_convert_lists: bool,
}

#[derive(Args)]
pub struct StructArgs {
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,
    /// Output directory, relative to the scanned directory
    #[arg(short, long)]
    pub output: Option<String>,
    #[arg(long)]
    pub master_name: Option<String>,
    #[arg(long)]
    pub pretty: bool,
    #[command(flatten)]
    pub splitter: SplitterArgs,
}

#[derive(Args)]
pub struct RestoreArgs {
    #[arg(long)]
    pub master: PathBuf,
    #[arg(long)]
    pub delta: PathBuf,
    #[command(flatten)]
    pub splitter: SplitterArgs,
}

#[derive(Args)]
pub struct FlattenArgs {
    pub file: PathBuf,
    #[command(flatten)]
    pub splitter: SplitterArgs,
}
