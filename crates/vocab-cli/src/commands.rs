use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use vocab_merge::{reconstruct, FactorReport, Factorizer};
use vocab_splitter::Splitter;
use vocab_store::{read_document, JsonDirectory};

use crate::cli::*;
use crate::config::CliConfig;

/// Failures of the command surface itself, before any document is read.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("output directory {} is the scanned directory", .0.display())]
    OutputIsInput(PathBuf),
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Struct(args) => cmd_struct(args, config_path, &cli.format),
        Command::Restore(args) => cmd_restore(args, config_path, &cli.format),
        Command::Flatten(args) => cmd_flatten(args, config_path, &cli.format),
    }
}

fn cmd_struct(args: StructArgs, config_path: Option<&Path>, format: &OutputFormat) -> anyhow::Result<()> {
    let mut config = CliConfig::discover(config_path, Some(args.directory.as_path()))?;
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(name) = args.master_name {
        config.master_name = name;
    }
    config.pretty |= args.pretty;
    config.apply_splitter_args(&args.splitter)?;

    let report = structure(&args.directory, &config)?;
    let output = args.directory.join(&config.output_dir);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!(
                "{} Factored {} documents into {}",
                "✓".green().bold(),
                report.documents.to_string().bold(),
                output.display().to_string().cyan()
            );
            println!("  {}: {} leaves", report.master_name.yellow(), report.master_leaves);
            for delta in &report.deltas {
                println!("  {}: {} leaves", delta.name, delta.leaves);
            }
        }
    }
    Ok(())
}

fn cmd_restore(args: RestoreArgs, config_path: Option<&Path>, format: &OutputFormat) -> anyhow::Result<()> {
    let mut config = CliConfig::discover(config_path, None)?;
    config.apply_splitter_args(&args.splitter)?;
    let restored = restore(&args.master, &args.delta, &config)?;
    match format {
        OutputFormat::Json => println!("{}", restored),
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(&restored.as_tree())?),
    }
    Ok(())
}

fn cmd_flatten(args: FlattenArgs, config_path: Option<&Path>, format: &OutputFormat) -> anyhow::Result<()> {
    let mut config = CliConfig::discover(config_path, None)?;
    config.apply_splitter_args(&args.splitter)?;
    let leaves = flatten(&args.file, &config)?;
    match format {
        OutputFormat::Json => {
            let object: Map<String, Value> = leaves.into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&object)?);
        }
        OutputFormat::Text => {
            for (path, value) in &leaves {
                println!("{} = {}", path.cyan(), value);
            }
        }
    }
    Ok(())
}

/// Fails unless `dir` exists and is a directory.
pub fn validate_directory(dir: &Path) -> Result<(), CommandError> {
    match fs::metadata(dir) {
        Err(_) => Err(CommandError::DirectoryNotFound(dir.to_path_buf())),
        Ok(meta) if !meta.is_dir() => Err(CommandError::NotADirectory(dir.to_path_buf())),
        Ok(_) => Ok(()),
    }
}

/// Factor the `*.json` files directly inside `dir` into `dir/<output_dir>`.
pub fn structure(dir: &Path, config: &CliConfig) -> anyhow::Result<FactorReport> {
    validate_directory(dir)?;
    let output = dir.join(&config.output_dir);
    debug!(input = %dir.display(), output = %output.display(), "structuring directory");

    let source = JsonDirectory::new(dir);
    let sink = JsonDirectory::create(&output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?
        .pretty(config.pretty);
    // Deltas would overwrite the inputs they came from.
    if same_directory(dir, &output)? {
        return Err(CommandError::OutputIsInput(output).into());
    }

    Factorizer::new(config.splitter.clone())
        .master_name(config.master_name.clone())
        .run(&source, &sink)
        .with_context(|| format!("failed to structure {}", dir.display()))
}

fn same_directory(a: &Path, b: &Path) -> anyhow::Result<bool> {
    let a = fs::canonicalize(a).with_context(|| format!("failed to resolve {}", a.display()))?;
    let b = fs::canonicalize(b).with_context(|| format!("failed to resolve {}", b.display()))?;
    Ok(a == b)
}

/// Merge a delta file over a master file.
pub fn restore(master: &Path, delta: &Path, config: &CliConfig) -> anyhow::Result<Splitter> {
    let master = read_document(master)
        .with_context(|| format!("failed to read master {}", master.display()))?;
    let delta = read_document(delta)
        .with_context(|| format!("failed to read delta {}", delta.display()))?;
    let master = Splitter::with_config(master.root, config.splitter.clone());
    let delta = Splitter::with_config(delta.root, config.splitter.clone());
    Ok(reconstruct(&master, &delta))
}

/// Every leaf of a file, keyed by its formatted path.
pub fn flatten(file: &Path, config: &CliConfig) -> anyhow::Result<Vec<(String, Value)>> {
    let document =
        read_document(file).with_context(|| format!("failed to read {}", file.display()))?;
    let splitter = Splitter::with_config(document.root, config.splitter.clone());
    Ok(splitter
        .leaves()
        .map(|(path, value)| (splitter.format_path(&path), value.clone()))
        .collect())
}
