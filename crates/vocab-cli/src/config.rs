use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vocab_merge::DEFAULT_MASTER_NAME;
use vocab_splitter::SplitterConfig;

use crate::cli::SplitterArgs;

/// File looked up inside the scanned directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "vocab.toml";

/// Settings for the `vocab` binary.
///
/// ```toml
/// output_dir = ".vocab"
/// master_name = "master"
/// pretty = true
///
/// [splitter]
/// key_delimiter = "."
/// list_marker = "*"
/// convert_lists = true
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub splitter: SplitterConfig,
    /// Where `struct` writes its output, relative to the scanned directory.
    pub output_dir: String,
    pub master_name: String,
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            splitter: SplitterConfig::default(),
            output_dir: ".vocab".into(),
            master_name: DEFAULT_MASTER_NAME.into(),
            pretty: false,
        }
    }
}

impl CliConfig {
    /// Read and validate a TOML configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `explicit` if given, else `dir/vocab.toml` if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(candidate) = dir.map(|d| d.join(CONFIG_FILE_NAME)) {
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        Ok(Self::default())
    }

    /// Apply command-line overrides on top of file values.
    pub fn apply_splitter_args(&mut self, args: &SplitterArgs) -> anyhow::Result<()> {
        if let Some(delimiter) = &args.key_delimiter {
            self.splitter.codec.key_delimiter = delimiter.clone();
        }
        if let Some(marker) = &args.list_marker {
            self.splitter.codec.list_marker = marker.clone();
        }
        if args.no_convert_lists {
            self.splitter.convert_lists = false;
        }
        self.validate()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.splitter.validate()?;
        if self.output_dir.is_empty() {
            bail!("output_dir must not be empty");
        }
        if self.master_name.is_empty() {
            bail!("master_name must not be empty");
        }
        Ok(())
    }
}
