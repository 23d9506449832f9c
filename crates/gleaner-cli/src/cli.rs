//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use gleaner_fetch::{FetchError, Source};
use std::path::PathBuf;

/// Gleaner - Extract event records from web pages into YAML datasets.
#[derive(Debug, Parser)]
#[command(name = "gleaner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Configuration file path (default: ~/.gleaner/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the dataset files
    #[arg(long, global = true, env = "GLEANER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Model provider (github, dashscope, openai, ollama or a configured name)
    #[arg(long, global = true, env = "AI_PROVIDER")]
    pub provider: Option<String>,

    /// Model name
    #[arg(long, global = true, env = "AI_MODEL")]
    pub model: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More log output on stderr (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a record, preview it and confirm before saving
    Extract(ExtractArgs),

    /// Extract and save without prompts, reporting one JSON object
    Ci(CiArgs),
}

/// Where to read from; exactly one is required.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Event page URL
    #[arg(long)]
    pub url: Option<String>,

    /// Local document
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    /// Resolve to a fetchable source; `--url` only accepts http(s) URLs
    pub fn to_source(&self) -> Result<Source, FetchError> {
        match (&self.url, &self.file) {
            (Some(url), _) => match Source::parse(url)? {
                source @ Source::Url(_) => Ok(source),
                Source::File(_) => Err(FetchError::InvalidUrl(
                    url.clone(),
                    "expected an http:// or https:// URL".to_string(),
                )),
            },
            (None, Some(path)) => Ok(Source::File(path.clone())),
            (None, None) => Err(FetchError::InvalidUrl(
                String::new(),
                "no source given".to_string(),
            )),
        }
    }
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Save without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Also require a description, tags and at least one sub-event
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the ci command.
#[derive(Debug, Parser)]
pub struct CiArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Report the outcome without writing the dataset
    #[arg(long)]
    pub no_save: bool,

    /// Also require a description, tags and at least one sub-event
    #[arg(long)]
    pub strict: bool,
}
