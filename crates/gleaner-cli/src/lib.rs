//! Gleaner CLI library.
//!
//! Argument parsing, configuration loading, the interactive `extract` and
//! automated `ci` drivers, and terminal output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command, GlobalArgs};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
