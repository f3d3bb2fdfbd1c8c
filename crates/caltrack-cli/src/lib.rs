//! Caltrack CLI library.
//!
//! This library provides the command-line surface over the tracker core:
//! configuration management, command execution with its interactive
//! decision loop, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
