//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use caltrack_domain::ActivitySign;
use clap::{Parser, Subcommand};

/// Caltrack CLI - structured-command CRUD over the tracker journal.
#[derive(Debug, Parser)]
#[command(name = "caltrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Journal file path (overrides the configured path)
    #[arg(short, long, global = true)]
    pub journal: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a structured command produced by the external translator
    Exec(ExecArgs),

    /// Dump journal diagnostics: per-type counts plus every raw record
    Dump,

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for the exec command.
#[derive(Debug, Parser)]
pub struct ExecArgs {
    /// Command JSON, inline
    pub command: Option<String>,

    /// Read command JSON from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Read command JSON from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the active configuration
    Show,

    /// Set the journal file path
    SetJournal {
        /// New journal path
        path: PathBuf,
    },

    /// Set the stored sign convention for activity calories
    SetActivitySign {
        /// Sign convention
        #[arg(value_enum)]
        sign: SignArg,
    },
}

/// Activity sign argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SignArg {
    /// Burned calories stored as a positive magnitude
    Positive,
    /// Burned calories stored negated
    Negative,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SignArg> for ActivitySign {
    fn from(sign: SignArg) -> Self {
        match sign {
            SignArg::Positive => ActivitySign::Positive,
            SignArg::Negative => ActivitySign::Negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_with_inline_json() {
        let cli = Cli::parse_from(["caltrack", "exec", r#"{"action":"read"}"#]);
        match cli.command {
            Command::Exec(args) => assert!(args.command.is_some()),
            _ => panic!("Expected Exec command"),
        }
    }

    #[test]
    fn test_exec_from_stdin() {
        let cli = Cli::parse_from(["caltrack", "exec", "--stdin"]);
        match cli.command {
            Command::Exec(args) => assert!(args.stdin),
            _ => panic!("Expected Exec command"),
        }
    }

    #[test]
    fn test_global_journal_override() {
        let cli = Cli::parse_from(["caltrack", "--journal", "/tmp/j.ndjson", "dump"]);
        assert_eq!(cli.journal.unwrap().to_str().unwrap(), "/tmp/j.ndjson");
        assert!(matches!(cli.command, Command::Dump));
    }

    #[test]
    fn test_sign_conversion() {
        let sign: ActivitySign = SignArg::Negative.into();
        assert!(matches!(sign, ActivitySign::Negative));
    }

    #[test]
    fn test_config_set_journal() {
        let cli = Cli::parse_from(["caltrack", "config", "set-journal", "/tmp/new.ndjson"]);
        match cli.command {
            Command::Config(args) => {
                assert!(matches!(args.action, ConfigAction::SetJournal { .. }))
            }
            _ => panic!("Expected Config command"),
        }
    }
}
