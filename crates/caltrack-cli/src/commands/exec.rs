//! Exec command implementation.

use std::fs;
use std::io::Read;

use caltrack_dispatch::{Dispatcher, Outcome};
use caltrack_domain::{Command as TrackerCommand, Journal};
use chrono::Local;

use crate::cli::ExecArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session;

/// Execute a structured command against the journal.
pub fn execute_exec<J: Journal>(
    args: ExecArgs,
    journal: &mut J,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let raw = read_command_json(&args)?;
    let cmd: TrackerCommand = serde_json::from_str(&raw)?;
    let format_override = cmd.format.as_deref().and_then(parse_format);

    let today = Local::now().date_naive();
    let mut dispatcher = Dispatcher::new(journal, today, config.activity_sign);
    let outcome = session::drive(&mut dispatcher, cmd)?;

    match format_override {
        Some(format) => render(outcome, &formatter.with_format(format)),
        None => render(outcome, formatter),
    }
}

/// The command's own display selector; anything unrecognized falls back to
/// the configured format.
fn parse_format(raw: &str) -> Option<crate::config::OutputFormat> {
    use crate::config::OutputFormat;
    match raw.trim().to_lowercase().as_str() {
        "table" => Some(OutputFormat::Table),
        "json" => Some(OutputFormat::Json),
        "quiet" => Some(OutputFormat::Quiet),
        _ => None,
    }
}

/// Collect the command JSON from the inline argument, a file, or stdin.
fn read_command_json(args: &ExecArgs) -> Result<String> {
    if let Some(inline) = &args.command {
        return Ok(inline.clone());
    }
    if let Some(path) = &args.file {
        return Ok(fs::read_to_string(path)?);
    }
    if args.stdin {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Err(CliError::InvalidInput(
        "provide command JSON inline, via --file, or via --stdin".to_string(),
    ))
}

fn render(outcome: Outcome, formatter: &Formatter) -> Result<()> {
    match outcome {
        Outcome::Entries { records, span } => {
            if let Some(span) = span {
                println!(
                    "{}",
                    formatter.info(&format!("Entries {} to {}", span.start, span.end))
                );
            }
            println!("{}", formatter.format_records(&records)?);
        }
        Outcome::Added(records) => {
            for record in records {
                println!(
                    "{}",
                    formatter.success(&format!(
                        "logged {} on {} (id={})",
                        record.label(),
                        record.day(),
                        record.id()
                    ))
                );
            }
        }
        Outcome::Updated(record) => {
            println!(
                "{}",
                formatter.success(&format!("updated {} (id={})", record.label(), record.id()))
            );
        }
        Outcome::Deleted(id) => {
            println!("{}", formatter.success(&format!("deleted {}", id)));
        }
        Outcome::BulkDeleted { deleted, failed } => {
            println!("{}", formatter.bulk_result("Deleted", deleted));
            for (id, reason) in failed {
                println!(
                    "{}",
                    formatter.error(&format!("failed to delete {}: {}", id, reason))
                );
            }
        }
        Outcome::NoDatedEntries => {
            println!("{}", formatter.info("No dated entries found"));
        }
        Outcome::Cancelled => {
            println!("{}", formatter.info("Operation cancelled"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_command_json_inline_wins() {
        let args = ExecArgs {
            command: Some(r#"{"action":"read"}"#.to_string()),
            file: None,
            stdin: false,
        };
        assert_eq!(read_command_json(&args).unwrap(), r#"{"action":"read"}"#);
    }

    #[test]
    fn test_read_command_json_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"action":"show_weight"}}"#).unwrap();

        let args = ExecArgs {
            command: None,
            file: Some(file.path().to_path_buf()),
            stdin: false,
        };
        assert!(read_command_json(&args).unwrap().contains("show_weight"));
    }

    #[test]
    fn test_parse_format_selector() {
        use crate::config::OutputFormat;
        assert!(matches!(parse_format("JSON"), Some(OutputFormat::Json)));
        assert!(matches!(parse_format(" table "), Some(OutputFormat::Table)));
        assert!(parse_format("wide").is_none());
    }

    #[test]
    fn test_read_command_json_requires_a_source() {
        let args = ExecArgs {
            command: None,
            file: None,
            stdin: false,
        };
        assert!(matches!(
            read_command_json(&args),
            Err(CliError::InvalidInput(_))
        ));
    }
}
