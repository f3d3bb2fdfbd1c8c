//! Output formatting for the CLI.

use caltrack_domain::Record;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

use crate::config::OutputFormat;
use crate::error::Result;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The same formatter with another output format; a command's own
    /// display selector overrides the configured one.
    pub fn with_format(&self, format: OutputFormat) -> Self {
        Self {
            format,
            color_enabled: self.color_enabled,
        }
    }

    /// Format records output.
    pub fn format_records(&self, records: &[Record]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_records_json(records),
            OutputFormat::Table => self.format_records_table(records),
            OutputFormat::Quiet => self.format_records_quiet(records),
        }
    }

    /// Format records as JSON, exactly as they sit in the journal.
    fn format_records_json(&self, records: &[Record]) -> Result<String> {
        Ok(serde_json::to_string_pretty(records)?)
    }

    /// Format records as a table.
    fn format_records_table(&self, records: &[Record]) -> Result<String> {
        if records.is_empty() {
            return Ok(self.colorize("No records found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Date", "Type", "Detail", "Amount", "ID"]);

        for record in records {
            let (detail, amount) = match record {
                Record::Food {
                    meal,
                    description,
                    kcal,
                    ..
                } => (format!("{}: {}", meal, description), format!("{} kcal", kcal)),
                Record::Activity {
                    description,
                    kcal_burned,
                    ..
                } => (description.clone(), format!("{} kcal burned", kcal_burned)),
                Record::Fluid {
                    description,
                    volume_ml,
                    ..
                } => (description.clone(), format!("{} ml", volume_ml)),
                Record::Weight { kg, .. } => (String::new(), format!("{:.1} kg", kg)),
            };
            let day = record.day().to_string();
            let id = record.id().to_string();
            builder.push_record([
                day.as_str(),
                record.kind().as_str(),
                detail.as_str(),
                amount.as_str(),
                &id[..8], // Truncate ID for readability
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Format records in quiet mode (IDs only).
    fn format_records_quiet(&self, records: &[Record]) -> Result<String> {
        let ids: Vec<String> = records.iter().map(|r| r.id().to_string()).collect();
        Ok(ids.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} record(s)", operation, count))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
