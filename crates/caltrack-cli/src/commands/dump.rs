//! Dump command implementation.
//!
//! A diagnostic view of the raw journal: per-type counts followed by every
//! record as pretty JSON.

use caltrack_domain::{Journal, RecordKind};

use crate::error::Result;
use crate::output::Formatter;

/// Execute the dump command.
pub fn execute_dump<J: Journal>(journal: &J, formatter: &Formatter) -> Result<()> {
    let records = journal.read_all()?;
    if records.is_empty() {
        println!("{}", formatter.info("No records found"));
        return Ok(());
    }

    let count_of = |kind: RecordKind| records.iter().filter(|r| r.kind() == kind).count();
    println!("Found {} total records:", records.len());
    println!("  Foods: {}", count_of(RecordKind::Food));
    println!("  Activities: {}", count_of(RecordKind::Activity));
    println!("  Fluids: {}", count_of(RecordKind::Fluid));
    println!("  Weights: {}", count_of(RecordKind::Weight));

    for record in &records {
        println!("{}", serde_json::to_string_pretty(record)?);
    }
    Ok(())
}
