//! Caltrack Storage Layer
//!
//! Implements the `Journal` trait over a newline-delimited JSON file, one
//! record per line, plus an in-memory journal for tests.
//!
//! # Durability
//!
//! Appends are a single write to a file opened in append mode. Update and
//! delete rewrite the whole journal through a temp file + fsync + rename,
//! so a crash mid-write can never leave readers with a truncated store.
//! There is no cross-process locking: the store assumes one active
//! invocation at a time and accepts last-write-wins loss.
//!
//! # Examples
//!
//! ```no_run
//! use caltrack_store::FileJournal;
//!
//! let journal = FileJournal::new("entries.ndjson");
//! ```

#![warn(missing_docs)]

mod file;
mod memory;

pub use file::FileJournal;
pub use memory::MemoryJournal;

use caltrack_domain::{JournalError, Record, RecordId, RecordKind};
use tracing::warn;

/// Locate the record a mutation refers to.
///
/// Ids are unique by construction, so more than one match is an anomaly
/// worth logging, never something to resolve silently; the optional kind
/// hint then picks the intended record.
pub(crate) fn locate(
    records: &[Record],
    id: RecordId,
    kind: Option<RecordKind>,
) -> Result<usize, JournalError> {
    let matches: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.id() == id)
        .map(|(i, _)| i)
        .collect();

    if matches.len() > 1 {
        warn!(%id, count = matches.len(), "duplicate record id observed in the journal");
    }

    let found = match kind {
        Some(kind) => matches.iter().copied().find(|&i| records[i].kind() == kind),
        None => matches.first().copied(),
    };
    found.ok_or(JournalError::NotFound(id))
}
