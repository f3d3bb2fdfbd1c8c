//! Typed results handed to presentation

use caltrack_domain::{DateRange, Record, RecordId};

/// Final result of a dispatched command.
///
/// Empty results and error results stay distinct: an empty `Entries` list
/// is a successful read that matched nothing, while `NoDatedEntries` means
/// there was nothing to derive a fallback span from.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Filtered records plus the span they were filtered by (`None` when
    /// the whole store was listed unfiltered)
    Entries {
        /// Records inside the span, in journal order
        records: Vec<Record>,
        /// The resolved inclusive span, when one applied
        span: Option<DateRange>,
    },
    /// Records created by an add, in input order
    Added(Vec<Record>),
    /// The record after an update merge
    Updated(Record),
    /// The id removed by a single delete
    Deleted(RecordId),
    /// Batch delete report; failures are per-record and never aborted the
    /// rest of the batch
    BulkDeleted {
        /// How many records were removed
        deleted: usize,
        /// Each failing record with the reason it failed
        failed: Vec<(RecordId, String)>,
    },
    /// The store holds no dated entries to derive a fallback span from
    NoDatedEntries,
    /// A pending decision was declined; nothing changed
    Cancelled,
}
