//! Trait boundary between domain logic and storage infrastructure
//!
//! Infrastructure implementations live in caltrack-store; the dispatcher
//! only ever sees this interface, so tests run against an in-memory
//! journal.

use serde_json::{Map, Value};

use crate::error::JournalError;
use crate::record::{DateRange, Record, RecordId, RecordKind};

/// Durable, type-tagged record storage.
///
/// One logical store holds every record type together. Reads are always
/// fresh - there is no cache to go stale - so every call reflects the most
/// recently completed write. Mutations rewrite the whole store through the
/// implementation's durability mechanism; there is no sub-store
/// transaction, and two concurrent read-modify-write cycles race at
/// whole-store granularity (last writer wins).
pub trait Journal {
    /// Append one newly created record.
    fn append(&mut self, record: Record) -> Result<(), JournalError>;

    /// Every record currently stored, in journal order. Malformed entries
    /// are skipped, never fatal: availability of historical data wins over
    /// strictness.
    fn read_all(&self) -> Result<Vec<Record>, JournalError>;

    /// Pure filter over [`Journal::read_all`].
    fn list(
        &self,
        kind: Option<RecordKind>,
        range: Option<DateRange>,
    ) -> Result<Vec<Record>, JournalError> {
        let records = self.read_all()?;
        Ok(records
            .into_iter()
            .filter(|r| kind.is_none_or(|k| r.kind() == k))
            .filter(|r| range.as_ref().is_none_or(|span| span.contains(r.day())))
            .collect())
    }

    /// Merge `changes` field-by-field into the record with this id and
    /// rewrite the store. Unspecified fields are retained; `id` and `type`
    /// are immutable. `kind` optionally narrows the lookup as a defense
    /// against a cross-type id collision.
    fn update(
        &mut self,
        id: RecordId,
        kind: Option<RecordKind>,
        changes: &Map<String, Value>,
    ) -> Result<Record, JournalError>;

    /// Remove exactly one record and rewrite the store. There is no soft
    /// delete and no recovery without an external backup.
    fn delete(&mut self, id: RecordId) -> Result<(), JournalError>;
}
