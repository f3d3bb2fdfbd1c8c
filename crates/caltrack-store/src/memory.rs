//! In-memory journal

use caltrack_domain::{Journal, JournalError, Record, RecordId, RecordKind};
use serde_json::{Map, Value};

/// Vec-backed `Journal` with the same contract as the file store.
///
/// The substitute implementation the dispatcher tests run against; also
/// handy for dry runs.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    records: Vec<Record>,
}

impl MemoryJournal {
    /// An empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// A journal seeded with records.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl Journal for MemoryJournal {
    fn append(&mut self, record: Record) -> Result<(), JournalError> {
        self.records.push(record);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Record>, JournalError> {
        Ok(self.records.clone())
    }

    fn update(
        &mut self,
        id: RecordId,
        kind: Option<RecordKind>,
        changes: &Map<String, Value>,
    ) -> Result<Record, JournalError> {
        let index = crate::locate(&self.records, id, kind)?;
        let merged = self.records[index].merged(changes)?;
        self.records[index] = merged.clone();
        Ok(merged)
    }

    fn delete(&mut self, id: RecordId) -> Result<(), JournalError> {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == before {
            return Err(JournalError::NotFound(id));
        }
        Ok(())
    }
}
