//! NDJSON file journal

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use caltrack_domain::{Journal, JournalError, Record, RecordId, RecordKind};
use serde_json::{Map, Value};
use tracing::warn;

/// File-backed journal: one JSON record per line.
///
/// The file is created lazily on the first append; a missing file reads as
/// an empty store. Blank and trailing lines are ignored and malformed
/// lines are skipped with a warning, so one bad line never makes the rest
/// of the history unreadable.
pub struct FileJournal {
    path: PathBuf,
}

impl FileJournal {
    /// Open a journal at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<(), JournalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Replace the whole journal atomically: write a sibling temp file,
    /// fsync it, then rename over the original so readers never observe a
    /// partially written store.
    fn rewrite(&self, records: &[Record]) -> Result<(), JournalError> {
        self.ensure_parent()?;
        let tmp = self.path.with_extension("tmp");
        let mut out = File::create(&tmp)?;
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        out.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Journal for FileJournal {
    fn append(&mut self, record: Record) -> Result<(), JournalError> {
        self.ensure_parent()?;
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        out.write_all(line.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Record>, JournalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let mut records = Vec::new();
        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Record>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = lineno + 1, error = %e, "skipping malformed journal line"),
            }
        }
        Ok(records)
    }

    fn update(
        &mut self,
        id: RecordId,
        kind: Option<RecordKind>,
        changes: &Map<String, Value>,
    ) -> Result<Record, JournalError> {
        let mut records = self.read_all()?;
        let index = crate::locate(&records, id, kind)?;
        let merged = records[index].merged(changes)?;
        records[index] = merged.clone();
        self.rewrite(&records)?;
        Ok(merged)
    }

    fn delete(&mut self, id: RecordId) -> Result<(), JournalError> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        let removed = before - records.len();
        if removed == 0 {
            return Err(JournalError::NotFound(id));
        }
        if removed > 1 {
            warn!(%id, removed, "duplicate record id removed more than one record");
        }
        self.rewrite(&records)
    }
}
