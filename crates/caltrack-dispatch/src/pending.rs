//! Pending human decisions

use caltrack_domain::{EntryDraft, Record, RecordId, RecordKind};
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// One enumerable candidate shown to the human.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// 1-based index used for selection
    pub index: usize,
    /// Calendar day of the record
    pub day: NaiveDate,
    /// Key value: the description, or formatted kilograms for weights
    pub label: String,
    /// Record id
    pub id: RecordId,
}

/// What the human is being asked.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    /// Confirm an assumed or fuzzy date before an entry is persisted
    ConfirmDate {
        /// The resolved day awaiting confirmation
        day: NaiveDate,
        /// Short label for the entry being confirmed
        label: String,
    },
    /// Pick exactly one of several matching records
    PickCandidate {
        /// The enumerated matches, 1-indexed
        candidates: Vec<Candidate>,
    },
    /// Approve deleting the whole enumerated batch with one yes/no
    ConfirmBulkDelete {
        /// Every record the batch would remove
        candidates: Vec<Candidate>,
    },
}

/// The human's reply to a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Yes / proceed
    Confirm,
    /// No / abort the pending decision
    Decline,
    /// Replacement date for a declined date confirmation (YYYY-MM-DD)
    Override(String),
    /// 1-based candidate selection
    Choice(usize),
}

/// A suspended dispatch awaiting exactly one human reply.
#[derive(Debug)]
pub struct Pending {
    /// The question to put to the human
    pub prompt: Prompt,
    pub(crate) state: PendingState,
}

/// Private resume state. Everything needed to continue lives here, so the
/// dispatcher itself stays stateless between steps.
#[derive(Debug)]
pub(crate) enum PendingState {
    /// Mid-add: `added` is already persisted, `current` awaits its date
    /// confirmation, `rest` still queues behind it
    Add {
        added: Vec<Record>,
        current: EntryDraft,
        rest: Vec<EntryDraft>,
    },
    /// An ambiguous update awaiting a candidate pick
    UpdatePick {
        candidates: Vec<Record>,
        kind: Option<RecordKind>,
        changes: Map<String, Value>,
    },
    /// An enumerated batch delete awaiting one yes/no
    BulkDelete { ids: Vec<RecordId> },
}

pub(crate) fn enumerate(records: &[Record]) -> Vec<Candidate> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| Candidate {
            index: i + 1,
            day: r.day(),
            label: r.label(),
            id: r.id(),
        })
        .collect()
}
