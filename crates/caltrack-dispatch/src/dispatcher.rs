//! CRUD dispatch over the journal

use caltrack_domain::{
    Action, ActivitySign, Command, DateRange, EntryDraft, Journal, PayloadError, Record, RecordId,
    RecordKind, Target,
};
use caltrack_resolver::{range, target, Resolution};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::DispatchError;
use crate::outcome::Outcome;
use crate::pending::{enumerate, Pending, PendingState, Prompt, Reply};

/// A dispatch step: finished, or blocked on exactly one human decision.
#[derive(Debug)]
pub enum Step {
    /// The command ran to completion
    Done(Outcome),
    /// A decision is pending; resume with the human's reply
    Pending(Pending),
}

/// Which records an update or delete may touch.
#[derive(Debug, Clone, Copy)]
enum Pool {
    Tracker,
    Weight,
}

/// Executes structured commands against a journal.
///
/// The anchor date (what "today" means) and the activity sign convention
/// are injected, so behavior is reproducible under test.
pub struct Dispatcher<'a, J: Journal> {
    journal: &'a mut J,
    anchor: NaiveDate,
    sign: ActivitySign,
}

impl<'a, J: Journal> Dispatcher<'a, J> {
    /// Create a dispatcher over the given journal.
    pub fn new(journal: &'a mut J, anchor: NaiveDate, sign: ActivitySign) -> Self {
        Self {
            journal,
            anchor,
            sign,
        }
    }

    /// Execute a command until it completes or needs a human decision.
    pub fn execute(&mut self, cmd: Command) -> Result<Step, DispatchError> {
        let action = Action::of_command(&cmd);
        debug!(?action, "dispatching command");
        match action {
            Action::Add | Action::AddWeight => self.add(cmd),
            Action::Read => self.read(cmd),
            Action::ReadWeight => self.read_weight(cmd),
            Action::Update => self.update(cmd, Pool::Tracker),
            Action::UpdateWeight => self.update(cmd, Pool::Weight),
            Action::Delete => self.delete(cmd, Pool::Tracker),
            Action::DeleteWeight => self.delete(cmd, Pool::Weight),
            Action::Unrecognized(raw) => Err(DispatchError::UnrecognizedAction(raw)),
        }
    }

    /// Resume a pending step with the human's reply.
    pub fn resume(&mut self, pending: Pending, reply: Reply) -> Result<Step, DispatchError> {
        match pending.state {
            PendingState::Add {
                added,
                current,
                rest,
            } => self.resume_add(added, current, rest, reply),
            PendingState::UpdatePick {
                candidates,
                kind,
                changes,
            } => self.resume_update(candidates, kind, changes, reply),
            PendingState::BulkDelete { ids } => self.resume_bulk_delete(ids, reply),
        }
    }

    // ---- add ----

    fn add(&mut self, cmd: Command) -> Result<Step, DispatchError> {
        let entries = match cmd.entries.as_deref() {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                return Err(DispatchError::Invalid(
                    "add requires at least one entry".to_string(),
                ))
            }
        };

        let mut drafts = Vec::with_capacity(entries.len());
        for value in entries {
            drafts.push(EntryDraft::from_value(value, self.anchor, self.sign)?);
        }

        // A date the user never stated ("today" was assumed) needs the same
        // confirmation as an explicitly requested one.
        if cmd.needs_confirmation || !cmd.explicit_time {
            return Ok(self.next_confirmation(Vec::new(), drafts));
        }

        let mut added = Vec::with_capacity(drafts.len());
        for draft in drafts {
            added.push(self.persist(draft)?);
        }
        Ok(Step::Done(Outcome::Added(added)))
    }

    fn next_confirmation(&self, added: Vec<Record>, mut queue: Vec<EntryDraft>) -> Step {
        if queue.is_empty() {
            return Step::Done(Outcome::Added(added));
        }
        let current = queue.remove(0);
        Step::Pending(Pending {
            prompt: Prompt::ConfirmDate {
                day: current.day(),
                label: current.label(),
            },
            state: PendingState::Add {
                added,
                current,
                rest: queue,
            },
        })
    }

    fn resume_add(
        &mut self,
        mut added: Vec<Record>,
        current: EntryDraft,
        rest: Vec<EntryDraft>,
        reply: Reply,
    ) -> Result<Step, DispatchError> {
        let draft = match reply {
            Reply::Confirm => current,
            Reply::Override(raw) => {
                let day = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                    DispatchError::ConfirmationAborted(format!(
                        "invalid date '{}', expected YYYY-MM-DD",
                        raw.trim()
                    ))
                })?;
                current.with_day(day)
            }
            Reply::Decline => {
                return Err(DispatchError::ConfirmationAborted(
                    "date rejected".to_string(),
                ))
            }
            Reply::Choice(_) => {
                return Err(DispatchError::InvalidSelection(
                    "a date confirmation expects yes, no, or a replacement date".to_string(),
                ))
            }
        };
        added.push(self.persist(draft)?);
        Ok(self.next_confirmation(added, rest))
    }

    fn persist(&mut self, draft: EntryDraft) -> Result<Record, DispatchError> {
        let record = draft.into_record(RecordId::new());
        self.journal.append(record.clone())?;
        Ok(record)
    }

    // ---- read ----

    fn read(&mut self, cmd: Command) -> Result<Step, DispatchError> {
        let kind = parse_target_kind(cmd.target.as_ref().and_then(|t| t.kind.as_deref()))?;
        let pool: Vec<Record> = self
            .journal
            .read_all()?
            .into_iter()
            .filter(|r| match kind {
                Some(k) => r.kind() == k,
                None => r.kind().is_tracker(),
            })
            .collect();

        let span = if let Some(spec) = &cmd.range {
            Some(range::resolve_range(spec, self.anchor)?)
        } else if let Some(expr) = cmd.target.as_ref().and_then(|t| t.date.as_deref()) {
            Some(range::resolve_date_expr(expr, self.anchor)?)
        } else {
            // Fall back to the full span over every dated record; an empty
            // pool must surface explicitly, never as an empty-span success.
            let mut days = pool.iter().map(Record::day);
            let first = match days.next() {
                Some(first) => first,
                None => return Ok(Step::Done(Outcome::NoDatedEntries)),
            };
            let (start, end) = days.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
            Some(DateRange { start, end })
        };

        let records = pool
            .into_iter()
            .filter(|r| span.as_ref().is_none_or(|s| s.contains(r.day())))
            .collect();
        Ok(Step::Done(Outcome::Entries { records, span }))
    }

    fn read_weight(&mut self, cmd: Command) -> Result<Step, DispatchError> {
        let span = if let Some(spec) = &cmd.range {
            Some(range::resolve_range(spec, self.anchor)?)
        } else if let Some(expr) = cmd.target.as_ref().and_then(|t| t.date.as_deref()) {
            Some(range::resolve_date_expr(expr, self.anchor)?)
        } else {
            None
        };
        let records = self.journal.list(Some(RecordKind::Weight), span)?;
        Ok(Step::Done(Outcome::Entries { records, span }))
    }

    // ---- update ----

    fn update(&mut self, cmd: Command, pool: Pool) -> Result<Step, DispatchError> {
        let changes = cmd.set.clone().ok_or_else(|| {
            DispatchError::Invalid("update requires a 'set' map of field changes".to_string())
        })?;
        let target = cmd.target.clone().unwrap_or_default();
        let kind = narrow_kind(&target, pool)?;
        let day = target
            .date
            .as_deref()
            .map(|expr| range::parse_day_phrase(expr, self.anchor))
            .transpose()?;

        let candidates = self.candidates(kind, pool)?;
        match target::resolve(&target, candidates, day)? {
            Resolution::ById(id) => {
                let updated = self.journal.update(id, kind, &changes)?;
                Ok(Step::Done(Outcome::Updated(updated)))
            }
            Resolution::One(record) => {
                let updated = self.journal.update(record.id(), kind, &changes)?;
                Ok(Step::Done(Outcome::Updated(updated)))
            }
            Resolution::Many(matches) => Ok(Step::Pending(Pending {
                prompt: Prompt::PickCandidate {
                    candidates: enumerate(&matches),
                },
                state: PendingState::UpdatePick {
                    candidates: matches,
                    kind,
                    changes,
                },
            })),
            Resolution::NoMatch => Err(DispatchError::NoMatch),
        }
    }

    fn resume_update(
        &mut self,
        candidates: Vec<Record>,
        kind: Option<RecordKind>,
        changes: Map<String, Value>,
        reply: Reply,
    ) -> Result<Step, DispatchError> {
        let choice = match reply {
            Reply::Choice(choice) => choice,
            _ => {
                return Err(DispatchError::InvalidSelection(
                    "a candidate pick expects a 1-based index".to_string(),
                ))
            }
        };
        if choice == 0 || choice > candidates.len() {
            return Err(DispatchError::InvalidSelection(format!(
                "{} is out of range 1..={}",
                choice,
                candidates.len()
            )));
        }
        let record = &candidates[choice - 1];
        let updated = self.journal.update(record.id(), kind, &changes)?;
        Ok(Step::Done(Outcome::Updated(updated)))
    }

    // ---- delete ----

    fn delete(&mut self, cmd: Command, pool: Pool) -> Result<Step, DispatchError> {
        let target = cmd.target.clone().unwrap_or_default();

        if let Some(raw) = &target.id {
            let id = RecordId::parse(raw).map_err(DispatchError::Invalid)?;
            self.journal.delete(id)?;
            return Ok(Step::Done(Outcome::Deleted(id)));
        }

        // Bulk path: a record type and an exact date together enumerate the
        // batch; anything less is refused with an explanation.
        let kind = narrow_kind(&target, pool)?;
        let (kind, expr) = match (kind, &target.date) {
            (Some(kind), Some(expr)) => (kind, expr.as_str()),
            _ => {
                return Err(DispatchError::Invalid(
                    "delete needs a record id, or a record type and a date".to_string(),
                ))
            }
        };

        let day = range::parse_day_phrase(expr, self.anchor)?;
        let matches = self
            .journal
            .list(Some(kind), Some(DateRange::single(day)))?;
        if matches.is_empty() {
            return Err(DispatchError::NoMatch);
        }
        let ids = matches.iter().map(Record::id).collect();
        Ok(Step::Pending(Pending {
            prompt: Prompt::ConfirmBulkDelete {
                candidates: enumerate(&matches),
            },
            state: PendingState::BulkDelete { ids },
        }))
    }

    fn resume_bulk_delete(
        &mut self,
        ids: Vec<RecordId>,
        reply: Reply,
    ) -> Result<Step, DispatchError> {
        match reply {
            Reply::Confirm => {
                let mut deleted = 0;
                let mut failed = Vec::new();
                for id in ids {
                    match self.journal.delete(id) {
                        Ok(()) => deleted += 1,
                        // Best effort: report and keep going
                        Err(e) => failed.push((id, e.to_string())),
                    }
                }
                Ok(Step::Done(Outcome::BulkDeleted { deleted, failed }))
            }
            Reply::Decline => Ok(Step::Done(Outcome::Cancelled)),
            _ => Err(DispatchError::InvalidSelection(
                "a bulk delete expects yes or no".to_string(),
            )),
        }
    }

    fn candidates(&self, kind: Option<RecordKind>, pool: Pool) -> Result<Vec<Record>, DispatchError> {
        Ok(self
            .journal
            .read_all()?
            .into_iter()
            .filter(|r| match kind {
                Some(k) => r.kind() == k,
                None => match pool {
                    Pool::Tracker => r.kind().is_tracker(),
                    Pool::Weight => r.kind() == RecordKind::Weight,
                },
            })
            .collect())
    }
}

/// Parse an optional raw type tag; outside the vocabulary is an
/// UnknownType failure, absence is no narrowing.
fn parse_target_kind(kind: Option<&str>) -> Result<Option<RecordKind>, DispatchError> {
    match kind {
        Some(raw) => RecordKind::parse(raw)
            .map(Some)
            .ok_or_else(|| PayloadError::UnknownType(raw.to_string()).into()),
        None => Ok(None),
    }
}

/// The kind a mutation is narrowed to: weight pools are always weight,
/// tracker pools narrow by the target's type when it names one.
fn narrow_kind(target: &Target, pool: Pool) -> Result<Option<RecordKind>, DispatchError> {
    match pool {
        Pool::Weight => Ok(Some(RecordKind::Weight)),
        Pool::Tracker => parse_target_kind(target.kind.as_deref()),
    }
}
