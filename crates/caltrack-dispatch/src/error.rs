//! Dispatch errors

use caltrack_domain::{JournalError, PayloadError};
use caltrack_resolver::ResolveError;
use thiserror::Error;

/// Errors raised while executing or resuming a command.
///
/// Validation and unknown-type failures are fatal to the invocation with
/// zero side effects; a NotFound on a single-target mutation ends it with
/// no mutation. Bulk deletes never surface per-record failures here - they
/// are collected into the outcome instead.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The raw action label matched nothing in the vocabulary
    #[error("unrecognized action: {0}")]
    UnrecognizedAction(String),

    /// The command is structurally unusable for its action
    #[error("invalid command: {0}")]
    Invalid(String),

    /// No stored record matches the given target
    #[error("no record matches the given target")]
    NoMatch,

    /// A human selection was out of range or malformed; fatal, no retry
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The human declined a date confirmation, or supplied an unparsable
    /// override
    #[error("confirmation aborted: {0}")]
    ConfirmationAborted(String),

    /// Range or date-expression failure
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Entry payload failure
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Storage failure
    #[error(transparent)]
    Journal(#[from] JournalError),
}
