//! Caltrack Domain Layer
//!
//! This crate contains the core model for the tracker: the closed `Record`
//! vocabulary persisted in the journal, the structured `Command` consumed
//! from the external translator, one-shot payload normalization, the action
//! normalizer, and the `Journal` trait that storage crates implement.
//!
//! ## Key Concepts
//!
//! - **Record**: one persisted unit of tracked data (food, activity, fluid,
//!   or weight), tagged by type
//! - **Command**: an ephemeral, already-structured request; free-form
//!   language never reaches this crate
//! - **Canonical action**: the fixed dispatch verb a raw action label folds
//!   into
//! - **Journal**: the durable newline-delimited-record store, exposed as a
//!   trait so tests can substitute an in-memory implementation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod command;
pub mod error;
pub mod payload;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use action::Action;
pub use command::{Command, RangeSpec, Target};
pub use error::{JournalError, PayloadError};
pub use payload::{ActivitySign, EntryDraft};
pub use record::{DateRange, Meal, Record, RecordId, RecordKind};
pub use traits::Journal;
