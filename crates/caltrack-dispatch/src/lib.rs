//! Caltrack CRUD Dispatcher
//!
//! Orchestrates the action normalizer, the range and target resolvers, and
//! the journal store to execute add/read/update/delete.
//!
//! Interactive confirmation and disambiguation are not performed here:
//! whenever a human has to decide something, [`Dispatcher::execute`]
//! returns a [`Step::Pending`] carrying the candidate set, and the caller
//! resumes with the human's [`Reply`]. That keeps the dispatcher testable
//! without a terminal and leaves the door open for a non-interactive mode.

mod dispatcher;
mod error;
mod outcome;
mod pending;

pub use dispatcher::{Dispatcher, Step};
pub use error::DispatchError;
pub use outcome::Outcome;
pub use pending::{Candidate, Pending, Prompt, Reply};
