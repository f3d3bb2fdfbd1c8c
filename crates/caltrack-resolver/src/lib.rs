//! Caltrack Resolvers
//!
//! Two pure resolution steps sit between the normalized command and the
//! journal: the range resolver turns date and date-span expressions into an
//! inclusive calendar-day pair, and the target resolver narrows a candidate
//! set down to the record(s) an update or delete refers to.

pub mod range;
pub mod target;

pub use range::{parse_day_phrase, resolve_date_expr, resolve_range, ResolveError};
pub use target::{resolve, Resolution};
