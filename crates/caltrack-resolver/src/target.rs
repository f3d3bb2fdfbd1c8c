//! Target disambiguation over a candidate set
//!
//! Qualifier priority: explicit id (no search), exact calendar day,
//! case-insensitive substring, then everything. Zero matches is a
//! "no match" failure; several matches hand the enumerated set back for
//! exactly one human selection.

use caltrack_domain::{Record, RecordId, Target};
use chrono::NaiveDate;

use crate::range::ResolveError;

/// Outcome of narrowing a candidate set against a target.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// An explicit id was given; use it directly, no search
    ById(RecordId),
    /// Exactly one candidate matched
    One(Record),
    /// Multiple candidates matched; a human must pick exactly one
    Many(Vec<Record>),
    /// Nothing matched
    NoMatch,
}

/// Resolve a target against candidates.
///
/// `day` is the already-resolved calendar day of the target's date
/// expression, when it has one; date equality always compares whole days.
pub fn resolve(
    target: &Target,
    candidates: Vec<Record>,
    day: Option<NaiveDate>,
) -> Result<Resolution, ResolveError> {
    if let Some(raw) = &target.id {
        let id = RecordId::parse(raw).map_err(ResolveError::BadId)?;
        return Ok(Resolution::ById(id));
    }

    let mut matches = candidates;
    if let Some(day) = day {
        matches.retain(|r| r.day() == day);
    } else if let Some(needle) = &target.contains {
        let needle = needle.to_lowercase();
        matches.retain(|r| {
            r.description()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
        });
    }

    Ok(match matches.len() {
        0 => Resolution::NoMatch,
        1 => Resolution::One(matches.remove(0)),
        _ => Resolution::Many(matches),
    })
}
