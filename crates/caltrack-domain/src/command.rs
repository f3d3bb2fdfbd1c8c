//! Structured command input from the external translator
//!
//! Translating free-form language into this shape is an external service
//! boundary; the core only ever consumes an already-structured value.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Which existing record(s) an update or delete refers to.
///
/// Qualifiers are tried in priority order: id, date, contains, type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Target {
    /// Explicit record id; used directly, no search
    #[serde(default)]
    pub id: Option<String>,
    /// A date expression, matched by exact calendar-day equality
    #[serde(default)]
    pub date: Option<String>,
    /// Case-insensitive substring matched against descriptions
    #[serde(default)]
    pub contains: Option<String>,
    /// Record type narrowing ("food", "activity", "fluid", "weight")
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A raw, unresolved date range.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeSpec {
    /// Discriminator: "relative" or "absolute"
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw expression, e.g. "yesterday" or "2025-01-01..2025-05-01"
    pub value: String,
}

/// An ephemeral, structured command.
///
/// Entry payloads arrive untyped because the translator's shapes shift;
/// they are normalized exactly once, at the dispatch boundary, into the
/// closed record vocabulary.
#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    /// Raw action label, normalized by [`crate::Action`]
    pub action: String,
    /// Optional update/delete target
    #[serde(default)]
    pub target: Option<Target>,
    /// Optional entry payloads for add
    #[serde(default)]
    pub entries: Option<Vec<Value>>,
    /// Whether the human must confirm resolved dates before persisting
    #[serde(default)]
    pub needs_confirmation: bool,
    /// Optional raw date range
    #[serde(default)]
    pub range: Option<RangeSpec>,
    /// Optional display selector, passed through to presentation
    #[serde(default)]
    pub format: Option<String>,
    /// Optional field-merge map for updates
    #[serde(default)]
    pub set: Option<Map<String, Value>>,
    /// False when "today" was assumed rather than stated
    #[serde(default)]
    pub explicit_time: bool,
}
