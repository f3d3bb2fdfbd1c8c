//! Record module - the closed vocabulary of persisted tracker data

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Unique identifier for a journal record, backed by UUIDv7.
///
/// UUIDv7 provides:
/// - Chronological sortability, so ids follow journal order
/// - 128-bit uniqueness across every record type without coordination,
///   which makes a cross-type id collision unconstructable in practice
/// - RFC 9562-standard format with broad ecosystem support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(uuid::Uuid);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use caltrack_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert_eq!(id.to_string().len(), 36);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a RecordId from its canonical hyphenated string form
    pub fn parse(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("invalid record id '{}': {}", s, e))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed vocabulary of record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A food entry
    Food,
    /// An activity entry
    Activity,
    /// A fluid-intake entry
    Fluid,
    /// A body-weight record
    Weight,
}

impl RecordKind {
    /// Parse a raw type tag. Anything outside the vocabulary is `None`;
    /// the caller decides whether that is an UnknownType failure.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "activity" => Some(Self::Activity),
            "fluid" => Some(Self::Fluid),
            "weight" => Some(Self::Weight),
            _ => None,
        }
    }

    /// True for the tracker types (everything except weight).
    pub fn is_tracker(self) -> bool {
        !matches!(self, Self::Weight)
    }

    /// The type tag as persisted in the journal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Activity => "activity",
            Self::Fluid => "fluid",
            Self::Weight => "weight",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meal categories for food entries.
///
/// Serialized with the journal's historical spellings, spaces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meal {
    /// Breakfast
    #[serde(rename = "breakfast")]
    Breakfast,
    /// Brunch
    #[serde(rename = "brunch")]
    Brunch,
    /// Lunch
    #[serde(rename = "lunch")]
    Lunch,
    /// Afternoon snack
    #[serde(rename = "afternoon snack")]
    AfternoonSnack,
    /// Dinner
    #[serde(rename = "dinner")]
    Dinner,
    /// Late snack
    #[serde(rename = "late snack")]
    LateSnack,
    /// Late night snack
    #[serde(rename = "late night snack")]
    LateNightSnack,
}

impl Meal {
    /// Parse a meal category, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "brunch" => Some(Self::Brunch),
            "lunch" => Some(Self::Lunch),
            "afternoon snack" => Some(Self::AfternoonSnack),
            "dinner" => Some(Self::Dinner),
            "late snack" => Some(Self::LateSnack),
            "late night snack" => Some(Self::LateNightSnack),
            _ => None,
        }
    }

    /// The category as persisted in the journal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Brunch => "brunch",
            Self::Lunch => "lunch",
            Self::AfternoonSnack => "afternoon snack",
            Self::Dinner => "dinner",
            Self::LateSnack => "late snack",
            Self::LateNightSnack => "late night snack",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved inclusive calendar-day span.
///
/// A single-day intent always resolves with `start == end`. An inverted
/// span (`start > end`) is carried as data; it contains no days, so
/// filtering on it yields an empty result rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the span, inclusive
    pub start: NaiveDate,
    /// Last day of the span, inclusive
    pub end: NaiveDate,
}

impl DateRange {
    /// Span covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// Whether the day falls inside the span.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// A record - one persisted unit of tracked data.
///
/// Serialized as a single JSON object per journal line, tagged by `type`.
/// The id is assigned once at creation and never changes; `update` merges
/// fields in place and `delete` removes permanently (no soft delete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    /// A meal or snack that was eaten
    Food {
        /// Unique identifier
        id: RecordId,
        /// Calendar day the food was eaten
        date: NaiveDate,
        /// Meal category
        meal: Meal,
        /// What was eaten
        description: String,
        /// Calories taken in
        kcal: u32,
    },
    /// Physical activity that burned calories
    Activity {
        /// Unique identifier
        id: RecordId,
        /// Calendar day of the activity
        date: NaiveDate,
        /// What was done
        description: String,
        /// Calories burned; the stored sign follows the configured
        /// `ActivitySign` convention
        kcal_burned: i32,
    },
    /// Fluid intake
    Fluid {
        /// Unique identifier
        id: RecordId,
        /// Calendar day of the intake
        date: NaiveDate,
        /// What was drunk
        description: String,
        /// Volume in milliliters
        volume_ml: u32,
    },
    /// A body-weight measurement
    Weight {
        /// Unique identifier
        id: RecordId,
        /// Full timestamp of the measurement
        ts: DateTime<Utc>,
        /// Weight in kilograms
        kg: f64,
    },
}

impl Record {
    /// The record's id.
    pub fn id(&self) -> RecordId {
        match self {
            Self::Food { id, .. }
            | Self::Activity { id, .. }
            | Self::Fluid { id, .. }
            | Self::Weight { id, .. } => *id,
        }
    }

    /// The record's type tag.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Food { .. } => RecordKind::Food,
            Self::Activity { .. } => RecordKind::Activity,
            Self::Fluid { .. } => RecordKind::Fluid,
            Self::Weight { .. } => RecordKind::Weight,
        }
    }

    /// The calendar day this record belongs to (the UTC day of the
    /// measurement timestamp for weight records).
    pub fn day(&self) -> NaiveDate {
        match self {
            Self::Food { date, .. } | Self::Activity { date, .. } | Self::Fluid { date, .. } => {
                *date
            }
            Self::Weight { ts, .. } => ts.date_naive(),
        }
    }

    /// The free-form description, when the type has one.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Food { description, .. }
            | Self::Activity { description, .. }
            | Self::Fluid { description, .. } => Some(description),
            Self::Weight { .. } => None,
        }
    }

    /// Short human label: the description, or the kilogram value for
    /// weight records.
    pub fn label(&self) -> String {
        match self {
            Self::Food { description, .. }
            | Self::Activity { description, .. }
            | Self::Fluid { description, .. } => description.clone(),
            Self::Weight { kg, .. } => format!("{:.1} kg", kg),
        }
    }

    /// Field-by-field merge: every key in `changes` overwrites the matching
    /// field, unspecified fields are retained. `id` and `type` are immutable
    /// and silently skipped. A merge that produces an invalid record (wrong
    /// field type, unknown meal, ...) fails without mutating anything.
    pub fn merged(&self, changes: &Map<String, Value>) -> Result<Record, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut value {
            for (key, new_value) in changes {
                if key == "id" || key == "type" {
                    warn!(field = %key, "ignoring change to immutable record field");
                    continue;
                }
                fields.insert(key.clone(), new_value.clone());
            }
        }
        serde_json::from_value(value)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: merging an empty change map is the identity.
        #[test]
        fn test_empty_merge_is_identity(kcal in 0u32..10000, description in ".{0,40}") {
            let record = Record::Food {
                id: RecordId::new(),
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                meal: Meal::Dinner,
                description,
                kcal,
            };
            let merged = record.merged(&Map::new()).unwrap();
            prop_assert_eq!(merged, record);
        }

        /// Property: every record survives a journal-line round trip.
        #[test]
        fn test_journal_line_round_trip(kcal_burned in -10000i32..10000, description in ".{0,40}") {
            let record = Record::Activity {
                id: RecordId::new(),
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                description,
                kcal_burned,
            };
            let line = serde_json::to_string(&record).unwrap();
            let back: Record = serde_json::from_str(&line).unwrap();
            prop_assert_eq!(back, record);
        }

        /// Property: a single-day span contains exactly its own day.
        #[test]
        fn test_single_day_span(offset in 0u32..20000, probe in 0u32..20000) {
            let epoch = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
            let day = epoch + chrono::Days::new(offset as u64);
            let other = epoch + chrono::Days::new(probe as u64);
            let range = DateRange::single(day);
            prop_assert_eq!(range.contains(other), day == other);
        }
    }
}
