//! Payload normalization - the single boundary where shape-shifting entry
//! JSON becomes the closed record vocabulary
//!
//! Downstream code never branches on payload shape; it sees typed drafts
//! or a `PayloadError`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PayloadError;
use crate::record::{Meal, Record, RecordId, RecordKind};

/// Stored sign convention for activity calories.
///
/// Historical journals disagree on whether burned calories are stored as a
/// positive magnitude or a negative delta, so the convention is explicit
/// configuration rather than an assumption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivitySign {
    /// Burned calories stored as a positive magnitude
    #[default]
    Positive,
    /// Burned calories stored negated
    Negative,
}

impl ActivitySign {
    /// Apply the convention to a raw, non-negative burned-calorie count.
    pub fn apply(self, kcal_burned: u32) -> i32 {
        match self {
            Self::Positive => kcal_burned as i32,
            Self::Negative => -(kcal_burned as i32),
        }
    }
}

/// A typed entry payload, normalized but not yet persisted.
///
/// Drafts carry no id; the add path assigns one at creation time, and it
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryDraft {
    /// A food entry awaiting persistence
    Food {
        /// Calendar day
        date: NaiveDate,
        /// Meal category
        meal: Meal,
        /// What was eaten
        description: String,
        /// Calories taken in
        kcal: u32,
    },
    /// An activity entry awaiting persistence
    Activity {
        /// Calendar day
        date: NaiveDate,
        /// What was done
        description: String,
        /// Calories burned, already in the configured sign convention
        kcal_burned: i32,
    },
    /// A fluid entry awaiting persistence
    Fluid {
        /// Calendar day
        date: NaiveDate,
        /// What was drunk
        description: String,
        /// Volume in milliliters
        volume_ml: u32,
    },
    /// A weight record awaiting persistence
    Weight {
        /// Measurement timestamp
        ts: DateTime<Utc>,
        /// Weight in kilograms
        kg: f64,
    },
}

impl EntryDraft {
    /// Normalize one untyped payload object.
    ///
    /// `today` fills in a missing date (the assumed-today case the
    /// confirmation flow exists for); `sign` fixes the stored direction of
    /// activity calories.
    pub fn from_value(
        value: &Value,
        today: NaiveDate,
        sign: ActivitySign,
    ) -> Result<Self, PayloadError> {
        let fields = value
            .as_object()
            .ok_or_else(|| PayloadError::Invalid("entry is not a JSON object".to_string()))?;

        let tag = fields
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| PayloadError::Invalid("entry is missing 'type'".to_string()))?;
        let kind = RecordKind::parse(tag)
            .ok_or_else(|| PayloadError::UnknownType(tag.to_string()))?;

        match kind {
            RecordKind::Food => Ok(Self::Food {
                date: date_field(fields, today)?,
                meal: meal_field(fields)?,
                description: str_field(fields, "description")?,
                kcal: count_field(fields, "kcal")?,
            }),
            RecordKind::Activity => Ok(Self::Activity {
                date: date_field(fields, today)?,
                description: str_field(fields, "description")?,
                kcal_burned: sign.apply(count_field(fields, "kcal_burned")?),
            }),
            RecordKind::Fluid => Ok(Self::Fluid {
                date: date_field(fields, today)?,
                description: str_field(fields, "description")?,
                volume_ml: count_field(fields, "volume_ml")?,
            }),
            RecordKind::Weight => Ok(Self::Weight {
                ts: ts_field(fields, today)?,
                kg: kg_field(fields)?,
            }),
        }
    }

    /// The calendar day the draft refers to.
    pub fn day(&self) -> NaiveDate {
        match self {
            Self::Food { date, .. } | Self::Activity { date, .. } | Self::Fluid { date, .. } => {
                *date
            }
            Self::Weight { ts, .. } => ts.date_naive(),
        }
    }

    /// Move the draft to a different day (a confirmed date override).
    /// Weight drafts keep their time of day.
    pub fn with_day(self, day: NaiveDate) -> Self {
        match self {
            Self::Food {
                meal,
                description,
                kcal,
                ..
            } => Self::Food {
                date: day,
                meal,
                description,
                kcal,
            },
            Self::Activity {
                description,
                kcal_burned,
                ..
            } => Self::Activity {
                date: day,
                description,
                kcal_burned,
            },
            Self::Fluid {
                description,
                volume_ml,
                ..
            } => Self::Fluid {
                date: day,
                description,
                volume_ml,
            },
            Self::Weight { ts, kg } => Self::Weight {
                ts: Utc.from_utc_datetime(&day.and_time(ts.time())),
                kg,
            },
        }
    }

    /// Short human label used in confirmation prompts.
    pub fn label(&self) -> String {
        match self {
            Self::Food { description, .. }
            | Self::Activity { description, .. }
            | Self::Fluid { description, .. } => description.clone(),
            Self::Weight { kg, .. } => format!("{:.1} kg", kg),
        }
    }

    /// Attach a freshly assigned id, producing the persistable record.
    pub fn into_record(self, id: RecordId) -> Record {
        match self {
            Self::Food {
                date,
                meal,
                description,
                kcal,
            } => Record::Food {
                id,
                date,
                meal,
                description,
                kcal,
            },
            Self::Activity {
                date,
                description,
                kcal_burned,
            } => Record::Activity {
                id,
                date,
                description,
                kcal_burned,
            },
            Self::Fluid {
                date,
                description,
                volume_ml,
            } => Record::Fluid {
                id,
                date,
                description,
                volume_ml,
            },
            Self::Weight { ts, kg } => Record::Weight { id, ts, kg },
        }
    }
}

fn str_field(fields: &Map<String, Value>, name: &str) -> Result<String, PayloadError> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PayloadError::Invalid(format!("missing or invalid '{}'", name)))
}

fn count_field(fields: &Map<String, Value>, name: &str) -> Result<u32, PayloadError> {
    let raw = fields
        .get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| PayloadError::Invalid(format!("missing or invalid '{}'", name)))?;
    u32::try_from(raw)
        .map_err(|_| PayloadError::Invalid(format!("'{}' must be a non-negative integer", name)))
}

fn meal_field(fields: &Map<String, Value>) -> Result<Meal, PayloadError> {
    let raw = str_field(fields, "meal")?;
    Meal::parse(&raw).ok_or_else(|| PayloadError::Invalid(format!("unknown meal category: {}", raw)))
}

fn kg_field(fields: &Map<String, Value>) -> Result<f64, PayloadError> {
    let kg = fields
        .get("kg")
        .and_then(Value::as_f64)
        .ok_or_else(|| PayloadError::Invalid("missing or invalid 'kg'".to_string()))?;
    if !kg.is_finite() || kg < 0.0 {
        return Err(PayloadError::Invalid(
            "'kg' must be a non-negative number".to_string(),
        ));
    }
    Ok(kg)
}

fn date_field(fields: &Map<String, Value>, today: NaiveDate) -> Result<NaiveDate, PayloadError> {
    match fields.get("date").and_then(Value::as_str) {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| PayloadError::Invalid(format!("invalid date '{}', expected YYYY-MM-DD", raw))),
        None => Ok(today),
    }
}

fn ts_field(fields: &Map<String, Value>, today: NaiveDate) -> Result<DateTime<Utc>, PayloadError> {
    if let Some(raw) = fields.get("ts").and_then(Value::as_str) {
        return DateTime::parse_from_rfc3339(raw.trim())
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|_| PayloadError::Invalid(format!("invalid timestamp '{}'", raw)));
    }
    // Fall back to the entry's date (or the assumed today) at midnight
    let day = date_field(fields, today)?;
    Ok(Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN)))
}
