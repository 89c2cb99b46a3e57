//! The module contains the `Record` type, the single entity kept by the engine.
//!
//! Expenses and income are both records: the sign of the amount tells them apart.
use chrono::{DateTime, NaiveDate};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// Represent a stored financial record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Opaque identifier, assigned at insert time.
    pub id: String,
    pub name: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub notes: String,
    /// Public URL of the uploaded attachment, empty when there is none.
    pub attachment: String,
}

/// Every field of a record except the id.
///
/// Used as payload of both insert and update: an update replaces all of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordFields {
    pub name: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub notes: String,
    pub attachment: String,
}

impl Record {
    pub(crate) fn new(fields: RecordFields) -> Self {
        Self::with_id(new_record_id(), fields)
    }

    pub(crate) fn with_id(id: String, fields: RecordFields) -> Self {
        Self {
            id,
            name: fields.name,
            amount: fields.amount,
            date: fields.date,
            notes: fields.notes,
            attachment: fields.attachment,
        }
    }

    /// Returns `true` when `needle` (already lowercase) is contained in the
    /// name or the notes, ignoring case.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.notes.to_lowercase().contains(needle)
    }
}

/// Generates a new record id.
///
/// UUIDv7: millisecond timestamp followed by random bits, so two ids minted
/// in the same instant still differ.
fn new_record_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// Parses a record date.
///
/// Accepts a calendar date (`2024-01-05`) or an RFC 3339 timestamp
/// (`2024-01-05T10:00:00+01:00`), keeping the date as written by the caller.
pub fn parse_date(input: &str) -> ResultEngine<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidArgument("date is required".to_string()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| EngineError::InvalidArgument(format!("invalid date: {trimmed}")))
}
