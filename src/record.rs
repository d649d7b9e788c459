//! Core data types for Turnout
//!
//! This module defines the values the rest of the crate passes around:
//! - `Record`: one PPE cleaning event, immutable once created
//! - `RecordDraft`: raw Add-form input, validated into a `Record`
//! - `Field`: the required text fields of a draft

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Format used for the human-readable `date` column (e.g. `10/18/2026`).
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// A single PPE cleaning event
///
/// Serialized with the wire names used by the remote document
/// (`cleanedBy` rather than `cleaned_by`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Firefighter name
    pub name: String,
    /// Last digits of the equipment serial number
    pub serial: String,
    /// PPE item(s) cleaned
    pub item: String,
    /// Who performed the cleaning
    pub cleaned_by: String,
    /// Advanced inspection completed
    #[serde(default)]
    pub inspection: bool,
    /// Local date at creation, formatted with [`DATE_FORMAT`]
    pub date: String,
    /// Unix timestamp in milliseconds at creation
    pub timestamp: i64,
}

impl Record {
    /// Create a record stamped with the current local time
    pub fn new(
        name: impl Into<String>,
        serial: impl Into<String>,
        item: impl Into<String>,
        cleaned_by: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            serial: serial.into(),
            item: item.into(),
            cleaned_by: cleaned_by.into(),
            inspection: false,
            date: String::new(),
            timestamp: 0,
        }
        .created_at(&Local::now())
    }

    /// Builder method: mark the advanced inspection as done (or not)
    pub fn inspection(mut self, done: bool) -> Self {
        self.inspection = done;
        self
    }

    /// Builder method: stamp `date` and `timestamp` from a moment in time
    pub fn created_at<Tz: TimeZone>(mut self, moment: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        self.date = moment.format(DATE_FORMAT).to_string();
        self.timestamp = moment.timestamp_millis();
        self
    }

    /// Case-insensitive substring match on `name` or `serial`.
    ///
    /// `needle` must already be lowercase; see [`crate::store::Store::search`].
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.serial.to_lowercase().contains(needle)
    }

    /// Glyph shown for the inspection column
    pub fn inspection_glyph(&self) -> &'static str {
        if self.inspection {
            "✅"
        } else {
            "❌"
        }
    }
}

/// Required text fields of the Add form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Serial,
    Item,
    CleanedBy,
}

impl Field {
    /// All required fields, in form order
    pub fn all() -> &'static [Field] {
        &[Field::Name, Field::Serial, Field::Item, Field::CleanedBy]
    }

    /// Placeholder text shown on the form
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Firefighter Name",
            Field::Serial => "Last 4 digits of Serial #",
            Field::Item => "PPE Item(s)",
            Field::CleanedBy => "Cleaned By",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Serial => write!(f, "serial"),
            Field::Item => write!(f, "item"),
            Field::CleanedBy => write!(f, "cleanedBy"),
        }
    }
}

/// Raw Add-form input
///
/// Nothing here is trusted: text may be blank or padded with whitespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordDraft {
    pub name: String,
    pub serial: String,
    pub item: String,
    pub cleaned_by: String,
    pub inspection: bool,
}

impl RecordDraft {
    /// Value of one required field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Serial => &self.serial,
            Field::Item => &self.item,
            Field::CleanedBy => &self.cleaned_by,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Serial => &mut self.serial,
            Field::Item => &mut self.item,
            Field::CleanedBy => &mut self.cleaned_by,
        };
        *slot = value.into();
    }

    /// Required fields that are empty after trimming, in form order
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::all()
            .iter()
            .copied()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// Whether the form may be submitted
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Validate and build a record stamped with `moment`.
    ///
    /// Text fields are stored trimmed. Fails on the first blank required
    /// field.
    pub fn into_record<Tz: TimeZone>(self, moment: &DateTime<Tz>) -> Result<Record, ValidationError>
    where
        Tz::Offset: std::fmt::Display,
    {
        if let Some(field) = self.missing_fields().into_iter().next() {
            return Err(ValidationError::MissingField(field));
        }

        Ok(Record {
            name: self.name.trim().to_string(),
            serial: self.serial.trim().to_string(),
            item: self.item.trim().to_string(),
            cleaned_by: self.cleaned_by.trim().to_string(),
            inspection: self.inspection,
            date: String::new(),
            timestamp: 0,
        }
        .created_at(moment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn draft() -> RecordDraft {
        RecordDraft {
            name: "  Jane Doe ".to_string(),
            serial: "1234".to_string(),
            item: "Helmet".to_string(),
            cleaned_by: "Jane Doe".to_string(),
            inspection: true,
        }
    }

    #[test]
    fn test_draft_into_record_trims_and_stamps() {
        let moment = Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap();
        let record = draft().into_record(&moment).unwrap();

        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.serial, "1234");
        assert!(record.inspection);
        assert_eq!(record.date, "3/7/2024");
        assert_eq!(record.timestamp, moment.timestamp_millis());
    }

    #[test]
    fn test_blank_field_is_rejected() {
        let mut input = draft();
        input.name = "   ".to_string();

        let err = input.into_record(&Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Name));
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let input = RecordDraft {
            item: "Coat".to_string(),
            ..Default::default()
        };

        assert_eq!(
            input.missing_fields(),
            vec![Field::Name, Field::Serial, Field::CleanedBy]
        );
        assert!(!input.is_complete());
        assert!(draft().is_complete());
    }

    #[test]
    fn test_inspection_defaults_false() {
        let input: RecordDraft =
            serde_json::from_str(r#"{"name":"A","serial":"1","item":"Boots","cleanedBy":"B"}"#)
                .unwrap();
        assert!(!input.inspection);
    }

    #[test]
    fn test_wire_names() {
        let record = Record::new("Jane Doe", "1234", "Helmet", "Jane Doe").inspection(true);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["cleanedBy"], "Jane Doe");
        assert_eq!(json["inspection"], true);
        assert!(json.get("cleaned_by").is_none());
    }

    #[test]
    fn test_matches_lowercase() {
        let record = Record::new("ABCDEF", "99X1", "Hood", "Sam");
        assert!(record.matches_lowercase("abc"));
        assert!(record.matches_lowercase("x1"));
        assert!(!record.matches_lowercase("hood"));
    }
}
