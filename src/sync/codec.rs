//! Remote document encoding
//!
//! Writes are plain JSON arrays of records. Reads are decoded leniently:
//! the remote document is not trusted to have the current shape.
//!
//! ```text
//! null / empty body        -> no records
//! [ {..}, null, {..} ]     -> records in order, null holes skipped
//! { "0": {..}, "2": {..} } -> values in numeric key order (sparse array)
//! anything else            -> DecodeError
//! ```
//!
//! Inside the collection, an element that is not an object or has a field
//! of the wrong JSON type is dropped with a warning. Missing fields fall
//! back to empty text, `false` and `0`. A fractional timestamp is cut to
//! whole milliseconds.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::{SyncError, SyncResult};
use crate::record::Record;

/// Serialize records as the remote document body
pub fn encode_document(records: &[Record]) -> SyncResult<Vec<u8>> {
    Ok(serde_json::to_vec(records)?)
}

/// Decode a remote document body into records
pub fn decode_document(body: &[u8]) -> SyncResult<Vec<Record>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let document: Value = serde_json::from_slice(body)?;
    let elements = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::Object(map) => {
            let mut keyed: Vec<(String, Value)> = map.into_iter().collect();
            keyed.sort_by(|(a, _), (b, _)| sort_key(a).cmp(&sort_key(b)));
            keyed.into_iter().map(|(_, value)| value).collect()
        }
        other => {
            return Err(SyncError::Decode(format!(
                "expected an array of records, got {}",
                kind(&other)
            )))
        }
    };

    let total = elements.len();
    let records: Vec<Record> = elements
        .into_iter()
        .enumerate()
        .filter(|(_, value)| !value.is_null())
        .filter_map(|(index, value)| match decode_record(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed remote record");
                None
            }
        })
        .collect();

    tracing::debug!(total, decoded = records.len(), "Decoded remote document");
    Ok(records)
}

/// Numeric keys sort numerically ("2" before "10"), others after them
fn sort_key(key: &str) -> (u8, u64, &str) {
    match key.parse::<u64>() {
        Ok(n) => (0, n, key),
        Err(_) => (1, 0, key),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Remote record shape with every field optional
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    name: Option<String>,
    serial: Option<String>,
    item: Option<String>,
    cleaned_by: Option<String>,
    inspection: Option<bool>,
    date: Option<String>,
    timestamp: Option<Number>,
}

fn decode_record(value: Value) -> SyncResult<Record> {
    if !value.is_object() {
        return Err(SyncError::Decode(format!(
            "expected a record object, got {}",
            kind(&value)
        )));
    }

    let wire: WireRecord = serde_json::from_value(value)?;
    Ok(Record {
        name: wire.name.unwrap_or_default(),
        serial: wire.serial.unwrap_or_default(),
        item: wire.item.unwrap_or_default(),
        cleaned_by: wire.cleaned_by.unwrap_or_default(),
        inspection: wire.inspection.unwrap_or(false),
        date: wire.date.unwrap_or_default(),
        timestamp: wire.timestamp.as_ref().map_or(0, millis),
    })
}

/// Any JSON number as whole milliseconds (`as` saturates out-of-range floats)
fn millis(number: &Number) -> i64 {
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|f| f as i64))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_null_bodies() {
        assert!(decode_document(b"").unwrap().is_empty());
        assert!(decode_document(b"  \n").unwrap().is_empty());
        assert!(decode_document(b"null").unwrap().is_empty());
        assert!(decode_document(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_full_record_decodes() {
        let body = br#"[{"name":"Jane Doe","serial":"1234","item":"Helmet","cleanedBy":"Jane Doe",
                        "inspection":true,"date":"3/7/2024","timestamp":1709825400000}]"#;
        let records = decode_document(body).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cleaned_by, "Jane Doe");
        assert!(records[0].inspection);
        assert_eq!(records[0].timestamp, 1_709_825_400_000);
    }

    #[test]
    fn test_missing_fields_are_defaulted() {
        let records = decode_document(br#"[{"name":"Old Format"}]"#).unwrap();

        assert_eq!(records[0].name, "Old Format");
        assert_eq!(records[0].serial, "");
        assert!(!records[0].inspection);
        assert_eq!(records[0].timestamp, 0);
    }

    #[test]
    fn test_fractional_timestamp_is_truncated() {
        let body = br#"[{"name":"A","timestamp":1.7e12},{"name":"B","timestamp":1709825400000.9}]"#;
        let records = decode_document(body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, 1_700_000_000_000);
        assert_eq!(records[1].timestamp, 1_709_825_400_000);

        // Still a number: text in the timestamp field drops the element
        let records = decode_document(br#"[{"name":"C","timestamp":"soon"}]"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_elements_are_dropped() {
        let body = br#"[{"name":"A"}, 42, null, {"name":"B","inspection":"yes"}, {"name":"C"}]"#;
        let names: Vec<String> = decode_document(body)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_sparse_object_uses_numeric_key_order() {
        let body = br#"{"10":{"name":"ten"},"2":{"name":"two"},"0":{"name":"zero"}}"#;
        let names: Vec<String> = decode_document(body)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["zero", "two", "ten"]);
    }

    #[test]
    fn test_unusable_documents_are_errors() {
        assert!(matches!(decode_document(b"{not json"), Err(SyncError::Decode(_))));
        assert!(matches!(decode_document(b"\"logs\""), Err(SyncError::Decode(_))));
        assert!(matches!(decode_document(b"17"), Err(SyncError::Decode(_))));
    }

    #[test]
    fn test_encode_is_plain_array_in_order() {
        let records = vec![
            Record::new("A", "1", "Coat", "X"),
            Record::new("B", "2", "Pants", "Y"),
        ];
        let body = encode_document(&records).unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["name"], "A");
        assert_eq!(value[1]["cleanedBy"], "Y");
        assert_eq!(decode_document(&body).unwrap(), records);
    }
}
