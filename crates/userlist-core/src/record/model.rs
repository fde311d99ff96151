//! Record domain model.
//!
//! This module contains the entities that mirror one row of the remote table
//! and the value objects used to create and edit those rows.

use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Opaque key of a remote row.
///
/// The key is assigned by the remote side on insert. Depending on the table
/// schema it arrives either as a JSON integer or as a JSON string, and it is
/// sent back in the same shape.
///
/// Keys compare by their wire text, the value that ends up in `id=eq.{key}`.
/// `Int(12)` and `Text("12")` therefore name the same row, which matters for
/// text key columns whose values look numeric.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer key (e.g. `bigserial` / `int8` primary keys).
    Int(i64),
    /// Text key (e.g. `uuid` primary keys).
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(value) => write!(f, "{}", value),
            RecordId::Text(value) => write!(f, "{}", value),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecordId::Int(a), RecordId::Int(b)) => a == b,
            (RecordId::Text(a), RecordId::Text(b)) => a == b,
            (RecordId::Int(a), RecordId::Text(b)) | (RecordId::Text(b), RecordId::Int(a)) => {
                a.to_string() == *b
            }
        }
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            RecordId::Int(value) => value.to_string().hash(state),
            RecordId::Text(value) => value.hash(state),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    /// Parses user input: anything that reads as an integer becomes an
    /// integer key, everything else is kept as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(value) => RecordId::Int(value),
            Err(_) => RecordId::Text(trimmed.to_string()),
        })
    }
}

/// One row of the remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Key assigned by the remote side.
    pub id: RecordId,
    /// Display name. Stored remotely as `fullname`.
    #[serde(rename = "fullname", default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gender: String,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, full_name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            gender: gender.into(),
        }
    }

    /// Returns a copy of the editable attributes.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            full_name: self.full_name.clone(),
            gender: self.gender.clone(),
        }
    }

    /// Overwrites the editable attributes, keeping the key.
    pub fn apply(&mut self, fields: &RecordFields) {
        self.full_name = fields.full_name.clone();
        self.gender = fields.gender.clone();
    }
}

/// The editable attribute pair of a record.
///
/// Used as the insert body, the update body, and the "add" form draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub gender: String,
}

impl RecordFields {
    pub fn new(full_name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            gender: gender.into(),
        }
    }

    /// Both attributes carry a non-empty value.
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty() && !self.gender.is_empty()
    }
}

/// Transient edit buffer for the record currently targeted by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSelection {
    pub id: RecordId,
    pub full_name: String,
    pub gender: String,
}

impl PendingSelection {
    /// Seeds the buffer from a cached row.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            full_name: record.full_name.clone(),
            gender: record.gender.clone(),
        }
    }

    pub fn fields(&self) -> RecordFields {
        RecordFields {
            full_name: self.full_name.clone(),
            gender: self.gender.clone(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_integer_and_text_keys() {
        let rows: Vec<Record> = serde_json::from_str(
            r#"[
                {"id": 7, "fullname": "Ada", "gender": "F"},
                {"id": "0b7f3c1e", "fullname": "Alan", "gender": "M"}
            ]"#,
        )
        .unwrap();

        assert_eq!(rows[0].id, RecordId::Int(7));
        assert_eq!(rows[1].id, RecordId::Text("0b7f3c1e".to_string()));
        assert_eq!(serde_json::to_value(&rows[0].id).unwrap(), serde_json::json!(7));
    }

    #[test]
    fn test_record_tolerates_null_and_extra_columns() {
        let record: Record = serde_json::from_str(
            r#"{"id": 1, "fullname": null, "gender": "M", "created_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(record.full_name, "");
        assert_eq!(record.gender, "M");
    }

    #[test]
    fn test_fields_use_wire_names() {
        let value = serde_json::to_value(RecordFields::new("Grace", "F")).unwrap();
        assert_eq!(value, serde_json::json!({"fullname": "Grace", "gender": "F"}));
    }

    #[test]
    fn test_record_id_from_str() {
        assert_eq!("12".parse::<RecordId>().unwrap(), RecordId::Int(12));
        assert_eq!(" abc ".parse::<RecordId>().unwrap(), RecordId::from("abc"));
        assert_eq!(RecordId::Int(12).to_string(), "12");
    }

    #[test]
    fn test_record_id_compares_by_wire_text() {
        use std::collections::HashSet;

        assert_eq!(RecordId::Int(12), RecordId::from("12"));
        assert_eq!(RecordId::from("12"), RecordId::Int(12));
        assert_ne!(RecordId::Int(12), RecordId::from("012"));
        assert_ne!(RecordId::Int(12), RecordId::Int(13));

        let keys: HashSet<RecordId> = [RecordId::Int(12), RecordId::from("12")].into_iter().collect();
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_apply_keeps_key() {
        let mut record = Record::new(2, "B", "F");
        record.apply(&RecordFields::new("C", "F"));
        assert_eq!(record, Record::new(2, "C", "F"));
    }

    #[test]
    fn test_fields_completeness() {
        assert!(RecordFields::new("A", "M").is_complete());
        assert!(!RecordFields::new("", "M").is_complete());
        assert!(!RecordFields::default().is_complete());
    }
}
