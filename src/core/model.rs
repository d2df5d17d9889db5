//! History document model
//!
//! Day entries wrap the raw JSON value so that fields this tool does not know
//! about are written back exactly as they were read.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered list of day entries, as stored in `presence-history.json`
pub type HistoryDocument = Vec<DayEntry>;

/// One calendar day of presences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayEntry(Value);

impl DayEntry {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Label used in messages: the `date` field, or `Unknown` when absent
    pub fn date_label(&self) -> String {
        match self.0.get("date") {
            Some(Value::String(date)) => date.clone(),
            None | Some(Value::Null) => "Unknown".to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// The `presences` sequence, if the entry has one
    pub fn presences(&self) -> Option<&Vec<Value>> {
        self.0.get("presences")?.as_array()
    }

    pub fn presences_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.0.get_mut("presences")?.as_array_mut()
    }
}

impl From<Value> for DayEntry {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// The fields of a presence record that take part in its identity
///
/// Extra fields are ignored here; the record itself stays a raw JSON value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Presence {
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Presence {
    pub fn from_value(value: &Value) -> serde_json::Result<Self> {
        if !value.is_object() {
            return Err(serde_json::Error::custom(format!(
                "expected a presence object, found {}",
                value
            )));
        }
        Presence::deserialize(value)
    }
}
