use jiff::{Zoned, civil::DateTime};
use serde::{Deserialize, Serialize};

use crate::solve::Method;

/// Format of the `fecha` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One successful solve, as recorded in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local wall-clock time of the solve, to the second.
    #[serde(rename = "fecha", with = "timestamp")]
    pub timestamp: DateTime,

    /// Expression text as submitted.
    #[serde(rename = "funcion")]
    pub expression: String,

    #[serde(rename = "metodo")]
    pub method: Method,

    /// Reported root, already rounded.
    #[serde(rename = "raiz")]
    pub root: f64,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current local time.
    #[must_use]
    pub fn now(expression: impl Into<String>, method: Method, root: f64) -> Self {
        let now = Zoned::now().datetime();
        Self {
            timestamp: now.with().subsec_nanosecond(0).build().unwrap_or(now),
            expression: expression.into(),
            method,
            root,
        }
    }
}

mod timestamp {
    use jiff::civil::DateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &DateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.strftime(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::strptime(TIMESTAMP_FORMAT, &text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;
    use serde_json::json;

    #[test]
    fn uses_history_field_names() {
        let entry = HistoryEntry {
            timestamp: date(2024, 3, 9).at(14, 5, 7, 0),
            expression: "x**2 - 4".to_string(),
            method: Method::Newton,
            root: 2.0,
        };

        let value = serde_json::to_value(&entry).expect("serializable");
        assert_eq!(
            value,
            json!({
                "fecha": "2024-03-09 14:05:07",
                "funcion": "x**2 - 4",
                "metodo": "newton",
                "raiz": 2.0,
            })
        );

        let back: HistoryEntry = serde_json::from_value(value).expect("deserializable");
        assert_eq!(back, entry);
    }

    #[test]
    fn reads_legacy_method_names() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "fecha": "2023-11-30 08:00:00",
            "funcion": "cos(x) - x",
            "metodo": "Newton-Raphson",
            "raiz": 0.739085,
        }))
        .expect("deserializable");

        assert_eq!(entry.method, Method::Newton);
    }

    #[test]
    fn rejects_malformed_timestamps() {
        let result = serde_json::from_value::<HistoryEntry>(json!({
            "fecha": "yesterday",
            "funcion": "x",
            "metodo": "bisection",
            "raiz": 0.0,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn now_drops_subseconds() {
        let entry = HistoryEntry::now("x", Method::Bisection, 0.0);
        assert_eq!(entry.timestamp.subsec_nanosecond(), 0);
    }
}
