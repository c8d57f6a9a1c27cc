use std::fmt::{self, Display};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// A single field value of a record
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
    Nested(serde_json::Value),
}

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Null
            | Self::Bool(_)
            | Self::Text(_)
            | Self::Date(_)
            | Self::Nested(_) => None,
        }
    }

    /// Returns the instant this value denotes when it is date-like.
    ///
    /// Text counts as date-like when it parses as RFC 3339,
    /// `YYYY-MM-DD HH:MM[:SS]` or a bare `YYYY-MM-DD`.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(text) => parse_date(text.trim()),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::Nested(_) => {
                None
            }
        }
    }

    /// Lower-cased string form, used for case-insensitive comparisons
    #[must_use]
    pub fn to_folded(&self) -> String {
        self.to_string().to_lowercase()
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.naive_utc());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(text, format) {
            return Some(date);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
            Self::Date(date) => {
                if date.time() == NaiveTime::MIN {
                    write!(f, "{}", date.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", date.format("%Y-%m-%d %H:%M"))
                }
            }
            Self::Nested(json) => write!(f, "{json}"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                n.as_f64().map_or(Self::Null, Self::Number)
            }
            serde_json::Value::String(s) => Self::Text(s),
            nested @ (serde_json::Value::Array(_)
            | serde_json::Value::Object(_)) => Self::Nested(nested),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(date: NaiveDateTime) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date.and_time(NaiveTime::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_drops_integral_fraction() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_text_is_date_like() {
        let date = Value::from("2024-03-01").as_date();
        assert_eq!(
            date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .map(|d| d.and_time(NaiveTime::MIN))
        );
        assert!(Value::from("2024-03-01T10:00:00Z").as_date().is_some());
        assert!(Value::from("2024-03-01 10:30").as_date().is_some());
        assert!(Value::from("March first").as_date().is_none());
        assert!(Value::Number(20_240_301.0).as_date().is_none());
    }

    #[test]
    fn test_date_display() {
        let day = NaiveDate::from_ymd_opt(2023, 12, 24).unwrap();
        assert_eq!(Value::from(day).to_string(), "2023-12-24");
        let at = day.and_hms_opt(9, 5, 0).unwrap();
        assert_eq!(Value::from(at).to_string(), "2023-12-24 09:05");
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({"a": [1, 2]});
        assert_eq!(Value::from(serde_json::json!(3)), Value::Number(3.0));
        assert_eq!(Value::from(serde_json::json!(null)), Value::Null);
        assert_eq!(
            Value::from(serde_json::json!("x")),
            Value::Text("x".to_string())
        );
        assert_eq!(Value::from(json.clone()), Value::Nested(json));
    }
}
