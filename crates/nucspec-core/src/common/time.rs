//! Timestamp parsing and float-second arithmetic.
//!
//! All reference dates are naive (wall-clock) timestamps. Text inputs are
//! interpreted here; RFC 3339 strings with an offset are converted to UTC.

use crate::domain::{NucError, NucResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta};
use serde_json::Value;

pub type Timestamp = NaiveDateTime;

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A timestamp as supplied by a caller: either already typed or textual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeInput {
    Native(Timestamp),
    Text(String),
}

impl TimeInput {
    pub fn resolve(&self) -> NucResult<Timestamp> {
        match self {
            Self::Native(timestamp) => Ok(*timestamp),
            Self::Text(text) => parse_timestamp(text),
        }
    }

    /// Interpret a JSON value: strings are parsed later, `null` means "absent".
    pub fn from_json(value: &Value) -> NucResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(Self::Text(text.clone()))),
            other => Err(NucError::type_mismatch(
                "TYPE.TIMESTAMP",
                format!("timestamp must be a string, got {other}"),
            )),
        }
    }
}

impl From<Timestamp> for TimeInput {
    fn from(value: Timestamp) -> Self {
        Self::Native(value)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

pub fn parse_timestamp(text: &str) -> NucResult<Timestamp> {
    let normalized = text.trim();
    if normalized.is_empty() {
        return Err(NucError::input("INPUT.TIMESTAMP", "timestamp text is empty"));
    }

    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(normalized, format) {
            return Ok(timestamp);
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(normalized) {
        return Ok(timestamp.naive_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight);
    }

    Err(NucError::input(
        "INPUT.TIMESTAMP",
        format!("could not parse timestamp '{normalized}'"),
    ))
}

pub fn now() -> Timestamp {
    Local::now().naive_local()
}

/// Signed elapsed seconds from `from` to `to`.
pub fn seconds_between(from: Timestamp, to: Timestamp) -> f64 {
    let delta = to.signed_duration_since(from);
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1.0e-9
}

/// Shift a timestamp by float seconds at nanosecond resolution.
///
/// Returns `None` when the result is not representable.
pub fn offset_by_seconds(timestamp: Timestamp, seconds: f64) -> Option<Timestamp> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.trunc();
    if whole.abs() > 1.0e15 {
        return None;
    }
    let nanos = ((seconds - whole) * 1.0e9).round() as i64;
    let delta = TimeDelta::try_seconds(whole as i64)?
        .checked_add(&TimeDelta::nanoseconds(nanos))?;
    timestamp.checked_add_signed(delta)
}

#[cfg(test)]
mod tests {
    use super::{TimeInput, offset_by_seconds, parse_timestamp, seconds_between};
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> super::Timestamp {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid test date")
    }

    #[test]
    fn accepts_common_textual_forms() {
        let expected = at(2017, 1, 1, 0, 0, 0);
        for text in [
            "2017-01-01 00:00:00",
            "2017-01-01T00:00:00",
            "2017-01-01 00:00",
            "2017-01-01",
            "2017-01-01T00:00:00Z",
            " 2017-01-01 00:00:00.000 ",
        ] {
            assert_eq!(parse_timestamp(text).expect(text), expected, "{text}");
        }
        assert_eq!(
            parse_timestamp("2017-01-01T02:00:00+02:00").expect("offset form"),
            expected
        );
    }

    #[test]
    fn rejects_garbage_as_input_error() {
        for text in ["", "yesterday", "2017-13-01", "123"] {
            let error = parse_timestamp(text).expect_err(text);
            assert_eq!(error.placeholder(), "INPUT.TIMESTAMP");
        }
    }

    #[test]
    fn json_timestamps_must_be_strings() {
        assert_eq!(TimeInput::from_json(&json!(null)).expect("null is absent"), None);
        assert_eq!(
            TimeInput::from_json(&json!("2015-01-08 00:00:00")).expect("string"),
            Some(TimeInput::Text("2015-01-08 00:00:00".to_string()))
        );
        let error = TimeInput::from_json(&json!(123)).expect_err("number should fail");
        assert_eq!(error.category(), crate::domain::NucErrorCategory::TypeError);
    }

    #[test]
    fn second_arithmetic_round_trips_with_fractions() {
        let start = at(2017, 1, 1, 0, 0, 0);
        let later = offset_by_seconds(start, 3600.25).expect("representable");
        assert!((seconds_between(start, later) - 3600.25).abs() < 1.0e-9);

        let earlier = offset_by_seconds(start, -0.11).expect("representable");
        assert!((seconds_between(start, earlier) + 0.11).abs() < 1.0e-9);
        assert!((seconds_between(earlier, start) - 0.11).abs() < 1.0e-9);

        assert_eq!(offset_by_seconds(start, f64::INFINITY), None);
        assert_eq!(offset_by_seconds(start, 1.0e30), None);
    }
}
