//! Core data types for the backfill pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw provider response document. The producer treats it as opaque; only
/// the consumer parses it into [`IntervalPayload`].
pub type RawPayload = serde_json::Value;

/// One fetch interval: a consecutive date pair from the computed range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl std::fmt::Display for DateInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A numeric reading that may arrive as a number, the placeholder string
/// `"None"`, or JSON `null`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Reading {
    Value(f64),
    Placeholder(String),
    Null,
}

impl Reading {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.as_f64().is_none()
    }
}

impl Default for Reading {
    fn default() -> Self {
        Reading::Null
    }
}

/// One hourly observation from the provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyRecord {
    /// Local timestamp, `yyyy-mm-dd:HH`
    pub datetime: String,

    pub temp: Reading,

    pub wind_spd: Reading,

    /// Direct normal irradiance; often absent at night
    #[serde(default)]
    pub dni: Reading,
}

/// Provider payload for one interval: an ordered run of up to 24 hourly
/// records sharing a calendar date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntervalPayload {
    pub data: Vec<HourlyRecord>,
}

/// Daily mean reduction of one interval's hourly records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    /// `yyyy-mm-dd`
    pub date: String,
    pub avg_temp: Option<f64>,
    pub avg_wind_spd: Option<f64>,
    pub avg_dni: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_record_parses_numeric_fields() {
        let json = r#"{"datetime":"2020-03-05:14","temp":12.5,"wind_spd":3.2,"dni":410.0}"#;
        let record: HourlyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.datetime, "2020-03-05:14");
        assert_eq!(record.temp.as_f64(), Some(12.5));
        assert_eq!(record.dni.as_f64(), Some(410.0));
    }

    #[test]
    fn placeholder_and_null_readings_parse_without_error() {
        let json = r#"{"datetime":"2020-03-05:02","temp":"None","wind_spd":1.0,"dni":null}"#;
        let record: HourlyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.temp, Reading::Placeholder("None".to_string()));
        assert!(record.temp.is_missing());
        assert_eq!(record.dni, Reading::Null);
    }

    #[test]
    fn absent_dni_defaults_to_null() {
        let json = r#"{"datetime":"2020-03-05:02","temp":4.0,"wind_spd":1.0}"#;
        let record: HourlyRecord = serde_json::from_str(json).unwrap();

        assert!(record.dni.is_missing());
    }

    #[test]
    fn extra_provider_fields_are_ignored() {
        let json = r#"{"datetime":"2020-03-05:02","temp":4.0,"wind_spd":1.0,"rh":81,"pres":1011.2}"#;
        let payload: IntervalPayload =
            serde_json::from_str(&format!(r#"{{"data":[{json}]}}"#)).unwrap();

        assert_eq!(payload.data.len(), 1);
    }

    #[test]
    fn integer_readings_widen_to_float() {
        let json = r#"{"datetime":"2020-03-05:02","temp":4,"wind_spd":1,"dni":0}"#;
        let record: HourlyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.temp.as_f64(), Some(4.0));
    }
}
