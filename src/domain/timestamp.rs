//! Creation timestamps, stored and transmitted as RFC 3339 strings.
//!
//! Values are truncated to microseconds when generated so that the textual
//! form round-trips exactly.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use serde::{Deserialize, Deserializer, Serializer};

const SUBSEC_DIGITS: u16 = 6;

/// The current UTC instant at the stored precision
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(SUBSEC_DIGITS)
}

/// Format an instant the way it is persisted, e.g. `2026-10-14T09:30:00.123456+00:00`
pub fn format(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse any RFC 3339 string into a UTC instant
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|t| t.with_timezone(&Utc))
}

/// `#[serde(with = "timestamp")]` support
pub fn serialize<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(timestamp))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let value = String::deserialize(deserializer)?;
    parse(&value).map_err(serde::de::Error::custom)
}
