//! Lenient timestamp parsing for graph-service records.
//!
//! The graph service is not consistent about timestamp formats: most values
//! are RFC 3339, some omit the offset, and legacy rows carry nulls or junk.
//! A single odd value must not fail the whole record, so anything that does
//! not parse becomes `None`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::debug;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an RFC 3339 timestamp, or an offset-less one taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` helper for optional timestamp fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => {
            let parsed = parse_timestamp(&s);
            if parsed.is_none() {
                debug!(value = %s, "Ignoring unparsable timestamp");
            }
            parsed
        }
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            debug!(value = %other, "Ignoring non-string timestamp");
            None
        }
    })
}
