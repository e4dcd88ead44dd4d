//! Fixed textual format for customer timestamps (RFC 1123, always GMT).

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Server clock truncated to whole seconds, so a timestamp survives a trip through [`FORMAT`].
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// `ts`, or `floor` when the clock reads earlier than it.
pub fn not_before(ts: DateTime<Utc>, floor: Option<DateTime<Utc>>) -> DateTime<Utc> {
    floor.map_or(ts, |f| ts.max(f))
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(FORMAT).to_string()
}

pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, FORMAT).map(|n| n.and_utc())
}

/// serde `with` module for `Option<DateTime<Utc>>` fields.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(v: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(ts) => s.serialize_str(&format(ts)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| parse(&s).map_err(serde::de::Error::custom)).transpose()
    }
}
