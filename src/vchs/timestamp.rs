//! XML dateTime scalar
//!
//! Timestamps travel as `YYYY-MM-DDThh:mm:ss[.fraction][Z|(+|-)hh:mm]` in
//! both JSON and XML bodies. `XmlDateTime` owns that conversion so every
//! record field of this type is encoded and decoded the same way.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Calendar value with an optional timezone, as in `xs:dateTime`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmlDateTime {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid dateTime value: {0:?}")]
pub struct InvalidDateTime(pub String);

impl XmlDateTime {
    pub fn new(local: NaiveDateTime, offset: Option<FixedOffset>) -> Self {
        Self { local, offset }
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// Zoned view of the value; `None` when the wire form carried no timezone
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.offset
            .and_then(|offset| offset.from_local_datetime(&self.local).single())
    }

    pub fn parse(value: &str) -> Result<Self, InvalidDateTime> {
        let invalid = || InvalidDateTime(value.to_string());
        let trimmed = value.trim();
        let (local_part, offset) = split_offset(trimmed).ok_or_else(invalid)?;
        let local = NaiveDateTime::parse_from_str(local_part, LOCAL_FORMAT).map_err(|_| invalid())?;
        Ok(Self { local, offset })
    }

    /// Canonical lexical form
    pub fn to_xml_format(&self) -> String {
        let mut out = self.local.format(LOCAL_FORMAT).to_string();
        if let Some(offset) = self.offset {
            let seconds = offset.local_minus_utc();
            if seconds == 0 {
                out.push('Z');
            } else {
                let sign = if seconds < 0 { '-' } else { '+' };
                let minutes = seconds.abs() / 60;
                out.push_str(&format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60));
            }
        }
        out
    }
}

/// Split a trailing `Z` or `±hh:mm` zone designator off the value
fn split_offset(value: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(local) = value.strip_suffix('Z') {
        return Some((local, FixedOffset::east_opt(0)));
    }
    let time_start = value.find('T')?;
    if value.len() >= 6 && value.is_char_boundary(value.len() - 6) {
        let (local, zone) = value.split_at(value.len() - 6);
        let bytes = zone.as_bytes();
        if local.len() > time_start && (bytes[0] == b'+' || bytes[0] == b'-') && bytes[3] == b':' {
            let hours: i32 = zone[1..3].parse().ok()?;
            let minutes: i32 = zone[4..6].parse().ok()?;
            if hours > 14 || minutes > 59 {
                return None;
            }
            let sign = if bytes[0] == b'-' { -1 } else { 1 };
            let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;
            return Some((local, Some(offset)));
        }
    }
    Some((value, None))
}

impl From<DateTime<Utc>> for XmlDateTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            local: value.naive_utc(),
            offset: FixedOffset::east_opt(0),
        }
    }
}

impl FromStr for XmlDateTime {
    type Err = InvalidDateTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for XmlDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_format())
    }
}

impl Serialize for XmlDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_xml_format())
    }
}

struct XmlDateTimeVisitor;

impl<'de> Visitor<'de> for XmlDateTimeVisitor {
    type Value = XmlDateTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an xs:dateTime string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        XmlDateTime::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for XmlDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(XmlDateTimeVisitor)
    }
}

/// `deserialize_with` for optional timestamps: an empty or unparseable value
/// becomes `None` instead of failing the whole record
pub fn deserialize_optional<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<XmlDateTime>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    match XmlDateTime::parse(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!("Dropping timestamp: {}", e);
            Ok(None)
        }
    }
}
