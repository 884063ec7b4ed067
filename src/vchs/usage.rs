//! Usage and cost records shared by metering and billing
//!
//! Records nest three levels deep: entity → billable list → billable line.
//! Values are only ever printed, so amounts keep their wire text.

use super::timestamp::{deserialize_optional, XmlDateTime};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Decimal value as text
///
/// XML text and JSON strings are kept exactly as sent. JSON numbers go
/// through serde_json's number type, so `12.50` arrives as `12.5`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Amount(pub String);

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or numeric text")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Ok(Amount(v.trim().to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Ok(Amount(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::default())
    }

    // XML elements reach `deserialize_any` as a map holding their text under `$text`
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Amount, A::Error> {
        let mut text = String::new();
        while let Some(key) = map.next_key::<String>()? {
            let value: String = map.next_value()?;
            if key == "$text" || key == "$value" {
                text = value.trim().to_string();
            }
        }
        Ok(Amount(text))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// One billable line
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: Option<Amount>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub rate: Option<Amount>,
    #[serde(default)]
    pub usage: Option<Amount>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BillableList {
    #[serde(default)]
    pub billable: Vec<Billable>,
}

/// Metered or billed entity (service instance, L1 or L2)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub billable_list: Option<BillableList>,
}

impl Entity {
    pub fn billables(&self) -> &[Billable] {
        self.billable_list
            .as_ref()
            .map(|l| l.billable.as_slice())
            .unwrap_or_default()
    }
}

/// Entity list plus the reporting window shared by all usage documents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub start_time: Option<XmlDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub end_time: Option<XmlDateTime>,
    #[serde(default)]
    pub entity: Vec<Entity>,
}

/// Metering: usage not yet billed
pub type BillableUsage = UsageReport;
/// Metering: costs not yet billed, per service group
pub type BillableCosts = UsageReport;
/// Billing: usage on issued bills
pub type BilledUsage = UsageReport;
/// Billing: costs on issued bills
pub type BilledCosts = UsageReport;
