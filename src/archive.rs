use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyQuote {
    pub sale: f64,
    pub purchase: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayQuotes {
    #[serde(rename = "EUR")]
    pub eur: CurrencyQuote,
    #[serde(rename = "USD")]
    pub usd: CurrencyQuote,
}

/// One day's quotes, keyed by the date string the upstream reported.
///
/// On the wire this is a single-entry JSON map, e.g.
/// `{"01.01.2024": {"EUR": {...}, "USD": {...}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub date: String,
    pub quotes: DayQuotes,
}

impl Serialize for RateRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.quotes)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for RateRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = RateRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map from one date to its EUR/USD quotes")
            }

            fn visit_map<A>(self, mut map: A) -> Result<RateRecord, A::Error>
            where
                A: MapAccess<'de>,
            {
                let (date, quotes) = map
                    .next_entry::<String, DayQuotes>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if map.next_entry::<String, DayQuotes>()?.is_some() {
                    return Err(de::Error::custom("rate record holds exactly one date"));
                }
                Ok(RateRecord { date, quotes })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Overwrites `path` with the records as a 4-space-indented JSON array.
pub fn persist(records: &[RateRecord], path: &Path) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;
    fs::write(path, buf)?;
    Ok(())
}
