use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::timestamp::deserialize_lenient;
use crate::{MetricId, RenderError, UtcDateTime};

/// Market metrics for one asset in one convert currency.
///
/// The provider emits `null` for metrics it has no data for, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteEntry {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub volume_change_24h: Option<f64>,
    #[serde(default)]
    pub percent_change_1h: Option<f64>,
    #[serde(default)]
    pub percent_change_24h: Option<f64>,
    #[serde(default)]
    pub percent_change_7d: Option<f64>,
    #[serde(default)]
    pub percent_change_30d: Option<f64>,
    #[serde(default)]
    pub percent_change_60d: Option<f64>,
    #[serde(default)]
    pub percent_change_90d: Option<f64>,
    /// Informational only; an unparsable value decodes as `None`.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub last_updated: Option<UtcDateTime>,
}

impl QuoteEntry {
    pub const fn value(&self, metric: MetricId) -> Option<f64> {
        match metric {
            MetricId::Price => self.price,
            MetricId::PercentChange1h => self.percent_change_1h,
            MetricId::PercentChange24h => self.percent_change_24h,
            MetricId::PercentChange7d => self.percent_change_7d,
            MetricId::PercentChange30d => self.percent_change_30d,
            MetricId::PercentChange60d => self.percent_change_60d,
            MetricId::PercentChange90d => self.percent_change_90d,
            MetricId::Volume24h => self.volume_24h,
            MetricId::VolumeChange24h => self.volume_change_24h,
        }
    }
}

/// One asset record of the latest-quotes response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteData {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub quote: BTreeMap<String, QuoteEntry>,
}

impl QuoteData {
    /// Quote for `currency`; `symbol` only labels the error.
    pub fn quote_for(&self, symbol: &str, currency: &str) -> Result<&QuoteEntry, RenderError> {
        self.quote
            .get(currency)
            .ok_or_else(|| RenderError::CurrencyNotFound {
                symbol: symbol.to_owned(),
                currency: currency.to_owned(),
            })
    }
}

/// Status block present on every response, successful or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub timestamp: Option<UtcDateTime>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub elapsed: Option<u64>,
    #[serde(default)]
    pub credit_count: Option<u64>,
}

/// Latest-quotes response keyed by the symbol string the provider chose.
///
/// `data` keeps the entries in the order the response lists them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotesLatest {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default, with = "ordered_entries")]
    pub data: Vec<(String, QuoteData)>,
}

impl QuotesLatest {
    pub fn find_asset(&self, symbol: &str) -> Result<&QuoteData, RenderError> {
        find_asset(&self.data, symbol)
    }

    /// Oldest `last_updated` among the `currency` quotes, if any carry one.
    pub fn oldest_update(&self, currency: &str) -> Option<UtcDateTime> {
        self.data
            .iter()
            .filter_map(|(_, asset)| asset.quote.get(currency))
            .filter_map(|entry| entry.last_updated)
            .min()
    }
}

/// Locate the record for `symbol`.
///
/// Exact key first, then the first key equal ignoring case, scanning in
/// response order. The provider does not always echo the requested casing
/// back, e.g. `XAUT` comes back as `XAUt`.
pub fn find_asset<'a>(
    data: &'a [(String, QuoteData)],
    symbol: &str,
) -> Result<&'a QuoteData, RenderError> {
    if let Some((_, exact)) = data.iter().find(|(key, _)| key == symbol) {
        return Ok(exact);
    }

    let wanted = symbol.to_lowercase();
    data.iter()
        .find(|(key, _)| key.to_lowercase() == wanted)
        .map(|(_, value)| value)
        .ok_or_else(|| RenderError::SymbolNotFound {
            symbol: symbol.to_owned(),
        })
}

/// Serde adapter reading a JSON object into a `Vec` without reordering it.
mod ordered_entries {
    use std::fmt::{self, Formatter};

    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};

    use super::QuoteData;

    pub fn serialize<S>(entries: &[(String, QuoteData)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(entries.iter().map(|(key, value)| (key, value)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, QuoteData)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor)
    }

    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, QuoteData)>;

        fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str("a map of symbol to quote data")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, QuoteData>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }
}
