use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// One displayable numeric field of a quote.
///
/// Configuration arrives as text; it is converted once at the boundary so
/// everything downstream dispatches on this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    Price,
    #[serde(rename = "percent_change_1h")]
    PercentChange1h,
    #[serde(rename = "percent_change_24h")]
    PercentChange24h,
    #[serde(rename = "percent_change_7d")]
    PercentChange7d,
    #[serde(rename = "percent_change_30d")]
    PercentChange30d,
    #[serde(rename = "percent_change_60d")]
    PercentChange60d,
    #[serde(rename = "percent_change_90d")]
    PercentChange90d,
    #[serde(rename = "volume_24h")]
    Volume24h,
    #[serde(rename = "volume_change_24h")]
    VolumeChange24h,
}

/// Metrics shown when the configuration does not list any.
pub const DEFAULT_METRICS: [MetricId; 1] = [MetricId::Price];

impl MetricId {
    pub const ALL: [MetricId; 9] = [
        Self::Price,
        Self::PercentChange1h,
        Self::PercentChange24h,
        Self::PercentChange7d,
        Self::PercentChange30d,
        Self::PercentChange60d,
        Self::PercentChange90d,
        Self::Volume24h,
        Self::VolumeChange24h,
    ];

    /// Field name used by the quote API and by configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::PercentChange1h => "percent_change_1h",
            Self::PercentChange24h => "percent_change_24h",
            Self::PercentChange7d => "percent_change_7d",
            Self::PercentChange30d => "percent_change_30d",
            Self::PercentChange60d => "percent_change_60d",
            Self::PercentChange90d => "percent_change_90d",
            Self::Volume24h => "volume_24h",
            Self::VolumeChange24h => "volume_change_24h",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownMetric {
                value: trimmed.to_owned(),
            })
    }
}

impl Display for MetricId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse a comma-separated display list, keeping order and duplicates.
///
/// A blank list yields [`DEFAULT_METRICS`].
pub fn parse_metric_list(input: &str) -> Result<Vec<MetricId>, ValidationError> {
    if input.trim().is_empty() {
        return Ok(DEFAULT_METRICS.to_vec());
    }

    input.split(',').map(MetricId::parse).collect()
}
