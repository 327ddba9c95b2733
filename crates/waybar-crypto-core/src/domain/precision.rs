use serde::{Deserialize, Serialize};

use crate::MetricId;

/// Precision used when a metric matches no category, and the per-asset default.
pub const DEFAULT_PRECISION: u32 = 2;

/// Largest accepted number of decimal places.
pub const MAX_PRECISION: u32 = 20;

/// Which of an asset's configured precisions applies to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionCategory {
    Price,
    Change,
    Volume,
}

/// Category rules, evaluated in order against the metric name. First match wins.
pub const PRECISION_RULES: [(&str, PrecisionCategory); 3] = [
    ("volume", PrecisionCategory::Volume),
    ("change", PrecisionCategory::Change),
    ("price", PrecisionCategory::Price),
];

/// Decimal places per precision category for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precisions {
    pub price: u32,
    pub change: u32,
    pub volume: u32,
}

impl Default for Precisions {
    fn default() -> Self {
        Self {
            price: DEFAULT_PRECISION,
            change: DEFAULT_PRECISION,
            volume: DEFAULT_PRECISION,
        }
    }
}

impl Precisions {
    pub const fn new(price: u32, change: u32, volume: u32) -> Self {
        Self {
            price,
            change,
            volume,
        }
    }

    pub const fn get(self, category: PrecisionCategory) -> u32 {
        match category {
            PrecisionCategory::Price => self.price,
            PrecisionCategory::Change => self.change,
            PrecisionCategory::Volume => self.volume,
        }
    }

    /// First configured field above [`MAX_PRECISION`], with its value.
    pub fn first_out_of_range(self) -> Option<(&'static str, u32)> {
        [
            ("price_precision", self.price),
            ("change_precision", self.change),
            ("volume_precision", self.volume),
        ]
        .into_iter()
        .find(|(_, value)| *value > MAX_PRECISION)
    }
}

/// Category for a metric name, or `None` when no rule matches.
pub fn category_for(name: &str) -> Option<PrecisionCategory> {
    PRECISION_RULES
        .iter()
        .find(|(needle, _)| name.contains(needle))
        .map(|(_, category)| *category)
}

/// Decimal places to render `metric` with for an asset.
pub fn select_precision(metric: MetricId, precisions: Precisions) -> u32 {
    category_for(metric.as_str())
        .map(|category| precisions.get(category))
        .unwrap_or(DEFAULT_PRECISION)
}
