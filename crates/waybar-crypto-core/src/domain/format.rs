use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Write as _};

use serde::{Deserialize, Serialize};

use crate::{MetricId, ValidationError};

/// Slot rendering the value at the selected precision.
pub const VALUE_SLOT: &str = "{val:.{dp}f}";
const SHORT_VALUE_SLOT: &str = "{val}";
const PRECISION_SLOT: &str = "{dp}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Value,
    Precision,
}

/// Parsed display template for a single metric, e.g. `24h:{val:.{dp}f}%`.
///
/// `{val}` is shorthand for `{val:.{dp}f}` and always prints exactly the
/// selected number of decimal places (`2.0000` at 4, `3` at 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormatTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl FormatTemplate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormatTemplate {
            template: input.to_owned(),
            reason: reason.to_owned(),
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut has_value = false;
        let mut rest = input;

        while let Some(ch) = rest.chars().next() {
            match ch {
                '{' if rest.starts_with("{{") => {
                    literal.push('{');
                    rest = &rest[2..];
                }
                '}' if rest.starts_with("}}") => {
                    literal.push('}');
                    rest = &rest[2..];
                }
                '{' => {
                    let (segment, len) = if rest.starts_with(VALUE_SLOT) {
                        (Segment::Value, VALUE_SLOT.len())
                    } else if rest.starts_with(SHORT_VALUE_SLOT) {
                        (Segment::Value, SHORT_VALUE_SLOT.len())
                    } else if rest.starts_with(PRECISION_SLOT) {
                        (Segment::Precision, PRECISION_SLOT.len())
                    } else {
                        return Err(invalid("unsupported substitution slot"));
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    has_value |= segment == Segment::Value;
                    segments.push(segment);
                    rest = &rest[len..];
                }
                '}' => return Err(invalid("unmatched '}'")),
                other => {
                    literal.push(other);
                    rest = &rest[other.len_utf8()..];
                }
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if !has_value {
            return Err(invalid("template has no value slot"));
        }

        Ok(Self {
            source: input.to_owned(),
            segments,
        })
    }

    /// Template made of a literal prefix, the value slot, and a literal suffix.
    fn wrapped(prefix: &str, suffix: &str) -> Self {
        let mut segments = Vec::with_capacity(3);
        if !prefix.is_empty() {
            segments.push(Segment::Literal(prefix.to_owned()));
        }
        segments.push(Segment::Value);
        if !suffix.is_empty() {
            segments.push(Segment::Literal(suffix.to_owned()));
        }

        Self {
            source: format!("{}{VALUE_SLOT}{}", escape(prefix), escape(suffix)),
            segments,
        }
    }

    /// Copy of this template with `prefix` rendered verbatim in front of it.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        if prefix.is_empty() {
            return self.clone();
        }

        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        match self.segments.first() {
            Some(Segment::Literal(head)) => {
                segments.push(Segment::Literal(format!("{prefix}{head}")));
                segments.extend(self.segments.iter().skip(1).cloned());
            }
            _ => {
                segments.push(Segment::Literal(prefix.to_owned()));
                segments.extend(self.segments.iter().cloned());
            }
        }

        Self {
            source: format!("{}{}", escape(prefix), self.source),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Substitute `value` rounded to `precision` decimal places.
    ///
    /// Rounding is done by the fixed-precision float formatter on the exact
    /// binary value. True ties such as `0.125` round half to even; `0.35` is
    /// not a tie and rounds down.
    pub fn render(&self, precision: u32, value: f64) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Value => {
                    let _ = write!(out, "{:.*}", precision as usize, value);
                }
                Segment::Precision => {
                    let _ = write!(out, "{precision}");
                }
            }
        }
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

impl Display for FormatTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for FormatTemplate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for FormatTemplate {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<FormatTemplate> for String {
    fn from(value: FormatTemplate) -> Self {
        value.source
    }
}

/// Per-metric template overrides for one configuration layer.
pub type FormatOverrides = BTreeMap<MetricId, FormatTemplate>;

/// Built-in templates for every metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatTable;

impl FormatTable {
    const fn affixes(metric: MetricId) -> (&'static str, &'static str) {
        match metric {
            MetricId::Price => ("", ""),
            MetricId::PercentChange1h => ("1h:", "%"),
            MetricId::PercentChange24h => ("24h:", "%"),
            MetricId::PercentChange7d => ("7d:", "%"),
            MetricId::PercentChange30d => ("30d:", "%"),
            MetricId::PercentChange60d => ("60d:", "%"),
            MetricId::PercentChange90d => ("90d:", "%"),
            MetricId::Volume24h => ("24hVol:", ""),
            MetricId::VolumeChange24h => ("24hVol:", "%"),
        }
    }

    pub fn template(metric: MetricId) -> FormatTemplate {
        let (prefix, suffix) = Self::affixes(metric);
        FormatTemplate::wrapped(prefix, suffix)
    }
}

/// Resolves the effective template for a metric from the layered configuration.
///
/// Lowest to highest priority: built-in table, currency symbol on `price`,
/// global overrides, per-asset overrides. Each layer only shadows the metrics
/// it defines.
#[derive(Debug, Clone, Copy)]
pub struct FormatResolver<'a> {
    currency_symbol: &'a str,
    global: &'a FormatOverrides,
    asset: &'a FormatOverrides,
}

impl<'a> FormatResolver<'a> {
    pub fn new(
        currency_symbol: &'a str,
        global: &'a FormatOverrides,
        asset: &'a FormatOverrides,
    ) -> Self {
        Self {
            currency_symbol,
            global,
            asset,
        }
    }

    pub fn resolve(&self, metric: MetricId) -> Cow<'a, FormatTemplate> {
        let overridden = [self.asset, self.global]
            .into_iter()
            .find_map(|layer| layer.get(&metric));

        match overridden {
            Some(template) => Cow::Borrowed(template),
            None => Cow::Owned(self.builtin(metric)),
        }
    }

    fn builtin(&self, metric: MetricId) -> FormatTemplate {
        let template = FormatTable::template(metric);
        match metric {
            MetricId::Price => template.with_prefix(self.currency_symbol),
            _ => template,
        }
    }
}
