//! Status-bar rendering.
//!
//! Each configured asset becomes one block: its icon followed by one
//! space-prefixed entry per requested metric. Blocks go to the main line or the
//! tooltip depending on the asset's [`Placement`], separated only from blocks
//! already present there.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    select_precision, FormatOverrides, FormatResolver, FormatTemplate, MetricId, Precisions,
    QuotesLatest, RenderError, ValidationError, MAX_PRECISION,
};

/// CSS class reported to the status bar for this module.
pub const CLASS_NAME: &str = "crypto";

const TOOLTIP_SEPARATOR: &str = "\n";

/// Where an asset's block is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    #[default]
    MainLine,
    Tooltip,
}

/// Display settings for one configured asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Exchange symbol, case as configured.
    pub symbol: String,
    pub icon: String,
    pub placement: Placement,
    pub precisions: Precisions,
    pub formats: FormatOverrides,
}

impl AssetConfig {
    pub fn new(symbol: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            icon: icon.into(),
            placement: Placement::MainLine,
            precisions: Precisions::default(),
            formats: FormatOverrides::new(),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_precisions(mut self, precisions: Precisions) -> Self {
        self.precisions = precisions;
        self
    }

    pub fn with_format(mut self, metric: MetricId, template: FormatTemplate) -> Self {
        self.formats.insert(metric, template);
        self
    }
}

/// Fully resolved rendering configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Convert currency code, uppercase.
    pub currency: String,
    pub currency_symbol: String,
    pub spacer: String,
    /// Display order of metrics within every asset block.
    pub metrics: Vec<MetricId>,
    /// Global template overrides.
    pub formats: FormatOverrides,
    pub assets: Vec<AssetConfig>,
}

impl RenderConfig {
    pub fn new(currency: impl Into<String>, currency_symbol: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            currency_symbol: currency_symbol.into(),
            spacer: String::new(),
            metrics: crate::DEFAULT_METRICS.to_vec(),
            formats: FormatOverrides::new(),
            assets: Vec::new(),
        }
    }

    pub fn with_spacer(mut self, spacer: impl Into<String>) -> Self {
        self.spacer = spacer.into();
        self
    }

    pub fn with_metrics(mut self, metrics: Vec<MetricId>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_format(mut self, metric: MetricId, template: FormatTemplate) -> Self {
        self.formats.insert(metric, template);
        self
    }

    pub fn with_asset(mut self, asset: AssetConfig) -> Self {
        self.assets.push(asset);
        self
    }

    /// Separator placed between main line blocks: the spacer padded with one
    /// space on each side, or a single space when no spacer is configured.
    pub fn main_line_separator(&self) -> String {
        if self.spacer.is_empty() {
            String::from(" ")
        } else {
            format!(" {} ", self.spacer)
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.currency.trim().is_empty() {
            return Err(ValidationError::EmptyCurrency);
        }
        if self.metrics.is_empty() {
            return Err(ValidationError::NoMetrics);
        }
        for asset in &self.assets {
            if let Some((field, value)) = asset.precisions.first_out_of_range() {
                return Err(ValidationError::InvalidOption {
                    section: asset.symbol.clone(),
                    field: field.to_owned(),
                    message: format!("{value} exceeds the maximum of {MAX_PRECISION}"),
                });
            }
        }
        Ok(())
    }
}

/// Output consumed verbatim by the status bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    pub text: String,
    pub tooltip: String,
    pub class: String,
}

/// Text collected for one placement.
struct Accumulator<'s> {
    text: String,
    separator: &'s str,
}

impl<'s> Accumulator<'s> {
    fn new(separator: &'s str) -> Self {
        Self {
            text: String::new(),
            separator,
        }
    }

    fn push(&mut self, block: &str) {
        if !self.text.is_empty() {
            self.text.push_str(self.separator);
        }
        self.text.push_str(block);
    }
}

/// Renders a [`QuotesLatest`] response according to a [`RenderConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    config: &'a RenderConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a RenderConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Render every asset; any lookup failure aborts without partial output.
    pub fn render(&self, quotes: &QuotesLatest) -> Result<RenderResult, RenderError> {
        let separator = self.config.main_line_separator();
        let mut main_line = Accumulator::new(&separator);
        let mut tooltip = Accumulator::new(TOOLTIP_SEPARATOR);

        for asset in &self.config.assets {
            let block = self.render_asset(asset, quotes)?;
            debug!(symbol = %asset.symbol, placement = ?asset.placement, "rendered asset");

            match asset.placement {
                Placement::MainLine => main_line.push(&block),
                Placement::Tooltip => tooltip.push(&block),
            }
        }

        let text = self.never_empty(main_line.text);

        Ok(RenderResult {
            text,
            tooltip: tooltip.text,
            class: String::from(CLASS_NAME),
        })
    }

    fn render_asset(&self, asset: &AssetConfig, quotes: &QuotesLatest) -> Result<String, RenderError> {
        let entry = quotes
            .find_asset(&asset.symbol)?
            .quote_for(&asset.symbol, &self.config.currency)?;
        let resolver = FormatResolver::new(
            &self.config.currency_symbol,
            &self.config.formats,
            &asset.formats,
        );

        let mut block = asset.icon.clone();
        for &metric in &self.config.metrics {
            let precision = select_precision(metric, asset.precisions);
            let value = entry.value(metric).ok_or_else(|| RenderError::MissingMetric {
                symbol: asset.symbol.clone(),
                metric,
            })?;

            block.push(' ');
            block.push_str(&resolver.resolve(metric).render(precision, value));
        }

        Ok(block)
    }

    /// The main line must never be blank: when every asset went to the tooltip,
    /// show all icons instead.
    fn never_empty(&self, main_line: String) -> String {
        if !main_line.is_empty() {
            return main_line;
        }

        self.config
            .assets
            .iter()
            .map(|asset| asset.icon.as_str())
            .collect()
    }
}

/// Validate `config` and render `quotes` with it.
pub fn render(config: &RenderConfig, quotes: &QuotesLatest) -> Result<RenderResult, crate::CoreError> {
    let result = Renderer::new(config)?.render(quotes)?;
    Ok(result)
}
