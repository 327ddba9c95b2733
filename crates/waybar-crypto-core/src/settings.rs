//! Configuration file loading.
//!
//! The file is TOML with one `[general]` table and one table per asset, named
//! by the asset's exchange symbol:
//!
//! ```toml
//! [general]
//! currency = "eur"
//! currency_symbol = "€"
//! spacer_symbol = "|"
//! display = "price,percent_change_24h"
//! format_percent_change_24h = "({val:.{dp}f}%)"
//!
//! [BTC]
//! icon = "₿"
//! price_precision = 0
//!
//! [XAUt]
//! icon = "Au"
//! in_tooltip = true
//! ```
//!
//! Asset tables keep their file order and their casing.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::path::Path;

use serde::Deserialize;

use crate::{
    parse_metric_list, AssetConfig, ConfigError, FormatOverrides, FormatTemplate, MetricId,
    Placement, Precisions, RenderConfig, ValidationError, DEFAULT_PRECISION, MAX_PRECISION,
};

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "COINMARKETCAP_API_KEY";

const GENERAL_SECTION: &str = "general";
const FORMAT_OPTION_PREFIX: &str = "format_";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DisplayOption {
    List(String),
    Items(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct GeneralSection {
    currency: Option<String>,
    currency_symbol: Option<String>,
    #[serde(default)]
    spacer_symbol: String,
    display: Option<DisplayOption>,
    api_key: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct AssetSection {
    icon: Option<String>,
    #[serde(default)]
    in_tooltip: bool,
    price_precision: Option<i64>,
    change_precision: Option<i64>,
    volume_precision: Option<i64>,
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

/// Parsed configuration: what to render plus how to authenticate.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub render: RenderConfig,
    api_key: Option<String>,
}

impl Debug for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("render", &self.render)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Settings {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_toml_str(&contents)?)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ValidationError> {
        let root: toml::Table = toml::from_str(input).map_err(|e| ValidationError::InvalidToml {
            message: e.to_string(),
        })?;

        let general = root
            .get(GENERAL_SECTION)
            .ok_or(ValidationError::MissingGeneralSection)?;
        let general: GeneralSection = parse_section(GENERAL_SECTION, general)?;

        let currency = general
            .currency
            .ok_or_else(|| missing(GENERAL_SECTION, "currency"))?
            .trim()
            .to_ascii_uppercase();
        if currency.is_empty() {
            return Err(ValidationError::EmptyCurrency);
        }

        let currency_symbol = general
            .currency_symbol
            .ok_or_else(|| missing(GENERAL_SECTION, "currency_symbol"))?;

        let metrics = match general.display {
            None => crate::DEFAULT_METRICS.to_vec(),
            Some(DisplayOption::List(list)) => parse_metric_list(&list)?,
            Some(DisplayOption::Items(items)) if items.is_empty() => {
                crate::DEFAULT_METRICS.to_vec()
            }
            Some(DisplayOption::Items(items)) => items
                .iter()
                .map(|item| MetricId::parse(item))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let mut render = RenderConfig::new(currency, currency_symbol)
            .with_spacer(general.spacer_symbol)
            .with_metrics(metrics);
        render.formats = format_overrides(GENERAL_SECTION, &general.extra)?;

        for (name, value) in root.iter().filter(|(name, _)| *name != GENERAL_SECTION) {
            render.assets.push(asset_config(name, value)?);
        }

        if render.assets.is_empty() {
            return Err(ValidationError::NoAssets);
        }

        Ok(Self {
            render,
            api_key: general.api_key.filter(|key| !key.is_empty()),
        })
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Asset symbols to request, in configured order and casing.
    pub fn symbols(&self) -> Vec<&str> {
        self.render
            .assets
            .iter()
            .map(|asset| asset.symbol.as_str())
            .collect()
    }

    /// API key to use: a non-empty `env_value` wins over the file value.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String, ValidationError> {
        env_value
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or(ValidationError::MissingApiKey {
                env_var: API_KEY_ENV,
            })
    }
}

fn parse_section<T: for<'de> Deserialize<'de>>(
    name: &str,
    value: &toml::Value,
) -> Result<T, ValidationError> {
    if !value.is_table() {
        return Err(ValidationError::InvalidSection {
            section: name.to_owned(),
            message: String::from("expected a table"),
        });
    }

    value
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| ValidationError::InvalidSection {
            section: name.to_owned(),
            message: e.to_string(),
        })
}

fn missing(section: &str, field: &'static str) -> ValidationError {
    ValidationError::MissingField {
        section: section.to_owned(),
        field,
    }
}

fn asset_config(name: &str, value: &toml::Value) -> Result<AssetConfig, ValidationError> {
    let section: AssetSection = parse_section(name, value)?;

    let icon = section.icon.ok_or_else(|| missing(name, "icon"))?;
    let precisions = Precisions::new(
        precision(name, "price_precision", section.price_precision)?,
        precision(name, "change_precision", section.change_precision)?,
        precision(name, "volume_precision", section.volume_precision)?,
    );
    let placement = if section.in_tooltip {
        Placement::Tooltip
    } else {
        Placement::MainLine
    };

    let mut asset = AssetConfig::new(name, icon)
        .with_placement(placement)
        .with_precisions(precisions);
    asset.formats = format_overrides(name, &section.extra)?;

    Ok(asset)
}

fn precision(asset: &str, field: &'static str, value: Option<i64>) -> Result<u32, ValidationError> {
    let Some(value) = value else {
        return Ok(DEFAULT_PRECISION);
    };

    if value < 0 {
        return Err(ValidationError::NegativePrecision {
            asset: asset.to_owned(),
            field,
        });
    }

    u32::try_from(value)
        .ok()
        .filter(|places| *places <= MAX_PRECISION)
        .ok_or_else(|| ValidationError::InvalidOption {
            section: asset.to_owned(),
            field: field.to_owned(),
            message: format!("{value} exceeds the maximum of {MAX_PRECISION}"),
        })
}

/// Collect `format_<metric>` options; any other leftover key is rejected.
fn format_overrides(
    section: &str,
    extra: &BTreeMap<String, toml::Value>,
) -> Result<FormatOverrides, ValidationError> {
    let mut overrides = FormatOverrides::new();

    for (key, value) in extra {
        let Some(metric_name) = key.strip_prefix(FORMAT_OPTION_PREFIX) else {
            return Err(ValidationError::UnknownOption {
                section: section.to_owned(),
                field: key.clone(),
            });
        };

        let metric = MetricId::parse(metric_name)?;
        let raw = value.as_str().ok_or_else(|| ValidationError::InvalidOption {
            section: section.to_owned(),
            field: key.clone(),
            message: String::from("expected a string"),
        })?;

        overrides.insert(metric, FormatTemplate::parse(raw)?);
    }

    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [general]
        currency = "usd"
        currency_symbol = "$"

        [BTC]
        icon = "B"
    "#;

    #[test]
    fn minimal_config_uses_defaults() {
        let settings = Settings::from_toml_str(MINIMAL).expect("valid config");
        let render = settings.render_config();

        assert_eq!(render.currency, "USD");
        assert_eq!(render.spacer, "");
        assert_eq!(render.metrics, vec![MetricId::Price]);
        assert!(render.formats.is_empty());

        let asset = &render.assets[0];
        assert_eq!(asset.symbol, "BTC");
        assert_eq!(asset.placement, Placement::MainLine);
        assert_eq!(asset.precisions, Precisions::default());
    }

    #[test]
    fn assets_keep_file_order_and_case() {
        let settings = Settings::from_toml_str(
            r#"
            [general]
            currency = "eur"
            currency_symbol = "€"

            [xmr]
            icon = "M"

            [XAUt]
            icon = "G"

            [ADA]
            icon = "A"
            "#,
        )
        .expect("valid config");

        assert_eq!(settings.symbols(), vec!["xmr", "XAUt", "ADA"]);
    }

    #[test]
    fn display_accepts_list_or_array() {
        let csv = MINIMAL.replace(
            "currency_symbol = \"$\"",
            "currency_symbol = \"$\"\ndisplay = \"price,volume_24h\"",
        );
        let array = MINIMAL.replace(
            "currency_symbol = \"$\"",
            "currency_symbol = \"$\"\ndisplay = [\"price\", \"volume_24h\"]",
        );

        for input in [csv, array] {
            let settings = Settings::from_toml_str(&input).expect("valid config");
            assert_eq!(
                settings.render.metrics,
                vec![MetricId::Price, MetricId::Volume24h]
            );
        }
    }

    #[test]
    fn parses_format_overrides_and_precisions() {
        let settings = Settings::from_toml_str(
            r#"
            [general]
            currency = "usd"
            currency_symbol = "$"
            format_price = "{val} USD"

            [BTC]
            icon = "B"
            in_tooltip = true
            price_precision = 0
            volume_precision = 4
            format_volume_24h = "vol {val}"
            "#,
        )
        .expect("valid config");

        let render = settings.render_config();
        assert_eq!(
            render.formats.get(&MetricId::Price).map(FormatTemplate::as_str),
            Some("{val} USD")
        );

        let asset = &render.assets[0];
        assert_eq!(asset.placement, Placement::Tooltip);
        assert_eq!(asset.precisions, Precisions::new(0, DEFAULT_PRECISION, 4));
        assert!(asset.formats.contains_key(&MetricId::Volume24h));
    }

    #[test]
    fn rejects_negative_precision() {
        let input = MINIMAL.replace("icon = \"B\"", "icon = \"B\"\nchange_precision = -1");
        let err = Settings::from_toml_str(&input).expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::NegativePrecision {
                asset: String::from("BTC"),
                field: "change_precision",
            }
        );
    }

    #[test]
    fn rejects_precision_above_maximum() {
        let input = MINIMAL.replace("icon = \"B\"", "icon = \"B\"\nprice_precision = 70000");
        let err = Settings::from_toml_str(&input).expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::InvalidOption {
                section: String::from("BTC"),
                field: String::from("price_precision"),
                message: String::from("70000 exceeds the maximum of 20"),
            }
        );
    }

    #[test]
    fn accepts_precision_at_maximum() {
        let input = MINIMAL.replace("icon = \"B\"", "icon = \"B\"\nvolume_precision = 20");
        let settings = Settings::from_toml_str(&input).expect("valid config");
        assert_eq!(settings.render.assets[0].precisions.volume, MAX_PRECISION);
    }

    #[test]
    fn rejects_unknown_display_option() {
        let input = MINIMAL.replace(
            "currency_symbol = \"$\"",
            "currency_symbol = \"$\"\ndisplay = \"price,market_cap\"",
        );
        let err = Settings::from_toml_str(&input).expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownMetric { .. }));
    }

    #[test]
    fn rejects_unknown_option_key() {
        let input = MINIMAL.replace("icon = \"B\"", "icon = \"B\"\ncolour = \"red\"");
        let err = Settings::from_toml_str(&input).expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownOption { .. }));
    }

    #[test]
    fn rejects_missing_icon() {
        let input = MINIMAL.replace("icon = \"B\"", "price_precision = 1");
        let err = Settings::from_toml_str(&input).expect_err("must fail");
        assert_eq!(err, missing("BTC", "icon"));
    }

    #[test]
    fn rejects_config_without_assets() {
        let input = "[general]\ncurrency = \"usd\"\ncurrency_symbol = \"$\"\n";
        let err = Settings::from_toml_str(input).expect_err("must fail");
        assert_eq!(err, ValidationError::NoAssets);
    }

    #[test]
    fn environment_key_wins_over_file_key() {
        let input = MINIMAL.replace(
            "currency_symbol = \"$\"",
            "currency_symbol = \"$\"\napi_key = \"from-file\"",
        );
        let settings = Settings::from_toml_str(&input).expect("valid config");

        assert_eq!(
            settings.resolve_api_key(Some(String::from("from-env"))),
            Ok(String::from("from-env"))
        );
        assert_eq!(
            settings.resolve_api_key(Some(String::new())),
            Ok(String::from("from-file"))
        );
        assert_eq!(
            settings.resolve_api_key(None),
            Ok(String::from("from-file"))
        );
    }

    #[test]
    fn empty_file_key_counts_as_missing() {
        let input = MINIMAL.replace(
            "currency_symbol = \"$\"",
            "currency_symbol = \"$\"\napi_key = \"\"",
        );
        let settings = Settings::from_toml_str(&input).expect("valid config");
        assert!(matches!(
            settings.resolve_api_key(None),
            Err(ValidationError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let input = MINIMAL.replace(
            "currency_symbol = \"$\"",
            "currency_symbol = \"$\"\napi_key = \"top-secret\"",
        );
        let settings = Settings::from_toml_str(&input).expect("valid config");
        assert!(!format!("{settings:?}").contains("top-secret"));
    }
}
