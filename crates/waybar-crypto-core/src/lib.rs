//! # Waybar Crypto Core
//!
//! Configuration resolution and rendering engine for the `waybar-crypto`
//! status-bar module.
//!
//! ## Overview
//!
//! - **Settings** load the TOML configuration into a validated [`RenderConfig`]
//! - **CoinMarketCap client** fetches a [`QuotesLatest`] response
//! - **Renderer** turns both into a [`RenderResult`] (`text`, `tooltip`, `class`)
//!
//! Rendering is pure: it performs no I/O and yields byte-identical output for
//! identical inputs.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`coinmarketcap`] | Latest-quotes API client |
//! | [`domain`] | Metrics, templates, precisions, response model |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`render`] | Main line / tooltip assembly |
//! | [`settings`] | Configuration file loading |
//! | [`source`] | Data-source error type |
//!
//! ## Quick Start
//!
//! ```rust
//! use waybar_crypto_core::{render, QuotesLatest, Settings};
//!
//! let settings = Settings::from_toml_str(r#"
//!     [general]
//!     currency = "eur"
//!     currency_symbol = "€"
//!
//!     [BTC]
//!     icon = "₿"
//!     price_precision = 1
//! "#)?;
//!
//! let quotes: QuotesLatest = serde_json::from_str(
//!     r#"{"data": {"BTC": {"quote": {"EUR": {"price": 62885.476}}}}}"#,
//! )?;
//!
//! let output = render(settings.render_config(), &quotes)?;
//! assert_eq!(output.text, "₿ €62885.5");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Format Precedence
//!
//! For each metric of each asset, lowest to highest priority:
//!
//! 1. built-in template ([`FormatTable`])
//! 2. currency symbol prepended to the built-in `price` template
//! 3. `format_<metric>` in `[general]`
//! 4. `format_<metric>` in the asset's table

pub mod coinmarketcap;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod render;
pub mod settings;
pub mod source;

pub use coinmarketcap::CoinMarketCapClient;

pub use domain::{
    category_for, find_asset, parse_metric_list, select_precision, FormatOverrides,
    FormatResolver, FormatTable, FormatTemplate, MetricId, PrecisionCategory, Precisions,
    QuoteData, QuoteEntry, QuotesLatest, ResponseStatus, UtcDateTime, DEFAULT_METRICS,
    DEFAULT_PRECISION, MAX_PRECISION, PRECISION_RULES, VALUE_SLOT,
};

pub use error::{ConfigError, CoreError, RenderError, ValidationError};

pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};

pub use render::{
    render, AssetConfig, Placement, RenderConfig, RenderResult, Renderer, CLASS_NAME,
};

pub use settings::{Settings, API_KEY_ENV};

pub use source::{SourceError, SourceErrorKind};
