//! Behaviour-driven tests for status-bar rendering.
//!
//! These tests exercise configuration and provider payloads together, the way a
//! single invocation of the bar module does.

use waybar_crypto_core::{CoreError, RenderError, ValidationError, MAX_PRECISION};
use waybar_crypto_tests::*;

const TWO_ASSETS: &str = r#"
    [general]
    currency = "usd"
    currency_symbol = "$"
    spacer_symbol = "|"

    [B]
    icon = "B"

    [E]
    icon = "E"
"#;

// =============================================================================
// Main line assembly
// =============================================================================

#[test]
fn when_two_assets_share_the_main_line_they_are_joined_by_the_spacer() {
    // Given: two main-line assets and a "|" spacer
    let settings = settings(TWO_ASSETS);
    let quotes = price_quotes("USD", &[("B", 1.0), ("E", 2.0)]);

    // When: the response is rendered
    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    // Then: blocks appear in configured order with one padded spacer between them
    assert_eq!(output.text, "B $1.00 | E $2.00");
    assert_eq!(output.tooltip, "");
    assert_eq!(output.class, "crypto");
}

#[test]
fn when_no_spacer_is_configured_blocks_are_separated_by_one_space() {
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"

        [B]
        icon = "B"

        [E]
        icon = "E"
        "#,
    );
    let quotes = price_quotes("USD", &[("B", 1.0), ("E", 2.0)]);

    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    assert_eq!(output.text, "B $1.00 E $2.00");
}

#[test]
fn when_a_tooltip_asset_sits_between_main_line_assets_no_separator_is_doubled() {
    // Given: B and S on the main line, E in the tooltip
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"
        spacer_symbol = "|"

        [B]
        icon = "B"

        [E]
        icon = "E"
        in_tooltip = true

        [S]
        icon = "S"
        "#,
    );
    let quotes = price_quotes("USD", &[("B", 1.0), ("E", 2.0), ("S", 3.0)]);

    // When
    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    // Then: separators only sit between populated entries
    assert_eq!(output.text, "B $1.00 | S $3.00");
    assert_eq!(output.tooltip, "E $2.00");
}

#[test]
fn when_every_asset_is_in_the_tooltip_the_main_line_shows_all_icons() {
    // Given: both assets moved to the tooltip
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"
        spacer_symbol = "|"

        [B]
        icon = "B"
        in_tooltip = true

        [E]
        icon = "E"
        in_tooltip = true
        "#,
    );
    let quotes = price_quotes("USD", &[("B", 1.0), ("E", 2.0)]);

    // When
    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    // Then: the bar is never blank and the tooltip lines are newline-joined
    assert_eq!(output.text, "BE");
    assert_eq!(output.tooltip, "B $1.00\nE $2.00");
}

#[test]
fn when_rendering_twice_output_is_identical() {
    let settings = settings(TWO_ASSETS);
    let quotes = price_quotes("USD", &[("B", 1.23456), ("E", 2.5e3)]);
    let renderer = Renderer::new(settings.render_config()).expect("valid config");

    let first = renderer.render(&quotes).expect("render succeeds");
    let second = renderer.render(&quotes).expect("render succeeds");

    assert_eq!(first, second);
}

// =============================================================================
// Metrics, templates and precision
// =============================================================================

#[test]
fn when_several_metrics_are_displayed_they_follow_the_display_order() {
    // Given: change before price
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"
        display = "percent_change_24h,price"

        [B]
        icon = "B"
        "#,
    );
    let quotes = quotes_from_json(
        r#"{"data": {"B": {"quote": {"USD": {"price": 10.0, "percent_change_24h": -1.234}}}}}"#,
    );

    // When
    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    // Then: built-in change template with default precision, then price
    assert_eq!(output.text, "B 24h:-1.23% $10.00");
}

#[test]
fn when_formats_are_overridden_the_asset_layer_beats_the_global_layer() {
    // Given: a global price override and an asset-level one for B only
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"
        display = "price,percent_change_1h"
        format_price = "P{val:.{dp}f}"

        [B]
        icon = "B"
        format_price = "A{val:.{dp}f}"

        [E]
        icon = "E"
        "#,
    );
    let quotes = quotes_from_json(
        r#"{"data": {
            "B": {"quote": {"USD": {"price": 1.0, "percent_change_1h": 0.5}}},
            "E": {"quote": {"USD": {"price": 2.0, "percent_change_1h": 0.25}}}
        }}"#,
    );

    // When
    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    // Then: asset override for B, global for E, built-in for the untouched metric
    assert_eq!(output.text, "B A1.00 1h:0.50% E P2.00 1h:0.25%");
}

#[test]
fn when_volume_metrics_render_they_use_volume_precision() {
    // Given: distinct precisions per category
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"
        display = "price,volume_24h,volume_change_24h,percent_change_7d"

        [B]
        icon = "B"
        price_precision = 3
        change_precision = 4
        volume_precision = 0
        "#,
    );
    let quotes = quotes_from_json(
        r#"{"data": {"B": {"quote": {"USD": {
            "price": 1.5, "volume_24h": 15000000000.4,
            "volume_change_24h": -5.27, "percent_change_7d": 1.5
        }}}}}"#,
    );

    // When
    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    // Then: "volume" is matched before "change" for volume_change_24h
    assert_eq!(
        output.text,
        "B $1.500 24hVol:15000000000 24hVol:-5% 7d:1.5000%"
    );
}

#[test]
fn when_price_precision_is_one_the_euro_price_is_rounded() {
    let settings = settings(
        r#"
        [general]
        currency = "eur"
        currency_symbol = "€"

        [BTC]
        icon = "₿"
        price_precision = 1
        "#,
    );
    let quotes = quotes_from_json(r#"{"data": {"BTC": {"quote": {"EUR": {"price": 62885.476}}}}}"#);

    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    assert_eq!(output.text, "₿ €62885.5");
}

// =============================================================================
// Symbol lookup
// =============================================================================

#[test]
fn when_the_provider_changes_symbol_casing_the_asset_is_still_found() {
    // Given: configured as XAUT, returned as XAUt
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"

        [XAUT]
        icon = "Au"
        "#,
    );
    let quotes = price_quotes("USD", &[("XAUt", 2401.456)]);

    // When
    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    // Then
    assert_eq!(output.text, "Au $2401.46");
}

#[test]
fn when_an_asset_is_missing_from_the_response_nothing_is_rendered() {
    // Given: DOGE is configured but absent from the payload
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"

        [BTC]
        icon = "B"

        [DOGE]
        icon = "D"
        "#,
    );
    let quotes = price_quotes("USD", &[("BTC", 1.0)]);

    // When
    let result = render(settings.render_config(), &quotes);

    // Then: the whole render fails, no partial output
    match result {
        Err(CoreError::Render(RenderError::SymbolNotFound { symbol })) => {
            assert_eq!(symbol, "DOGE");
        }
        other => panic!("expected SymbolNotFound, got {other:?}"),
    }
}

#[test]
fn when_the_currency_is_missing_from_the_response_render_fails() {
    let settings = settings(TWO_ASSETS);
    let quotes = price_quotes("EUR", &[("B", 1.0), ("E", 2.0)]);

    let result = render(settings.render_config(), &quotes);

    assert!(matches!(
        result,
        Err(CoreError::Render(RenderError::CurrencyNotFound { .. }))
    ));
}

#[test]
fn when_a_requested_metric_is_null_render_fails() {
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"
        display = "price,volume_change_24h"

        [B]
        icon = "B"
        "#,
    );
    let quotes = quotes_from_json(
        r#"{"data": {"B": {"quote": {"USD": {"price": 1.0, "volume_change_24h": null}}}}}"#,
    );

    let result = render(settings.render_config(), &quotes);

    assert!(matches!(
        result,
        Err(CoreError::Render(RenderError::MissingMetric {
            metric: MetricId::VolumeChange24h,
            ..
        }))
    ));
}

// =============================================================================
// Programmatic configuration
// =============================================================================

#[test]
fn when_config_is_built_in_code_it_renders_like_a_parsed_one() {
    let template = FormatTemplate::parse("~{val:.{dp}f}").expect("valid template");
    let config = RenderConfig::new("USD", "$")
        .with_spacer("/")
        .with_asset(AssetConfig::new("B", "B").with_format(MetricId::Price, template))
        .with_asset(
            AssetConfig::new("E", "E")
                .with_precisions(Precisions::new(0, 2, 2))
                .with_placement(Placement::MainLine),
        );
    let quotes = price_quotes("USD", &[("B", 1.0), ("E", 2.4)]);

    let output = render(&config, &quotes).expect("render succeeds");

    assert_eq!(output.text, "B ~1.00 / E $2");
}

#[test]
fn when_a_config_built_in_code_has_an_oversized_precision_render_fails_cleanly() {
    // Given: a precision one past the supported maximum
    let config = RenderConfig::new("USD", "$").with_asset(
        AssetConfig::new("B", "B").with_precisions(Precisions::new(2, 2, MAX_PRECISION + 1)),
    );
    let quotes = price_quotes("USD", &[("B", 1.0)]);

    // When
    let result = render(&config, &quotes);

    // Then: a validation error, not a formatter panic
    match result {
        Err(CoreError::Validation(ValidationError::InvalidOption { field, .. })) => {
            assert_eq!(field, "volume_precision");
        }
        other => panic!("expected InvalidOption, got {other:?}"),
    }
}

#[test]
fn when_two_keys_differ_only_by_case_the_first_listed_is_used() {
    // Given: the provider lists "xaUT" before "XAUt"
    let settings = settings(
        r#"
        [general]
        currency = "usd"
        currency_symbol = "$"

        [Xaut]
        icon = "Au"
        "#,
    );
    let quotes = quotes_from_json(
        r#"{"data": {
            "xaUT": {"quote": {"USD": {"price": 1.0}}},
            "XAUt": {"quote": {"USD": {"price": 2.0}}}
        }}"#,
    );

    // When
    let output = render(settings.render_config(), &quotes).expect("render succeeds");

    // Then: response order decides, not key sort order
    assert_eq!(output.text, "Au $1.00");
}
