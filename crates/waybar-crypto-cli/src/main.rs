mod cli;
mod error;
mod logging;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};
use waybar_crypto_core::{
    CoinMarketCapClient, Renderer, ReqwestHttpClient, Settings, UtcDateTime, API_KEY_ENV,
};

use crate::cli::{expand_tilde, Cli};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init(cli.log_level, cli.log_format)?;

    let config_path = expand_tilde(&cli.config_path, std::env::var_os("HOME"));
    if !config_path.is_file() {
        return Err(CliError::ConfigNotFound { path: config_path });
    }

    let settings = Settings::from_path(&config_path)?;
    let api_key = settings.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;
    let config = settings.render_config();
    let renderer = Renderer::new(config)?;
    info!(
        path = %config_path.display(),
        assets = config.assets.len(),
        currency = %config.currency,
        "loaded configuration"
    );

    let client = CoinMarketCapClient::new(Arc::new(ReqwestHttpClient::new()), api_key);
    let quotes = client
        .quotes_latest(&settings.symbols(), &config.currency)
        .await?;

    if let Some(oldest) = quotes.oldest_update(&config.currency) {
        debug!(
            last_updated = %oldest.format_rfc3339(),
            age_secs = oldest.age_at(UtcDateTime::now()).whole_seconds(),
            "quote freshness"
        );
    }

    let result = renderer.render(&quotes)?;
    output::write(&result, cli.pretty)
}
