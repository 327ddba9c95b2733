//! CoinMarketCap latest-quotes client.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::http_client::{HttpClient, HttpRequest};
use crate::{QuotesLatest, ResponseStatus, SourceError};

pub const API_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_API_ERROR_MESSAGE: &str = "coinmarketcap API error";

/// Fetches latest quotes for a set of symbols in one convert currency.
#[derive(Clone)]
pub struct CoinMarketCapClient {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl CoinMarketCapClient {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            base_url: String::from(API_URL),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request built for `symbols` (sent with their configured casing) and `currency`.
    pub fn request<S: AsRef<str>>(&self, symbols: &[S], currency: &str) -> HttpRequest {
        let symbol_list = symbols
            .iter()
            .map(|symbol| symbol.as_ref())
            .collect::<Vec<&str>>()
            .join(",");

        HttpRequest::get(&self.base_url)
            .with_query("convert", currency.to_ascii_uppercase())
            .with_query("symbol", symbol_list)
            .with_header(API_KEY_HEADER, &self.api_key)
            .with_header("Accept", "application/json")
            .with_timeout(self.timeout)
    }

    pub async fn quotes_latest<S: AsRef<str>>(
        &self,
        symbols: &[S],
        currency: &str,
    ) -> Result<QuotesLatest, SourceError> {
        let request = self.request(symbols, currency);
        debug!(symbol_count = symbols.len(), currency, "requesting latest quotes");

        let response = self.http_client.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                SourceError::timeout()
            } else {
                SourceError::transport(e.message())
            }
        })?;

        if !response.is_success() {
            let status = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|body| body.status)
                .unwrap_or_default();
            warn!(
                http_status = response.status,
                error_code = ?status.error_code,
                "coinmarketcap returned an error status"
            );

            return Err(SourceError::api(
                status
                    .error_message
                    .unwrap_or_else(|| String::from(DEFAULT_API_ERROR_MESSAGE)),
                status.error_code,
            ));
        }

        let quotes: QuotesLatest = serde_json::from_str(&response.body).map_err(|e| {
            debug!(error = %e, "failed to decode quotes body");
            SourceError::invalid_response("could not parse API response body as JSON")
        })?;

        debug!(
            asset_count = quotes.data.len(),
            credit_count = ?quotes.status.credit_count,
            "received latest quotes"
        );

        Ok(quotes)
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: ResponseStatus,
}
