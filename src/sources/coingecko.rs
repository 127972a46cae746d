use crate::error::{AppError, Result};
use crate::types::{PriceQuote, PriceSeries, PriceSource};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
const COINGECKO_PRO_API_URL: &str = "https://pro-api.coingecko.com/api/v3";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// `/coins/{id}/market_chart` payload: `[timestamp_ms, value]` pairs.
#[derive(Debug, Deserialize)]
struct MarketChart {
    prices: Vec<(f64, f64)>,
    total_volumes: Vec<(f64, f64)>,
}

#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}

/// CoinGecko REST client.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl CoinGeckoClient {
    /// Create a new CoinGecko client.
    pub fn new(api_key: Option<String>) -> Self {
        let base_url = if api_key.is_some() {
            COINGECKO_PRO_API_URL
        } else {
            COINGECKO_API_URL
        };
        Self::with_base_url(api_key, base_url)
    }

    /// Create a client against a custom endpoint.
    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> Self {
        // Create client with proper User-Agent
        let client = Client::builder()
            .user_agent("Sibyl/0.1 (Composite Signal Server)")
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn with_key(&self, mut url: String) -> String {
        if let Some(ref key) = self.api_key {
            url.push_str(&format!("&x_cg_pro_api_key={}", key));
        }
        url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "CoinGecko returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetch hourly price and volume history for the last `days` days.
    pub async fn market_chart(&self, asset_id: &str, days: u32) -> Result<PriceSeries> {
        let url = self.with_key(format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url, asset_id, days
        ));

        info!("Fetching {} days of CoinGecko history for {}", days, asset_id);
        let chart: MarketChart = self.get_json(&url).await?;
        let series = series_from_chart(chart)?;
        debug!("CoinGecko returned {} samples for {}", series.len(), asset_id);

        Ok(series)
    }

    /// Fetch the spot price and 24h change.
    pub async fn simple_price(&self, asset_id: &str) -> Result<PriceQuote> {
        let url = self.with_key(format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url, asset_id
        ));

        let mut prices: HashMap<String, SimplePrice> = self.get_json(&url).await?;
        let quote = prices
            .remove(asset_id)
            .ok_or_else(|| AppError::NotFound(format!("No CoinGecko price for {}", asset_id)))?;

        let price = quote
            .usd
            .ok_or_else(|| AppError::ExternalApi("CoinGecko price missing usd".into()))?;
        let change_24h = quote.usd_24h_change.unwrap_or(0.0);

        Ok(PriceQuote {
            price,
            change_24h,
            change_24h_amount: price * change_24h / 100.0,
            source: PriceSource::CoinGecko,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Pair up prices and volumes by position; CoinGecko returns them aligned.
fn series_from_chart(chart: MarketChart) -> Result<PriceSeries> {
    let timestamps = chart.prices.iter().map(|(t, _)| *t as i64).collect();
    let prices = chart.prices.iter().map(|(_, p)| *p).collect();
    let volumes = chart.total_volumes.iter().map(|(_, v)| *v).collect();

    let series = PriceSeries::from_columns(timestamps, prices, volumes)?;
    if series.is_empty() {
        return Err(AppError::ExternalApi("CoinGecko returned no prices".into()));
    }
    Ok(series)
}
