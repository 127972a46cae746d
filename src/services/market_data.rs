//! Price history acquisition with a demo fallback.

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::sources::CoinGeckoClient;
use crate::types::{ChartData, PriceQuote, PriceSample, PriceSeries, PriceSource};

const HOUR_MS: i64 = 3_600_000;
/// CoinGecko returns 5-minute samples for a one-day range and hourly ones
/// from two days up.
const MIN_HOURLY_CHART_DAYS: u32 = 2;
const DEMO_BASE_PRICE: f64 = 67_000.0;
const DEMO_CHART_BASE_PRICE: f64 = 65_200.0;

/// Synthetic hourly market data for demos and offline runs.
#[derive(Debug, Clone, Default)]
pub struct DemoMarketData {
    seed: Option<u64>,
}

impl DemoMarketData {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// `days * 24` hourly samples ending at `now_ms`, oldest first.
    ///
    /// Noise of up to ±5000 around 67000 plus a 1000-amplitude sine wave
    /// with a 24-sample half period.
    pub fn price_history_at(&self, days: u32, now_ms: i64) -> PriceSeries {
        let mut rng = self.rng();
        let hours = days as i64 * 24;

        let samples = (0..hours)
            .map(|i| {
                let noise = rng.gen_range(-5000..=5000) as f64;
                PriceSample {
                    timestamp: now_ms - i * HOUR_MS,
                    price: DEMO_BASE_PRICE + noise + (i as f64 / 12.0).sin() * 1000.0,
                    volume: rng.gen_range(100_000_000..=2_000_000_000_i64) as f64,
                }
            })
            .collect();

        PriceSeries::new(samples)
    }

    pub fn price_history(&self, days: u32) -> PriceSeries {
        self.price_history_at(days, Utc::now().timestamp_millis())
    }

    pub fn quote(&self) -> PriceQuote {
        PriceQuote {
            price: 67_234.50,
            change_24h: 2.34,
            change_24h_amount: 1_567.89,
            source: PriceSource::Demo,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// One labelled point per hour for the `hours` hours before `now`.
    pub fn chart_at(&self, hours: u32, now: chrono::DateTime<Utc>) -> ChartData {
        let mut rng = self.rng();
        let labels = (1..=hours as i64)
            .rev()
            .map(|i| (now - Duration::hours(i)).format("%H:%M").to_string())
            .collect();
        let prices = (0..hours)
            .map(|_| DEMO_CHART_BASE_PRICE + rng.gen_range(-2000..=2000) as f64)
            .collect();

        ChartData { labels, prices }
    }

    pub fn chart(&self, hours: u32) -> ChartData {
        self.chart_at(hours, Utc::now())
    }
}

/// Market data for one asset: CoinGecko when enabled, demo data otherwise
/// or whenever the upstream call fails.
#[derive(Clone)]
pub struct MarketDataService {
    asset_id: String,
    coingecko: Option<CoinGeckoClient>,
    demo: DemoMarketData,
}

impl MarketDataService {
    pub fn new(asset_id: String, coingecko: Option<CoinGeckoClient>, demo: DemoMarketData) -> Self {
        Self {
            asset_id,
            coingecko,
            demo,
        }
    }

    /// Demo data only.
    pub fn demo(asset_id: &str, seed: Option<u64>) -> Self {
        Self::new(asset_id.to_string(), None, DemoMarketData::new(seed))
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn is_live(&self) -> bool {
        self.coingecko.is_some()
    }

    pub async fn price_history(&self, days: u32) -> PriceSeries {
        if let Some(ref client) = self.coingecko {
            match client.market_chart(&self.asset_id, days).await {
                Ok(series) => return series,
                Err(e) => warn!("Price history unavailable, using demo data: {}", e),
            }
        }
        self.demo.price_history(days)
    }

    pub async fn current_price(&self) -> PriceQuote {
        if let Some(ref client) = self.coingecko {
            match client.simple_price(&self.asset_id).await {
                Ok(quote) => return quote,
                Err(e) => warn!("Spot price unavailable, using demo quote: {}", e),
            }
        }
        self.demo.quote()
    }

    /// Hourly chart for the last `hours` hours.
    pub async fn chart(&self, hours: u32) -> ChartData {
        if let Some(ref client) = self.coingecko {
            let days = ((hours + 23) / 24).max(MIN_HOURLY_CHART_DAYS);
            match client.market_chart(&self.asset_id, days).await {
                Ok(series) => return chart_from_series(&series, hours as usize),
                Err(e) => warn!("Chart data unavailable, using demo data: {}", e),
            }
        }
        self.demo.chart(hours)
    }
}

/// Keep the latest sample of each clock hour.
fn hourly_samples(samples: &[PriceSample]) -> Vec<PriceSample> {
    let mut hourly: Vec<PriceSample> = Vec::with_capacity(samples.len());

    for sample in samples {
        let bucket = sample.timestamp.div_euclid(HOUR_MS);
        match hourly.last_mut() {
            Some(last) if last.timestamp.div_euclid(HOUR_MS) == bucket => *last = *sample,
            _ => hourly.push(*sample),
        }
    }

    hourly
}

/// The last `hours` hours, one point per hour, labelled by hour and minute.
fn chart_from_series(series: &PriceSeries, hours: usize) -> ChartData {
    let samples = hourly_samples(series.samples());
    let recent = &samples[samples.len().saturating_sub(hours)..];

    let labels = recent
        .iter()
        .map(|s| match Utc.timestamp_millis_opt(s.timestamp).single() {
            Some(time) => time.format("%H:%M").to_string(),
            None => String::new(),
        })
        .collect();
    let prices = recent.iter().map(|s| s.price).collect();

    ChartData { labels, prices }
}
