use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AnalysisError;

/// Where a series or quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    CoinGecko,
    Demo,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSource::CoinGecko => write!(f, "coingecko"),
            PriceSource::Demo => write!(f, "demo"),
        }
    }
}

/// One observation of price and traded volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub price: f64,
    pub volume: f64,
}

/// Chronologically ascending price/volume history for a single asset.
///
/// Immutable once built; indicators only ever borrow it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    /// Build from samples, ordering them by timestamp.
    pub fn new(mut samples: Vec<PriceSample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        Self { samples }
    }

    /// Build from parallel columns of equal length.
    pub fn from_columns(
        timestamps: Vec<i64>,
        prices: Vec<f64>,
        volumes: Vec<f64>,
    ) -> Result<Self, AnalysisError> {
        if prices.len() != volumes.len() || prices.len() != timestamps.len() {
            return Err(AnalysisError::LengthMismatch {
                prices: prices.len(),
                volumes: volumes.len(),
                timestamps: timestamps.len(),
            });
        }

        let samples = timestamps
            .into_iter()
            .zip(prices)
            .zip(volumes)
            .map(|((timestamp, price), volume)| PriceSample {
                timestamp,
                price,
                volume,
            })
            .collect();

        Ok(Self::new(samples))
    }

    /// Build from prices and volumes alone, numbering samples 0, 1, 2...
    pub fn from_prices_and_volumes(
        prices: Vec<f64>,
        volumes: Vec<f64>,
    ) -> Result<Self, AnalysisError> {
        let timestamps = (0..prices.len() as i64).collect();
        Self::from_columns(timestamps, prices, volumes)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    pub fn prices(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.price).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.volume).collect()
    }

    /// Most recent price, if any.
    pub fn last_price(&self) -> Option<f64> {
        self.samples.last().map(|s| s.price)
    }
}

/// Spot price with 24h change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: f64,
    /// 24h change in percent.
    pub change_24h: f64,
    /// 24h change in quote currency.
    pub change_24h_amount: f64,
    pub source: PriceSource,
    /// ISO-8601 time the quote was produced.
    pub timestamp: String,
}

/// Labelled price points for the dashboard chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_rejects_mismatch() {
        let err = PriceSeries::from_columns(vec![1, 2], vec![1.0, 2.0], vec![10.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::LengthMismatch { prices: 2, volumes: 1, .. }));
    }

    #[test]
    fn test_new_sorts_by_timestamp() {
        let series = PriceSeries::new(vec![
            PriceSample { timestamp: 3, price: 30.0, volume: 1.0 },
            PriceSample { timestamp: 1, price: 10.0, volume: 1.0 },
            PriceSample { timestamp: 2, price: 20.0, volume: 1.0 },
        ]);
        assert_eq!(series.prices(), vec![10.0, 20.0, 30.0]);
        assert_eq!(series.last_price(), Some(30.0));
    }

    #[test]
    fn test_price_source_display() {
        assert_eq!(PriceSource::CoinGecko.to_string(), "coingecko");
        assert_eq!(PriceSource::Demo.to_string(), "demo");
    }
}
