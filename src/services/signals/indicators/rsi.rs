//! Relative Strength Index (RSI) indicator.

use crate::error::AnalysisError;
use crate::services::signals::{ensure_finite, require_periods, Indicator};
use crate::types::{IndicatorResult, IndicatorSignal, IndicatorValue, PriceSeries};

/// RSI (Relative Strength Index) indicator.
///
/// Compares the mean gain to the mean loss over the trailing `period` price
/// changes. Values range from 0-100:
/// - Below 30: Oversold (buy signal)
/// - Above 70: Overbought (sell signal)
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Calculate RSI from closing prices.
    ///
    /// Returns `None` when there is not enough data or when the window is
    /// flat (no gains and no losses), where RSI is undefined.
    pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
        if period == 0 || prices.len() < period + 1 {
            return None;
        }

        let window = &prices[prices.len() - period - 1..];
        let (gains, losses) = window
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .fold((0.0, 0.0), |(gains, losses), change| {
                if change > 0.0 {
                    (gains + change, losses)
                } else {
                    (gains, losses - change)
                }
            });

        let avg_gain = gains / period as f64;
        let avg_loss = losses / period as f64;

        if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                return None;
            }
            return Some(100.0);
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }

    /// Overbought reads bearish, oversold reads bullish.
    pub fn interpret(rsi: f64) -> IndicatorSignal {
        if rsi > 70.0 {
            IndicatorSignal::Bearish
        } else if rsi < 30.0 {
            IndicatorSignal::Bullish
        } else {
            IndicatorSignal::Neutral
        }
    }
}

impl Indicator for Rsi {
    fn id(&self) -> &'static str {
        "rsi"
    }

    fn name(&self) -> &str {
        "RSI (14)"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, series: &PriceSeries) -> Result<IndicatorResult, AnalysisError> {
        require_periods(self.id(), self.min_periods(), series.len())?;

        let Some(rsi) = Self::calculate_rsi(&series.prices(), self.period) else {
            return Ok(IndicatorResult::undefined());
        };
        let rsi = ensure_finite(self.id(), "value", rsi)?;

        Ok(IndicatorResult::new(
            IndicatorValue::rounded(rsi),
            Self::interpret(rsi),
        ))
    }
}
