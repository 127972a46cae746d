//! Simple Moving Average (SMA) alignment indicator.

use crate::error::AnalysisError;
use crate::services::signals::{ensure_finite, require_periods, sma, Indicator};
use crate::types::{IndicatorResult, IndicatorSignal, IndicatorValue, PriceSeries};

/// Compares price against a short and a long SMA.
///
/// Bullish only when price > SMA(short) > SMA(long), bearish only when
/// price < SMA(short) < SMA(long). Any other ordering is neutral.
/// The displayed value is the short/long spread.
pub struct MovingAverages {
    short_period: usize,
    long_period: usize,
}

impl Default for MovingAverages {
    fn default() -> Self {
        Self {
            short_period: 20,
            long_period: 50,
        }
    }
}

impl MovingAverages {
    pub fn new(short_period: usize, long_period: usize) -> Self {
        Self {
            short_period,
            long_period,
        }
    }

    pub fn interpret(price: f64, short_sma: f64, long_sma: f64) -> IndicatorSignal {
        if price > short_sma && short_sma > long_sma {
            IndicatorSignal::Bullish
        } else if price < short_sma && short_sma < long_sma {
            IndicatorSignal::Bearish
        } else {
            IndicatorSignal::Neutral
        }
    }
}

impl Indicator for MovingAverages {
    fn id(&self) -> &'static str {
        "moving_averages"
    }

    fn name(&self) -> &str {
        "SMA (20/50)"
    }

    fn min_periods(&self) -> usize {
        self.short_period.max(self.long_period)
    }

    fn evaluate(&self, series: &PriceSeries) -> Result<IndicatorResult, AnalysisError> {
        require_periods(self.id(), self.min_periods(), series.len())?;

        let prices = series.prices();
        let (Some(short_sma), Some(long_sma), Some(price)) = (
            sma(&prices, self.short_period),
            sma(&prices, self.long_period),
            series.last_price(),
        ) else {
            return Err(AnalysisError::ComputationFailure(
                "moving averages window empty".into(),
            ));
        };
        ensure_finite(self.id(), "short sma", short_sma)?;
        ensure_finite(self.id(), "long sma", long_sma)?;

        Ok(IndicatorResult::new(
            IndicatorValue::rounded(short_sma - long_sma),
            Self::interpret(price, short_sma, long_sma),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(prices: Vec<f64>) -> PriceSeries {
        let volumes = vec![1000.0; prices.len()];
        PriceSeries::from_prices_and_volumes(prices, volumes).unwrap()
    }

    #[test]
    fn test_moving_averages_needs_long_window() {
        let err = MovingAverages::default()
            .evaluate(&series(vec![100.0; 49]))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { required: 50, .. }));
    }

    #[test]
    fn test_moving_averages_uptrend_bullish() {
        let prices = (0..60).map(|i| 100.0 + i as f64).collect();
        let result = MovingAverages::default().evaluate(&series(prices)).unwrap();
        assert_eq!(result.signal, IndicatorSignal::Bullish);
        // SMA20 of 140..=159 is 149.5, SMA50 of 110..=159 is 134.5
        assert_eq!(result.value, Some(IndicatorValue::Number(15.0)));
    }

    #[test]
    fn test_moving_averages_downtrend_bearish() {
        let prices = (0..60).map(|i| 300.0 - i as f64).collect();
        let result = MovingAverages::default().evaluate(&series(prices)).unwrap();
        assert_eq!(result.signal, IndicatorSignal::Bearish);
    }

    #[test]
    fn test_moving_averages_orderings_must_be_strict() {
        assert_eq!(MovingAverages::interpret(110.0, 105.0, 100.0), IndicatorSignal::Bullish);
        assert_eq!(MovingAverages::interpret(110.0, 105.0, 105.0), IndicatorSignal::Neutral);
        assert_eq!(MovingAverages::interpret(105.0, 105.0, 100.0), IndicatorSignal::Neutral);
        assert_eq!(MovingAverages::interpret(110.0, 100.0, 105.0), IndicatorSignal::Neutral);
        assert_eq!(MovingAverages::interpret(90.0, 95.0, 100.0), IndicatorSignal::Bearish);
    }
}
