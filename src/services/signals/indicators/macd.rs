//! MACD (Moving Average Convergence Divergence) indicator.

use crate::error::AnalysisError;
use crate::services::signals::{ema_series, ensure_finite, require_periods, Indicator};
use crate::types::{IndicatorResult, IndicatorSignal, IndicatorValue, PriceSeries};

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
///
/// MACD above its signal line is bullish, anything else bearish.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// Latest MACD and signal line values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdLines {
    pub macd: f64,
    pub signal: f64,
}

impl MacdLines {
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    /// Calculate the latest MACD and signal line values.
    pub fn calculate_lines(&self, prices: &[f64]) -> Option<MacdLines> {
        let fast_ema = ema_series(prices, self.fast_period);
        let slow_ema = ema_series(prices, self.slow_period);

        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = ema_series(&macd_line, self.signal_period);

        Some(MacdLines {
            macd: *macd_line.last()?,
            signal: *signal_line.last()?,
        })
    }

    /// Binary: there is no neutral band.
    pub fn interpret(lines: &MacdLines) -> IndicatorSignal {
        if lines.macd > lines.signal {
            IndicatorSignal::Bullish
        } else {
            IndicatorSignal::Bearish
        }
    }
}

impl Indicator for Macd {
    fn id(&self) -> &'static str {
        "macd"
    }

    fn name(&self) -> &str {
        "MACD"
    }

    fn min_periods(&self) -> usize {
        self.slow_period + self.signal_period
    }

    fn evaluate(&self, series: &PriceSeries) -> Result<IndicatorResult, AnalysisError> {
        require_periods(self.id(), self.min_periods(), series.len())?;

        let lines = self
            .calculate_lines(&series.prices())
            .ok_or_else(|| AnalysisError::ComputationFailure("macd has no output".into()))?;
        ensure_finite(self.id(), "macd line", lines.macd)?;
        ensure_finite(self.id(), "signal line", lines.signal)?;

        Ok(IndicatorResult::new(
            IndicatorValue::rounded(lines.histogram()),
            Self::interpret(&lines),
        ))
    }
}
