//! Volume trend indicator.

use crate::error::AnalysisError;
use crate::services::signals::{ensure_finite, require_periods, Indicator};
use crate::types::{IndicatorResult, IndicatorSignal, IndicatorValue, PriceSeries};

/// Compares the mean of the most recent volumes to the mean of everything
/// before them.
///
/// - Recent mean above 1.2x the prior mean = bullish ("High")
/// - Recent mean below 0.8x the prior mean = bearish ("Low")
pub struct VolumeTrend {
    recent_window: usize,
    min_samples: usize,
    high_ratio: f64,
    low_ratio: f64,
}

impl Default for VolumeTrend {
    fn default() -> Self {
        Self {
            recent_window: 5,
            min_samples: 10,
            high_ratio: 1.2,
            low_ratio: 0.8,
        }
    }
}

impl VolumeTrend {
    /// Mean of the recent window and mean of the samples preceding it.
    pub fn window_means(&self, volumes: &[f64]) -> Option<(f64, f64)> {
        if volumes.len() <= self.recent_window {
            return None;
        }
        let split = volumes.len() - self.recent_window;
        let (prior, recent) = volumes.split_at(split);

        let recent_mean = recent.iter().sum::<f64>() / recent.len() as f64;
        let prior_mean = prior.iter().sum::<f64>() / prior.len() as f64;
        Some((recent_mean, prior_mean))
    }

    /// Compared multiplicatively, so a zero prior mean needs no division.
    pub fn interpret(&self, recent_mean: f64, prior_mean: f64) -> IndicatorSignal {
        if recent_mean > prior_mean * self.high_ratio {
            IndicatorSignal::Bullish
        } else if recent_mean < prior_mean * self.low_ratio {
            IndicatorSignal::Bearish
        } else {
            IndicatorSignal::Neutral
        }
    }

    fn describe(signal: IndicatorSignal) -> &'static str {
        match signal {
            IndicatorSignal::Bullish => "High",
            IndicatorSignal::Neutral => "Normal",
            IndicatorSignal::Bearish => "Low",
        }
    }
}

impl Indicator for VolumeTrend {
    fn id(&self) -> &'static str {
        "volume_trend"
    }

    fn name(&self) -> &str {
        "Volume Trend"
    }

    fn min_periods(&self) -> usize {
        self.min_samples.max(self.recent_window + 1)
    }

    fn evaluate(&self, series: &PriceSeries) -> Result<IndicatorResult, AnalysisError> {
        require_periods(self.id(), self.min_periods(), series.len())?;

        let (recent_mean, prior_mean) = self
            .window_means(&series.volumes())
            .ok_or_else(|| AnalysisError::ComputationFailure("volume window empty".into()))?;
        ensure_finite(self.id(), "recent mean", recent_mean)?;
        ensure_finite(self.id(), "prior mean", prior_mean)?;

        let signal = self.interpret(recent_mean, prior_mean);
        Ok(IndicatorResult::new(
            IndicatorValue::label(Self::describe(signal)),
            signal,
        ))
    }
}
