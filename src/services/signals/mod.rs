//! Trading signals service module.
//!
//! Provides the technical indicator engine, the aggregate technical score,
//! and the fusion stage that blends it with market sentiment.

pub mod analyzer;
pub mod fusion;
pub mod indicators;

pub use analyzer::{analyze_technical, overall_score, FallbackPolicy, TechnicalAnalyzer};
pub use fusion::{predict, FusionWeights, Predictor};

use crate::error::AnalysisError;
use crate::types::{IndicatorResult, PriceSeries};

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Unique identifier for this indicator.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Minimum number of samples required for calculation.
    fn min_periods(&self) -> usize;

    /// Evaluate the indicator on the series.
    ///
    /// Returns `InsufficientData` below `min_periods` and `ComputationFailure`
    /// when arithmetic yields a non-finite value.
    fn evaluate(&self, series: &PriceSeries) -> Result<IndicatorResult, AnalysisError>;
}

/// Fail with `InsufficientData` unless `available >= required`.
pub fn require_periods(
    indicator: &'static str,
    required: usize,
    available: usize,
) -> Result<(), AnalysisError> {
    if available < required {
        return Err(AnalysisError::InsufficientData {
            indicator,
            required,
            available,
        });
    }
    Ok(())
}

/// Pass finite values through, reject NaN and infinities.
pub fn ensure_finite(indicator: &str, what: &str, value: f64) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::ComputationFailure(format!(
            "{} produced non-finite {}",
            indicator, what
        )))
    }
}

/// Mean of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Sample standard deviation (n - 1 denominator) of the trailing `period` values.
pub fn sample_std_dev(values: &[f64], period: usize) -> Option<f64> {
    if period < 2 {
        return None;
    }
    let mean = sma(values, period)?;
    let window = &values[values.len() - period..];
    let variance =
        window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (period - 1) as f64;
    Some(variance.sqrt())
}

/// Bias-adjusted exponential moving average with the given span.
///
/// `alpha = 2 / (span + 1)`. Every input yields an output, starting from the
/// first sample, weighted by `(1 - alpha)^age` and normalized by the total
/// weight seen so far. Written in incremental form so a constant input stays
/// exactly constant.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;

    let mut total_weight = 0.0;
    let mut ema = Vec::with_capacity(values.len());

    for &value in values {
        total_weight = 1.0 + decay * total_weight;
        let next = match ema.last() {
            Some(&prev) => prev + (value - prev) / total_weight,
            None => value,
        };
        ema.push(next);
    }

    ema
}
