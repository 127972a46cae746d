//! Indicator engine: runs the five indicators over a price series and
//! aggregates their votes into a technical score.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::services::signals::indicators::{
    BollingerBands, Macd, MovingAverages, Rsi, VolumeTrend,
};
use crate::services::signals::Indicator;
use crate::types::{
    Analysis, IndicatorResult, IndicatorSet, IndicatorSignal, IndicatorValue, PriceSeries,
    TechnicalScore,
};

/// Neutral technical score.
const NEUTRAL_SCORE: f64 = 50.0;
/// Points added per unit of mean vote.
const VOTE_SCALE: f64 = 20.0;

/// Aggregate indicator votes into a score in [0, 100].
///
/// With five votes in {-1, 0, 1} the result stays within [30, 70]; the clamp
/// keeps the range valid if the scale or vote magnitudes ever grow.
pub fn overall_score(signals: &[IndicatorSignal]) -> f64 {
    if signals.is_empty() {
        return NEUTRAL_SCORE;
    }
    let mean = signals.iter().map(|s| s.value() as f64).sum::<f64>() / signals.len() as f64;
    (mean * VOTE_SCALE + NEUTRAL_SCORE).clamp(0.0, 100.0)
}

/// How the placeholder result is produced when analysis fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Score 70, RSI 55.0, MACD 0.0.
    #[default]
    Fixed,
    /// Score in [60, 80], RSI in [40, 70), MACD in [-500, 500), drawn from
    /// a generator seeded afresh on every call.
    Seeded(u64),
}

impl FallbackPolicy {
    /// Build the placeholder technical score.
    pub fn placeholder(&self) -> TechnicalScore {
        let (overall_score, rsi, macd) = match *self {
            FallbackPolicy::Fixed => (70.0, 55.0, 0.0),
            FallbackPolicy::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                let score = rng.gen_range(60..=80) as f64;
                (score, rng.gen_range(40.0..70.0), rng.gen_range(-500.0..500.0))
            }
        };

        TechnicalScore {
            overall_score,
            indicators: IndicatorSet {
                rsi: IndicatorResult::new(IndicatorValue::rounded(rsi), IndicatorSignal::Neutral),
                macd: IndicatorResult::new(IndicatorValue::rounded(macd), IndicatorSignal::Bullish),
                bollinger_bands: IndicatorResult::new(
                    IndicatorValue::label("Middle"),
                    IndicatorSignal::Neutral,
                ),
                moving_averages: IndicatorResult::new(
                    IndicatorValue::rounded(0.0),
                    IndicatorSignal::Neutral,
                ),
                volume_trend: IndicatorResult::new(
                    IndicatorValue::label("High"),
                    IndicatorSignal::Bullish,
                ),
            },
        }
    }
}

/// Stateless technical analysis engine.
///
/// Holds only indicator parameters, so one instance can be shared across
/// concurrent requests without locking.
#[derive(Default)]
pub struct TechnicalAnalyzer {
    rsi: Rsi,
    macd: Macd,
    bollinger: BollingerBands,
    moving_averages: MovingAverages,
    volume_trend: VolumeTrend,
    fallback: FallbackPolicy,
}

impl TechnicalAnalyzer {
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Indicators in score order.
    pub fn indicators(&self) -> [&dyn Indicator; 5] {
        [
            &self.rsi,
            &self.macd,
            &self.bollinger,
            &self.moving_averages,
            &self.volume_trend,
        ]
    }

    /// Samples needed for every indicator to produce a value.
    pub fn required_samples(&self) -> usize {
        self.indicators()
            .iter()
            .map(|i| i.min_periods())
            .max()
            .unwrap_or(0)
    }

    /// Analyze a series. Never fails: on a computation failure the result is
    /// the fallback placeholder, tagged with the reason.
    pub fn analyze(&self, series: &PriceSeries) -> Analysis<TechnicalScore> {
        match self.try_analyze(series) {
            Ok(score) => Analysis::Ok(score),
            Err(e) => {
                warn!("Technical analysis fell back to placeholder: {}", e);
                Analysis::fallback(self.fallback.placeholder(), e.to_string())
            }
        }
    }

    fn try_analyze(&self, series: &PriceSeries) -> Result<TechnicalScore, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::ComputationFailure("empty price series".into()));
        }
        if let Some(bad) = series
            .samples()
            .iter()
            .find(|s| !s.price.is_finite() || !s.volume.is_finite())
        {
            return Err(AnalysisError::ComputationFailure(format!(
                "non-finite sample at timestamp {}",
                bad.timestamp
            )));
        }

        debug!(
            "Computing technical score over {} samples ({} needed for full coverage)",
            series.len(),
            self.required_samples()
        );

        let indicators = IndicatorSet {
            rsi: Self::run(&self.rsi, series)?,
            macd: Self::run(&self.macd, series)?,
            bollinger_bands: Self::run(&self.bollinger, series)?,
            moving_averages: Self::run(&self.moving_averages, series)?,
            volume_trend: Self::run(&self.volume_trend, series)?,
        };

        Ok(TechnicalScore {
            overall_score: overall_score(&indicators.signals()),
            indicators,
        })
    }

    /// Insufficient data degrades only the indicator concerned.
    fn run(indicator: &dyn Indicator, series: &PriceSeries) -> Result<IndicatorResult, AnalysisError> {
        match indicator.evaluate(series) {
            Err(e @ AnalysisError::InsufficientData { .. }) => {
                debug!("{} reported neutral: {}", indicator.name(), e);
                Ok(IndicatorResult::undefined())
            }
            other => other,
        }
    }
}

/// Analyze with the default engine and fixed fallback.
pub fn analyze_technical(series: &PriceSeries) -> Analysis<TechnicalScore> {
    TechnicalAnalyzer::default().analyze(series)
}
