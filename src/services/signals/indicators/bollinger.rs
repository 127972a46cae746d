//! Bollinger Bands indicator.

use crate::error::AnalysisError;
use crate::services::signals::{
    ensure_finite, require_periods, sample_std_dev, sma, Indicator,
};
use crate::types::{IndicatorResult, IndicatorSignal, IndicatorValue, PriceSeries};

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// Signals:
/// - Price above upper band = overbought (bearish)
/// - Price below lower band = oversold (bullish)
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

/// Band levels at the latest sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Which level the price sits closest to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPosition {
    Upper,
    Middle,
    Lower,
}

impl BandPosition {
    pub fn label(&self) -> &'static str {
        match self {
            BandPosition::Upper => "Upper",
            BandPosition::Middle => "Middle",
            BandPosition::Lower => "Lower",
        }
    }
}

impl Bands {
    /// Middle wins ties, so a zero-width band reads "Middle".
    pub fn position(&self, price: f64) -> BandPosition {
        let to_upper = (price - self.upper).abs();
        let to_middle = (price - self.middle).abs();
        let to_lower = (price - self.lower).abs();

        if to_middle <= to_upper && to_middle <= to_lower {
            BandPosition::Middle
        } else if to_upper < to_lower {
            BandPosition::Upper
        } else {
            BandPosition::Lower
        }
    }

    pub fn interpret(&self, price: f64) -> IndicatorSignal {
        if price > self.upper {
            IndicatorSignal::Bearish
        } else if price < self.lower {
            IndicatorSignal::Bullish
        } else {
            IndicatorSignal::Neutral
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    /// Calculate the bands over the trailing window.
    pub fn calculate_bands(&self, prices: &[f64]) -> Option<Bands> {
        let middle = sma(prices, self.period)?;
        let std_dev = sample_std_dev(prices, self.period)?;

        Some(Bands {
            upper: middle + self.std_dev_multiplier * std_dev,
            middle,
            lower: middle - self.std_dev_multiplier * std_dev,
        })
    }
}

impl Indicator for BollingerBands {
    fn id(&self) -> &'static str {
        "bollinger_bands"
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, series: &PriceSeries) -> Result<IndicatorResult, AnalysisError> {
        require_periods(self.id(), self.min_periods(), series.len())?;

        let prices = series.prices();
        let bands = self.calculate_bands(&prices).ok_or_else(|| {
            AnalysisError::ComputationFailure("bollinger window too short".into())
        })?;
        ensure_finite(self.id(), "upper band", bands.upper)?;
        ensure_finite(self.id(), "lower band", bands.lower)?;

        let price = series
            .last_price()
            .ok_or_else(|| AnalysisError::ComputationFailure("empty series".into()))?;

        Ok(IndicatorResult::new(
            IndicatorValue::label(bands.position(price).label()),
            bands.interpret(price),
        ))
    }
}
