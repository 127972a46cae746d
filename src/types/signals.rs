use serde::{Deserialize, Serialize};

/// Discrete direction voted by a single indicator.
///
/// The signed integer is the single source of truth; label and CSS class are
/// always derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndicatorSignal {
    Bearish,
    #[default]
    Neutral,
    Bullish,
}

impl IndicatorSignal {
    /// Signed value: -1, 0 or +1.
    pub fn value(&self) -> i8 {
        match self {
            IndicatorSignal::Bearish => -1,
            IndicatorSignal::Neutral => 0,
            IndicatorSignal::Bullish => 1,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self.value() {
            v if v > 0 => "Bullish",
            v if v < 0 => "Bearish",
            _ => "Neutral",
        }
    }

    /// Dashboard CSS class.
    pub fn css_class(&self) -> &'static str {
        match self.value() {
            v if v > 0 => "bullish",
            v if v < 0 => "bearish",
            _ => "neutral-signal",
        }
    }
}

/// Display value of an indicator: a rounded number or a category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Number(f64),
    Label(String),
}

impl IndicatorValue {
    /// Number rounded to one decimal place.
    pub fn rounded(value: f64) -> Self {
        IndicatorValue::Number((value * 10.0).round() / 10.0)
    }

    pub fn label(label: &str) -> Self {
        IndicatorValue::Label(label.to_string())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            IndicatorValue::Number(n) => Some(*n),
            IndicatorValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            IndicatorValue::Number(_) => None,
            IndicatorValue::Label(l) => Some(l),
        }
    }
}

/// Output of one indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "IndicatorView")]
pub struct IndicatorResult {
    /// `None` when the indicator could not be computed (insufficient data or
    /// an undefined value such as RSI over a flat window).
    pub value: Option<IndicatorValue>,
    pub signal: IndicatorSignal,
}

impl IndicatorResult {
    pub fn new(value: IndicatorValue, signal: IndicatorSignal) -> Self {
        Self {
            value: Some(value),
            signal,
        }
    }

    /// Neutral result with no value.
    pub fn undefined() -> Self {
        Self {
            value: None,
            signal: IndicatorSignal::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        self.signal.label()
    }

    pub fn css_class(&self) -> &'static str {
        self.signal.css_class()
    }
}

/// Wire shape of an [`IndicatorResult`].
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorView {
    pub value: Option<IndicatorValue>,
    pub signal: &'static str,
    pub signal_class: &'static str,
}

impl From<IndicatorResult> for IndicatorView {
    fn from(result: IndicatorResult) -> Self {
        Self {
            signal: result.label(),
            signal_class: result.css_class(),
            value: result.value,
        }
    }
}

/// The five indicators the technical score is built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    pub rsi: IndicatorResult,
    pub macd: IndicatorResult,
    pub bollinger_bands: IndicatorResult,
    pub moving_averages: IndicatorResult,
    pub volume_trend: IndicatorResult,
}

impl IndicatorSet {
    /// Directional votes in a fixed order.
    pub fn signals(&self) -> [IndicatorSignal; 5] {
        [
            self.rsi.signal,
            self.macd.signal,
            self.bollinger_bands.signal,
            self.moving_averages.signal,
            self.volume_trend.signal,
        ]
    }
}

/// Aggregate technical score in [0, 100] plus the indicators behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalScore {
    pub overall_score: f64,
    pub indicators: IndicatorSet,
}

/// Result of a core operation, tagged with whether it is genuine or a
/// placeholder produced after a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis<T> {
    Ok(T),
    Fallback { result: T, reason: String },
}

impl<T> Analysis<T> {
    pub fn fallback(result: T, reason: impl Into<String>) -> Self {
        Analysis::Fallback {
            result,
            reason: reason.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Analysis::Fallback { .. })
    }

    pub fn result(&self) -> &T {
        match self {
            Analysis::Ok(result) => result,
            Analysis::Fallback { result, .. } => result,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Analysis::Ok(result) => result,
            Analysis::Fallback { result, .. } => result,
        }
    }

    /// Why the fallback was used, if it was.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Analysis::Ok(_) => None,
            Analysis::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Final trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl SignalDirection {
    /// Classify a combined score in [0, 100]. Lower bounds are inclusive.
    pub fn from_combined_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => SignalDirection::StrongBuy,
            s if s >= 65.0 => SignalDirection::Buy,
            s if s >= 35.0 => SignalDirection::Neutral,
            s if s >= 20.0 => SignalDirection::Sell,
            _ => SignalDirection::StrongSell,
        }
    }

    /// Get display label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            SignalDirection::StrongBuy => "Strong Buy",
            SignalDirection::Buy => "Buy",
            SignalDirection::Neutral => "Neutral",
            SignalDirection::Sell => "Sell",
            SignalDirection::StrongSell => "Strong Sell",
        }
    }

    /// Wire identifier, e.g. `strong_buy`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::StrongBuy => "strong_buy",
            SignalDirection::Buy => "buy",
            SignalDirection::Neutral => "neutral",
            SignalDirection::Sell => "sell",
            SignalDirection::StrongSell => "strong_sell",
        }
    }
}
