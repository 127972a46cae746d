use serde::{Deserialize, Serialize};

use super::{IndicatorSet, SignalDirection};

/// Fused recommendation for one request. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub signal: SignalDirection,
    /// Confidence in percent, always within [50, 95].
    pub confidence: u8,
    /// Weighted blend of technical and sentiment scores, in [0, 100].
    pub combined_score: f64,
    pub technical_weight: f64,
    pub sentiment_weight: f64,
}

/// News entry as rendered by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSentimentView {
    pub title: String,
    pub sentiment: String,
    pub sentiment_class: String,
    pub time_ago: String,
}

/// Which stages of a report ran on placeholder data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FallbackTags {
    pub technical: bool,
    pub prediction: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reasons: Vec<String>,
}

/// Response body for the prediction endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub prediction: SignalDirection,
    /// Human readable form of `prediction`, e.g. "Strong Buy".
    pub prediction_label: String,
    pub confidence: u8,
    pub combined_score: f64,
    pub technical_score: f64,
    pub sentiment_score: f64,
    pub technical_weight: f64,
    pub sentiment_weight: f64,
    pub indicators: IndicatorSet,
    pub news_sentiment: Vec<NewsSentimentView>,
    pub fallback: FallbackTags,
    /// ISO-8601 time the report was produced.
    pub timestamp: String,
}
