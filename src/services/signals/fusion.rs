//! Fusion stage: blends the technical score with the sentiment score into a
//! trading signal and a confidence level.

use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::types::{Analysis, Prediction, SentimentScore, SignalDirection, TechnicalScore};

/// Weight of the technical score in the combined score.
pub const TECHNICAL_WEIGHT: f64 = 0.6;
/// Weight of the sentiment score in the combined score.
pub const SENTIMENT_WEIGHT: f64 = 0.4;
/// Share of confidence driven by agreement between the two scores.
pub const AGREEMENT_COEFFICIENT: f64 = 0.4;
/// Share of confidence driven by the average of the two scores.
pub const CONVICTION_COEFFICIENT: f64 = 0.6;
/// Confidence floor in percent.
pub const MIN_CONFIDENCE: u8 = 50;
/// Confidence ceiling in percent.
pub const MAX_CONFIDENCE: u8 = 95;
/// Combined score reported by the neutral fallback.
pub const NEUTRAL_COMBINED_SCORE: f64 = 50.0;

/// Weights applied to the two evidence streams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub technical: f64,
    pub sentiment: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            technical: TECHNICAL_WEIGHT,
            sentiment: SENTIMENT_WEIGHT,
        }
    }
}

/// Stateless fusion stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Predictor {
    weights: FusionWeights,
}

impl Predictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: FusionWeights) -> Self {
        Self { weights }
    }

    /// Fuse a technical and a sentiment result.
    pub fn predict(
        &self,
        technical: &TechnicalScore,
        sentiment: &SentimentScore,
    ) -> Analysis<Prediction> {
        self.predict_scores(Some(technical.overall_score), Some(sentiment.score))
    }

    /// Fuse raw scores. Missing, non-finite or out-of-range input yields the
    /// neutral fallback instead of an error.
    pub fn predict_scores(
        &self,
        technical: Option<f64>,
        sentiment: Option<f64>,
    ) -> Analysis<Prediction> {
        let scores = validate_score("technical", technical)
            .and_then(|t| Ok((t, validate_score("sentiment", sentiment)?)));

        match scores {
            Ok((t, s)) => {
                let prediction = self.fuse(t, s);
                debug!(
                    "Fused technical {:.1} and sentiment {:.1} into {:.2} ({}, {}% confidence)",
                    t,
                    s,
                    prediction.combined_score,
                    prediction.signal.as_str(),
                    prediction.confidence
                );
                Analysis::Ok(prediction)
            }
            Err(e) => {
                warn!("Prediction fell back to neutral: {}", e);
                Analysis::fallback(self.neutral(), e.to_string())
            }
        }
    }

    fn fuse(&self, technical: f64, sentiment: f64) -> Prediction {
        let combined_score = self.combined_score(technical, sentiment);

        Prediction {
            signal: SignalDirection::from_combined_score(combined_score),
            confidence: confidence(technical, sentiment),
            combined_score,
            technical_weight: self.weights.technical,
            sentiment_weight: self.weights.sentiment,
        }
    }

    /// Weighted blend of the two scores.
    ///
    /// Algebraically `technical * wt + sentiment * ws`, arranged so equal
    /// inputs come back bit-for-bit when the weights sum to one.
    pub fn combined_score(&self, technical: f64, sentiment: f64) -> f64 {
        let FusionWeights {
            technical: wt,
            sentiment: ws,
        } = self.weights;
        sentiment * (wt + ws) + wt * (technical - sentiment)
    }

    /// The fixed neutral prediction used on malformed input.
    pub fn neutral(&self) -> Prediction {
        Prediction {
            signal: SignalDirection::Neutral,
            confidence: MIN_CONFIDENCE,
            combined_score: NEUTRAL_COMBINED_SCORE,
            technical_weight: self.weights.technical,
            sentiment_weight: self.weights.sentiment,
        }
    }
}

/// Confidence from agreement and average conviction, clamped to [50, 95].
pub fn confidence(technical: f64, sentiment: f64) -> u8 {
    let agreement = 100.0 - (technical - sentiment).abs();
    let average = (technical + sentiment) / 2.0;
    let raw = (agreement * AGREEMENT_COEFFICIENT + average * CONVICTION_COEFFICIENT).round();
    raw.clamp(MIN_CONFIDENCE as f64, MAX_CONFIDENCE as f64) as u8
}

fn validate_score(which: &str, score: Option<f64>) -> Result<f64, AnalysisError> {
    match score {
        None => Err(AnalysisError::MalformedFusionInput(format!(
            "{} score missing",
            which
        ))),
        Some(s) if !s.is_finite() => Err(AnalysisError::MalformedFusionInput(format!(
            "{} score is not finite",
            which
        ))),
        Some(s) if !(0.0..=100.0).contains(&s) => Err(AnalysisError::MalformedFusionInput(
            format!("{} score {} outside [0, 100]", which, s),
        )),
        Some(s) => Ok(s),
    }
}

/// Fuse with the default weights.
pub fn predict(technical: &TechnicalScore, sentiment: &SentimentScore) -> Analysis<Prediction> {
    Predictor::default().predict(technical, sentiment)
}
