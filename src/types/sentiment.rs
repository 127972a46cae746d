use serde::{Deserialize, Serialize};

/// Qualitative tone of a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Classify a polarity in [-1, 1]; anything within 0.1 of zero is neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.1 {
            SentimentLabel::Positive
        } else if polarity < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Wire string, e.g. `Positive`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }

    /// Dashboard CSS class.
    pub fn css_class(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "bullish",
            SentimentLabel::Neutral => "neutral-signal",
            SentimentLabel::Negative => "bearish",
        }
    }
}

/// A headline with its tone and freshness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub sentiment_label: SentimentLabel,
    /// Human readable age, e.g. "3 hours ago".
    pub time_ago: String,
}

/// Per-channel scores that fed the aggregate, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub news: f64,
    pub social: f64,
    pub market: f64,
}

/// Aggregate market sentiment.
///
/// The fusion stage only reads `score`; news items are passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub score: f64,
    pub news: Vec<NewsItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<SentimentBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_classification() {
        assert_eq!(SentimentLabel::from_polarity(0.5), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.3), SentimentLabel::Negative);
    }

    #[test]
    fn test_label_serialization() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"Positive\"");
    }

    #[test]
    fn test_as_str_matches_serialization() {
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Neutral,
            SentimentLabel::Negative,
        ] {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
    }
}
