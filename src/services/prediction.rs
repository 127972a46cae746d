//! Request pipeline: price series -> technical score -> fusion -> report.

use std::sync::Arc;

use tracing::debug;

use crate::services::sentiment::SentimentSource;
use crate::services::signals::{Predictor, TechnicalAnalyzer};
use crate::types::{
    Analysis, FallbackTags, NewsItem, NewsSentimentView, PredictionReport, PriceSeries,
    TechnicalScore,
};

/// Runs the full scoring pipeline for one request.
///
/// Holds no per-request state; safe to share behind an `Arc`.
pub struct PredictionService {
    analyzer: TechnicalAnalyzer,
    predictor: Predictor,
    sentiment: Arc<dyn SentimentSource>,
}

impl PredictionService {
    pub fn new(
        analyzer: TechnicalAnalyzer,
        predictor: Predictor,
        sentiment: Arc<dyn SentimentSource>,
    ) -> Self {
        Self {
            analyzer,
            predictor,
            sentiment,
        }
    }

    pub fn analyze(&self, series: &PriceSeries) -> Analysis<TechnicalScore> {
        self.analyzer.analyze(series)
    }

    /// Score the series, fetch sentiment, and fuse both into a report.
    pub fn report(&self, series: &PriceSeries) -> PredictionReport {
        let technical = self.analyzer.analyze(series);
        let sentiment = self.sentiment.score();
        let prediction = self.predictor.predict(technical.result(), &sentiment);

        let mut fallback = FallbackTags {
            technical: technical.is_fallback(),
            prediction: prediction.is_fallback(),
            reasons: Vec::new(),
        };
        fallback
            .reasons
            .extend(technical.reason().map(|r| format!("technical: {}", r)));
        fallback
            .reasons
            .extend(prediction.reason().map(|r| format!("prediction: {}", r)));

        let technical = technical.into_inner();
        let prediction = prediction.into_inner();

        debug!(
            "Report: {} at {}% (technical {:.1}, sentiment {:.1})",
            prediction.signal.as_str(),
            prediction.confidence,
            technical.overall_score,
            sentiment.score
        );

        PredictionReport {
            prediction: prediction.signal,
            prediction_label: prediction.signal.label().to_string(),
            confidence: prediction.confidence,
            combined_score: prediction.combined_score,
            technical_score: technical.overall_score,
            sentiment_score: sentiment.score,
            technical_weight: prediction.technical_weight,
            sentiment_weight: prediction.sentiment_weight,
            indicators: technical.indicators,
            news_sentiment: sentiment.news.iter().map(news_view).collect(),
            fallback,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn news_view(item: &NewsItem) -> NewsSentimentView {
    NewsSentimentView {
        title: item.headline.clone(),
        sentiment: item.sentiment_label.as_str().to_string(),
        sentiment_class: item.sentiment_label.css_class().to_string(),
        time_ago: item.time_ago.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sentiment::StaticSentiment;
    use crate::services::signals::FallbackPolicy;
    use crate::types::{SentimentLabel, SentimentScore, SignalDirection};

    fn service(sentiment: StaticSentiment) -> PredictionService {
        PredictionService::new(
            TechnicalAnalyzer::default(),
            Predictor::default(),
            Arc::new(sentiment),
        )
    }

    fn rising(count: usize) -> PriceSeries {
        let prices = (0..count).map(|i| 100.0 + i as f64).collect();
        PriceSeries::from_prices_and_volumes(prices, vec![1000.0; count]).unwrap()
    }

    #[test]
    fn test_report_passes_news_through() {
        let sentiment = StaticSentiment::new(SentimentScore {
            score: 60.0,
            news: vec![NewsItem {
                headline: "Exchange outage resolved".into(),
                sentiment_label: SentimentLabel::Negative,
                time_ago: "2 hours ago".into(),
            }],
            breakdown: None,
        });

        let report = service(sentiment).report(&rising(60));
        assert_eq!(report.news_sentiment.len(), 1);
        assert_eq!(report.news_sentiment[0].title, "Exchange outage resolved");
        assert_eq!(report.news_sentiment[0].sentiment, "Negative");
        assert_eq!(report.news_sentiment[0].sentiment_class, "bearish");
    }

    #[test]
    fn test_report_genuine_scores() {
        let report = service(StaticSentiment::with_score(50.0)).report(&rising(60));
        assert!(!report.fallback.technical);
        assert!(!report.fallback.prediction);
        assert!(report.fallback.reasons.is_empty());
        let expected = 0.6 * report.technical_score + 0.4 * 50.0;
        assert!((report.combined_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_report_tags_technical_fallback() {
        let service = PredictionService::new(
            TechnicalAnalyzer::new(FallbackPolicy::Fixed),
            Predictor::default(),
            Arc::new(StaticSentiment::with_score(70.0)),
        );
        let report = service.report(&PriceSeries::default());
        assert!(report.fallback.technical);
        assert!(!report.fallback.prediction);
        assert_eq!(report.technical_score, 70.0);
        assert_eq!(report.combined_score, 70.0);
        assert_eq!(report.prediction, SignalDirection::Buy);
        assert_eq!(report.prediction_label, "Buy");
        assert!(report.fallback.reasons[0].starts_with("technical:"));
    }

    #[test]
    fn test_report_tags_prediction_fallback() {
        let report = service(StaticSentiment::with_score(f64::NAN)).report(&rising(60));
        assert!(report.fallback.prediction);
        assert_eq!(report.prediction, SignalDirection::Neutral);
        assert_eq!(report.confidence, 50);
        assert_eq!(report.combined_score, 50.0);
    }
}
