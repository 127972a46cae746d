//! Sentiment aggregation.
//!
//! The fusion stage only needs a score in [0, 100] and a short list of
//! headlines; how they are produced lives behind [`SentimentSource`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::types::{NewsItem, SentimentBreakdown, SentimentLabel, SentimentScore};

/// Maximum news items passed along with a score.
pub const MAX_NEWS_ITEMS: usize = 3;

/// Anything that can report current market sentiment.
pub trait SentimentSource: Send + Sync {
    /// Current sentiment. Must not fail.
    fn score(&self) -> SentimentScore;
}

/// Headlines the demo source draws from.
pub const DEMO_HEADLINES: &[&str] = &[
    "Bitcoin ETFs see record inflows amid institutional adoption",
    "Major corporation announces Bitcoin treasury strategy",
    "Regulatory clarity improves crypto market outlook",
    "Cryptocurrency adoption accelerates in emerging markets",
    "New Bitcoin mining facility goes online with green energy",
    "Financial institutions increase Bitcoin allocations",
];

/// Demo aggregator standing in for news, social and fear/greed feeds.
///
/// Sub-scores are drawn from fixed ranges; with a seed every call returns
/// the same result.
#[derive(Debug, Clone, Default)]
pub struct DemoSentiment {
    seed: Option<u64>,
}

impl DemoSentiment {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn recent_news(rng: &mut StdRng) -> Vec<NewsItem> {
        DEMO_HEADLINES
            .iter()
            .take(MAX_NEWS_ITEMS)
            .map(|headline| {
                let polarity = rng.gen_range(0.3..0.9);
                NewsItem {
                    headline: headline.to_string(),
                    sentiment_label: SentimentLabel::from_polarity(polarity),
                    time_ago: format!("{} hours ago", rng.gen_range(1..=8)),
                }
            })
            .collect()
    }
}

impl SentimentSource for DemoSentiment {
    fn score(&self) -> SentimentScore {
        let mut rng = self.rng();

        let breakdown = SentimentBreakdown {
            news: rng.gen_range(60..=90) as f64,
            social: rng.gen_range(55..=85) as f64,
            market: rng.gen_range(50..=80) as f64,
        };
        let score = ((breakdown.news + breakdown.social + breakdown.market) / 3.0).clamp(0.0, 100.0);

        debug!(
            "Demo sentiment: news {} social {} market {} => {:.1}",
            breakdown.news, breakdown.social, breakdown.market, score
        );

        SentimentScore {
            score,
            news: Self::recent_news(&mut rng),
            breakdown: Some(breakdown),
        }
    }
}

/// Source that always reports the same sentiment.
#[derive(Debug, Clone)]
pub struct StaticSentiment {
    sentiment: SentimentScore,
}

impl StaticSentiment {
    pub fn new(sentiment: SentimentScore) -> Self {
        Self { sentiment }
    }

    /// Score only, no headlines.
    pub fn with_score(score: f64) -> Self {
        Self::new(SentimentScore {
            score,
            news: Vec::new(),
            breakdown: None,
        })
    }
}

impl Default for StaticSentiment {
    /// Score 75 from news 80, social 70, market 75.
    fn default() -> Self {
        let news = DEMO_HEADLINES
            .iter()
            .take(MAX_NEWS_ITEMS)
            .enumerate()
            .map(|(i, headline)| NewsItem {
                headline: headline.to_string(),
                sentiment_label: SentimentLabel::Positive,
                time_ago: format!("{} hours ago", i + 1),
            })
            .collect();

        Self::new(SentimentScore {
            score: 75.0,
            news,
            breakdown: Some(SentimentBreakdown {
                news: 80.0,
                social: 70.0,
                market: 75.0,
            }),
        })
    }
}

impl SentimentSource for StaticSentiment {
    fn score(&self) -> SentimentScore {
        self.sentiment.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_sentiment_in_range() {
        let sentiment = DemoSentiment::new(Some(11)).score();
        assert!((55.0..=85.0).contains(&sentiment.score));
        assert_eq!(sentiment.news.len(), MAX_NEWS_ITEMS);
        assert!(sentiment
            .news
            .iter()
            .all(|n| n.sentiment_label == SentimentLabel::Positive));
    }

    #[test]
    fn test_demo_sentiment_seeded_is_reproducible() {
        let source = DemoSentiment::new(Some(3));
        assert_eq!(source.score(), source.score());
    }

    #[test]
    fn test_demo_time_ago_format() {
        let sentiment = DemoSentiment::new(Some(5)).score();
        for item in &sentiment.news {
            assert!(item.time_ago.ends_with(" hours ago"), "{}", item.time_ago);
            let hours: u32 = item.time_ago.split(' ').next().unwrap().parse().unwrap();
            assert!((1..=8).contains(&hours));
        }
    }

    #[test]
    fn test_static_default_matches_breakdown() {
        let sentiment = StaticSentiment::default().score();
        assert_eq!(sentiment.score, 75.0);
        let breakdown = sentiment.breakdown.unwrap();
        assert_eq!((breakdown.news + breakdown.social + breakdown.market) / 3.0, 75.0);
    }
}
