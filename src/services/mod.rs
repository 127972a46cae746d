pub mod market_data;
pub mod prediction;
pub mod sentiment;
pub mod signals;

pub use market_data::{DemoMarketData, MarketDataService};
pub use prediction::PredictionService;
pub use sentiment::{DemoSentiment, SentimentSource, StaticSentiment};
pub use signals::{analyze_technical, predict, FallbackPolicy, Predictor, TechnicalAnalyzer};
