//! Sibyl - composite technical and sentiment signal server

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::{
    DemoMarketData, DemoSentiment, FallbackPolicy, MarketDataService, PredictionService,
    Predictor, TechnicalAnalyzer,
};
use sources::CoinGeckoClient;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub market_data: Arc<MarketDataService>,
    pub predictions: Arc<PredictionService>,
}

impl AppState {
    /// Wire up services from configuration.
    pub fn from_config(config: Config) -> Self {
        let fallback = match config.demo_seed {
            Some(seed) => FallbackPolicy::Seeded(seed),
            None => FallbackPolicy::Fixed,
        };

        let coingecko = if config.live_data {
            info!("Live market data enabled for {}", config.asset_id);
            Some(CoinGeckoClient::new(config.coingecko_api_key.clone()))
        } else {
            None
        };

        let market_data = MarketDataService::new(
            config.asset_id.clone(),
            coingecko,
            DemoMarketData::new(config.demo_seed),
        );

        let predictions = PredictionService::new(
            TechnicalAnalyzer::new(fallback),
            Predictor::default(),
            Arc::new(DemoSentiment::new(config.demo_seed)),
        );

        Self {
            config: Arc::new(config),
            market_data: Arc::new(market_data),
            predictions: Arc::new(predictions),
        }
    }
}

/// Build the HTTP application with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use error::{AnalysisError, AppError};
pub use types::*;
