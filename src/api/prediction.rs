//! Prediction API endpoints.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::debug;

use crate::types::{IndicatorSet, PredictionReport};
use crate::AppState;

/// Technical analysis on its own.
#[derive(Debug, Serialize)]
pub struct TechnicalReport {
    pub technical_score: f64,
    pub indicators: IndicatorSet,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub samples: usize,
    pub timestamp: String,
}

/// Create the prediction router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/prediction", get(get_prediction))
        .route("/api/technical", get(get_technical))
}

/// GET /api/prediction
async fn get_prediction(State(state): State<AppState>) -> Json<PredictionReport> {
    let series = state
        .market_data
        .price_history(state.config.history_days)
        .await;
    debug!(
        "Prediction request for {} over {} samples",
        state.market_data.asset_id(),
        series.len()
    );

    Json(state.predictions.report(&series))
}

/// GET /api/technical
async fn get_technical(State(state): State<AppState>) -> Json<TechnicalReport> {
    let series = state
        .market_data
        .price_history(state.config.history_days)
        .await;
    let analysis = state.predictions.analyze(&series);

    let fallback = analysis.is_fallback();
    let fallback_reason = analysis.reason().map(str::to_string);
    let technical = analysis.into_inner();

    Json(TechnicalReport {
        technical_score: technical.overall_score,
        indicators: technical.indicators,
        fallback,
        fallback_reason,
        samples: series.len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
