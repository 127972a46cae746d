pub mod health;
pub mod market;
pub mod prediction;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(prediction::router())
        .merge(market::router())
}
