use crate::error::{AppError, Result};
use crate::types::{ChartData, PriceQuote};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

/// Hours shown on the chart when the query leaves it out.
const DEFAULT_CHART_HOURS: u32 = 24;
/// Longest chart window served.
const MAX_CHART_HOURS: u32 = 168;

/// Query parameters for the chart endpoint.
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub hours: Option<u32>,
}

impl ChartQuery {
    fn hours(&self) -> Result<u32> {
        let hours = self.hours.unwrap_or(DEFAULT_CHART_HOURS);
        if hours == 0 || hours > MAX_CHART_HOURS {
            return Err(AppError::BadRequest(format!(
                "hours must be between 1 and {}",
                MAX_CHART_HOURS
            )));
        }
        Ok(hours)
    }
}

/// GET /api/price
async fn get_price(State(state): State<AppState>) -> Json<PriceQuote> {
    Json(state.market_data.current_price().await)
}

/// GET /api/chart-data
async fn get_chart_data(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartData>> {
    let hours = query.hours()?;
    Ok(Json(state.market_data.chart(hours).await))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/price", get(get_price))
        .route("/api/chart-data", get(get_chart_data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_hours_default() {
        assert_eq!(ChartQuery { hours: None }.hours().unwrap(), 24);
    }

    #[test]
    fn test_chart_hours_bounds() {
        assert!(ChartQuery { hours: Some(0) }.hours().is_err());
        assert!(ChartQuery { hours: Some(169) }.hours().is_err());
        assert_eq!(ChartQuery { hours: Some(168) }.hours().unwrap(), 168);
    }
}
