use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Reqwest(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::Analysis(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures inside the scoring core.
///
/// None of these cross the public analysis boundary: the analyzer and the
/// predictor turn them into neutral indicators or tagged fallbacks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The series is shorter than an indicator's window.
    #[error("{indicator} needs {required} samples, got {available}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        available: usize,
    },

    /// Arithmetic produced a non-finite value or the input was degenerate.
    #[error("computation failed: {0}")]
    ComputationFailure(String),

    /// A fusion input was missing, non-finite, or outside [0, 100].
    #[error("malformed fusion input: {0}")]
    MalformedFusionInput(String),

    /// Parallel price/volume columns disagree in length.
    #[error("column length mismatch: {prices} prices, {volumes} volumes, {timestamps} timestamps")]
    LengthMismatch {
        prices: usize,
        volumes: usize,
        timestamps: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_status() {
        let response = AppError::BadRequest("hours out of range".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_external_api_status() {
        let response = AppError::ExternalApi("coingecko down".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_analysis_error_status() {
        let err: AppError = AnalysisError::LengthMismatch {
            prices: 2,
            volumes: 1,
            timestamps: 2,
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = AnalysisError::InsufficientData {
            indicator: "rsi",
            required: 15,
            available: 3,
        };
        assert_eq!(err.to_string(), "rsi needs 15 samples, got 3");
    }
}
