//! Content analysis route handler.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use truthguard_core::{AnalysisRequest, TruthguardError};

use crate::state::AppState;

/// Generic detail attached to unexpected failures.
const FAILURE_DETAILS: &str = "Failed to analyze content";

/// JSON error body with the status it is served under.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<TruthguardError> for ApiError {
    fn from(err: TruthguardError) -> Self {
        let status = match &err {
            TruthguardError::NoContent => StatusCode::BAD_REQUEST,
            TruthguardError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            TruthguardError::CreditsExhausted => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            json!({ "error": self.message, "details": FAILURE_DETAILS })
        } else {
            json!({ "error": self.message })
        };
        (self.status, Json(body)).into_response()
    }
}

pub async fn analyze_content(State(state): State<AppState>, body: Bytes) -> Response {
    let request: AnalysisRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Invalid analyze-content request body");
            return ApiError::bad_request(format!("Invalid request body: {}", e)).into_response();
        }
    };

    match state.analyzer.analyze(&request).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            error!(error = %e, "Error in analyze-content handler");
            ApiError::from(e).into_response()
        }
    }
}
