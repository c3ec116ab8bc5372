//! Error handling for scoring-http
//!
//! Every failure renders as `{"error": message}` with a status derived from
//! the scoring error's kind.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scoring_core::ErrorKind;
use serde_json::json;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Error raised by the model service
    Scoring(scoring_core::Error),

    /// Request body could not be read as JSON
    Rejected(JsonRejection),
}

impl From<scoring_core::Error> for AppError {
    fn from(err: scoring_core::Error) -> Self {
        Self::Scoring(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        Self::Rejected(err)
    }
}

impl PartialEq<StatusCode> for AppError {
    fn eq(&self, status_code: &StatusCode) -> bool {
        let (error_status, _) = self.status_and_message();
        &error_status == status_code
    }
}

impl AppError {
    /// Get the status code and error message for this error
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Scoring(err) => {
                let status = match err.kind() {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::MalformedInput => StatusCode::BAD_REQUEST,
                    ErrorKind::UnsupportedModel
                    | ErrorKind::EvaluationFailed
                    | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            Self::Rejected(rejection) => (rejection.status(), rejection.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", error_message);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
