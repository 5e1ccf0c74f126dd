use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use snapshot_client::Notification;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    DashboardUnavailable {
        message: String,
        cause: String,
        notifications: Vec<Notification>,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::DashboardUnavailable {
                message,
                cause,
                notifications,
            } => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": message,
                    "cause": cause,
                    "retry": true,
                    "notifications": notifications,
                }),
            ),
            ApiError::JsonError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("JSON serialization error: {e}") }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
