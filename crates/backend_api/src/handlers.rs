use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use dashboard_engine::{generate_dashboard, DashboardState};
use models::Session;

use crate::{error::ApiError, state::AppState, Result};

/// GET /api/dashboard
/// Loads one snapshot and returns the assembled page.
/// The session comes from a request extension installed by whatever sits in
/// front of this router; without one the viewer is anonymous.
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Option<Extension<Session>>,
) -> Result<impl IntoResponse> {
    let session = session.map(|Extension(s)| s).unwrap_or_default();
    let dashboard = generate_dashboard(state.source.as_ref(), &session, &state.options).await;

    match dashboard {
        DashboardState::Failed {
            message,
            error,
            notifications,
            ..
        } => Err(ApiError::DashboardUnavailable {
            message,
            cause: error,
            notifications,
        }),
        ready => {
            let body = serde_json::to_value(&ready)?;
            let mut headers = HeaderMap::new();
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            Ok((StatusCode::OK, headers, Json(body)))
        }
    }
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "claimbook-dashboard-api"
    }))
}
