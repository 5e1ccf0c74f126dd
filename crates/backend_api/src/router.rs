use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

/// Create the main application router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Extension;
    use dashboard_engine::DashboardOptions;
    use models::{fallback_snapshot, FallbackPolicy, Session, FALLBACK_NOTICE};
    use serde_json::Value;
    use snapshot_client::StaticSnapshotSource;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(source: StaticSnapshotSource, fallback: FallbackPolicy) -> Router {
        let options = DashboardOptions {
            fallback,
            seed: Some(9),
            ..DashboardOptions::default()
        };
        create_router(AppState::new(Arc::new(source), options))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let router = app(StaticSnapshotSource::new(fallback_snapshot()), FallbackPolicy::UseSample);
        let (status, body) = get_json(router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_dashboard_ready() {
        let router = app(StaticSnapshotSource::new(fallback_snapshot()), FallbackPolicy::UseSample);
        let (status, body) = get_json(router, "/api/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "ready");
        assert_eq!(body["metadata"]["source"], "live");
        assert_eq!(body["header"]["title"], "General Hospital Dashboard");
        assert_eq!(body["claims"].as_array().unwrap().len(), 3);
        assert_eq!(body["navbar"]["session"]["kind"], "anonymous");
    }

    #[tokio::test]
    async fn test_dashboard_keeps_claim_key_order() {
        let mut snapshot = fallback_snapshot();
        let claims: Vec<_> = snapshot.claims_data.drain(..).map(|(_, claim)| claim).collect();
        for (key, claim) in ["claim_9", "claim_10", "claim_11"].into_iter().zip(claims) {
            snapshot.claims_data.insert(key.to_string(), claim);
        }
        let router = app(StaticSnapshotSource::new(snapshot), FallbackPolicy::UseSample);
        let (_, body) = get_json(router, "/api/dashboard").await;

        let ids: Vec<&str> = body["claims"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["claim_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["C12345", "C12346", "C12347"]);
        let keys: Vec<&String> = body["snapshot"]["claims_data"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["claim_9", "claim_10", "claim_11"]);
    }

    #[tokio::test]
    async fn test_dashboard_fallback_carries_notification() {
        let router = app(StaticSnapshotSource::failing("down"), FallbackPolicy::UseSample);
        let (status, body) = get_json(router, "/api/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metadata"]["source"], "sample");
        assert_eq!(body["notifications"][0]["message"], FALLBACK_NOTICE);
        assert_eq!(body["notifications"][0]["level"], "warning");
    }

    #[tokio::test]
    async fn test_dashboard_unavailable_when_surfacing() {
        let router = app(StaticSnapshotSource::failing("down"), FallbackPolicy::Surface);
        let (status, body) = get_json(router, "/api/dashboard").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Failed to load dashboard data");
        assert_eq!(body["retry"], true);
        assert!(body["cause"].as_str().unwrap().contains("down"));
    }

    #[tokio::test]
    async fn test_dashboard_uses_injected_session() {
        let router = app(StaticSnapshotSource::new(fallback_snapshot()), FallbackPolicy::UseSample)
            .layer(Extension(Session::authenticated("Asha")));
        let (_, body) = get_json(router, "/api/dashboard").await;

        assert_eq!(body["navbar"]["session"]["kind"], "authenticated");
        assert_eq!(body["navbar"]["session"]["display_name"], "Asha");
    }
}
