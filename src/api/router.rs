//! Analysis API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes live under `/api/`; only the analyze endpoint is rate limited.
//!
//! Middleware uses `Extension<ApiContext>` (injected as the outermost
//! layer); endpoint handlers use `State<ApiContext>`.

use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the analysis API router.
pub fn api_router(ctx: ApiContext) -> Router {
    // route_layer applies only to routes registered before it, so the
    // health check stays un-throttled.
    Router::new()
        .route("/api/analyze", post(endpoints::analyze::analyze))
        .route_layer(axum::middleware::from_fn(middleware::rate::limit))
        .route("/api/health", get(endpoints::health::check))
        .with_state(ctx.clone())
        .layer(Extension(ctx))
        // Browser frontends POST from other origins.
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::llm::AnalysisService;

    fn test_router() -> Router {
        api_router(ApiContext::with_service(AnalysisService::mock_only()))
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), 1 << 20).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_service_identity() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], crate::config::APP_NAME);
    }

    #[tokio::test]
    async fn analyze_returns_ranking_and_text() {
        let body = json!({
            "basic_info": { "age": 28, "temperature": 38.5 },
            "symptoms": { "fever": true, "fatigue": true, "headache": true },
            "test_results": { "WBC": 8000 }
        });

        let response = test_router().oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["emergency"], false);
        assert_eq!(json["data"]["ranked"].as_array().unwrap().len(), 5);
        assert!(json["data"]["analysis"]
            .as_str()
            .unwrap()
            .contains("Disclaimer"));
        assert!(json["data"]["disclaimer"]
            .as_str()
            .unwrap()
            .contains("educational"));
    }

    #[tokio::test]
    async fn analyze_rejects_invalid_field_with_400() {
        let body = json!({
            "basic_info": { "age": 900 },
            "symptoms": {},
            "test_results": {}
        });

        let response = test_router().oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
        assert!(json["error"]["message"].as_str().unwrap().contains("age"));
    }

    #[tokio::test]
    async fn emergency_record_skips_analysis() {
        let body = json!({
            "basic_info": { "temperature": 41.0 },
            "symptoms": {},
            "test_results": {}
        });

        let response = test_router().oneshot(post_json(body)).await.unwrap();
        // Emergencies are a successful detection, not an HTTP failure.
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["emergency"], true);
        assert_eq!(json["reasons"][0], "High fever (>40°C)");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn analyze_is_rate_limited_per_client() {
        let router = test_router();
        let body = json!({
            "basic_info": {},
            "symptoms": { "cough": true },
            "test_results": {}
        });

        for _ in 0..crate::config::RATE_LIMIT_REQUESTS {
            let response = router
                .clone()
                .oneshot(post_json(body.clone()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router.clone().oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().get("Retry-After").is_some());
    }

    #[tokio::test]
    async fn health_is_not_rate_limited() {
        let router = test_router();
        for _ in 0..(crate::config::RATE_LIMIT_REQUESTS * 2) {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/health")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
