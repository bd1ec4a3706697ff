//! Scoring API surface.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use verdant_core::errors::{ApplicationError, InterfaceError};
use verdant_core::{AlternativeCandidate, ProductSignal};
use verdant_db::repositories::ProductRecord;
use verdant_providers::{CarbonReport, ScoreService};

const DEFAULT_ALTERNATIVES_LIMIT: usize = 5;
const MAX_ALTERNATIVES_LIMIT: usize = 20;

#[derive(Clone)]
pub struct ApiState {
    service: Arc<ScoreService>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub correlation_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AlternativesQuery {
    pub url: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CarbonEstimateQuery {
    pub category: String,
    #[serde(default)]
    pub energy_kwh: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

pub fn router(service: Arc<ScoreService>) -> Router {
    Router::new()
        .route("/api/products/score", post(score_product))
        .route("/api/products/alternatives", get(list_alternatives))
        .route("/api/carbon/estimate", get(estimate_carbon))
        .with_state(ApiState { service })
}

fn correlation_id() -> String {
    format!("req-{}", Utc::now().timestamp_millis())
}

fn map_error(error: ApplicationError) -> (StatusCode, Json<ApiError>) {
    let correlation_id = correlation_id();
    warn!(
        event_name = "system.api.request_failed",
        correlation_id = %correlation_id,
        error = %error,
        "api request failed"
    );

    let interface = error.into_interface(correlation_id.clone());
    let status = match &interface {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ApiError { error: interface.user_message().to_string(), correlation_id }))
}

async fn score_product(
    State(state): State<ApiState>,
    Json(signal): Json<ProductSignal>,
) -> Result<Json<ProductRecord>, (StatusCode, Json<ApiError>)> {
    state.service.score_product(&signal).await.map(Json).map_err(map_error)
}

async fn estimate_carbon(
    State(state): State<ApiState>,
    Query(query): Query<CarbonEstimateQuery>,
) -> Json<CarbonReport> {
    Json(state.service.estimate_carbon(&query.category, query.energy_kwh, query.weight_kg).await)
}

async fn list_alternatives(
    State(state): State<ApiState>,
    Query(query): Query<AlternativesQuery>,
) -> Result<Json<Vec<AlternativeCandidate>>, (StatusCode, Json<ApiError>)> {
    let limit = query.limit.unwrap_or(DEFAULT_ALTERNATIVES_LIMIT).clamp(1, MAX_ALTERNATIVES_LIMIT);

    let found = state.service.rank_alternatives(&query.url, limit).await.map_err(map_error)?;
    match found {
        Some(alternatives) => Ok(Json(alternatives)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "No record exists for the requested product.".to_string(),
                correlation_id: correlation_id(),
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    use verdant_db::repositories::InMemoryProductRepository;
    use verdant_providers::ScoreServiceBuilder;

    use super::router;

    fn test_router() -> axum::Router {
        let repository = Arc::new(InMemoryProductRepository::default());
        let service = ScoreServiceBuilder::new(repository).build().expect("service builds");
        router(Arc::new(service))
    }

    #[tokio::test]
    async fn score_endpoint_returns_a_full_record() {
        let app = test_router();

        let body = serde_json::json!({
            "name": "Bamboo Toothbrush",
            "category": "Beauty",
            "description": "organic bamboo handle, compostable packaging",
            "url": "https://shop.example/p/1"
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/products/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json parses");

        assert_eq!(payload["name"], "Bamboo Toothbrush");
        assert!(payload["eco_score"].as_f64().is_some());
        assert!(payload["record"]["materials"].as_array().is_some());
    }

    #[tokio::test]
    async fn score_endpoint_rejects_missing_name() {
        let app = test_router();

        let body = serde_json::json!({ "name": "", "category": "Beauty" });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/products/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn carbon_estimate_endpoint_serves_the_category_average_path() {
        let app = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/carbon/estimate?category=Television&energy_kwh=100")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json parses");

        assert_eq!(payload["method"], "category_average");
        // Television average 50 kg + 100 kWh * 0.5 grid factor.
        assert_eq!(payload["co2e_kg"], 100.0);
        assert!(payload["eco_score"].as_f64().is_some());
    }

    #[tokio::test]
    async fn alternatives_endpoint_returns_not_found_for_unscored_url() {
        let app = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/products/alternatives?url=https://shop.example/p/unknown")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request succeeds");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
