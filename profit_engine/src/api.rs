//! HTTP API for the Profit Engine.
//!
//! This module exposes a small REST API around the estimator using the
//! [`axum`](https://crates.io/crates/axum) framework.  Clients submit a
//! calculation input (or the raw form, with percentage rates) and get
//! the result back as JSON.  Stored scenarios are loaded once at
//! startup and served read-only.

use crate::config::ServerConfig;
use crate::engine::{compute, compute_batch};
use crate::error::ApiError;
use crate::models::{CalculationInput, CalculationResult, ProfitForm};
use crate::scenario::{ScenarioBook, ScenarioEvaluation, ScenarioSummary};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Application state shared across requests.
#[derive(Debug, Default)]
pub struct AppState {
    pub scenarios: ScenarioBook,
}

/// Load scenarios from `scenario_dir` and build the router.  Returns
/// the router and a handle to the state.
pub fn build_router(scenario_dir: &std::path::Path) -> Result<(Router, Arc<AppState>)> {
    let scenarios = ScenarioBook::load(scenario_dir)?;
    info!(
        dir = %scenario_dir.display(),
        count = scenarios.len(),
        "loaded scenarios"
    );
    let state = Arc::new(AppState { scenarios });
    Ok((router(state.clone()), state))
}

/// Construct the router around an existing state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/calculate/form", post(calculate_form_handler))
        .route("/api/calculate/batch", post(calculate_batch_handler))
        .route("/api/scenarios", get(list_scenarios_handler))
        .route("/api/scenarios/:name", get(scenario_handler))
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Handler for POST /api/calculate
async fn calculate_handler(Json(input): Json<CalculationInput>) -> Json<CalculationResult> {
    let result = compute(&input);
    debug!(
        basis = ?result.basis,
        revenue = result.revenue,
        profit = result.profit,
        "calculated"
    );
    Json(result)
}

/// Handler for POST /api/calculate/form
async fn calculate_form_handler(Json(form): Json<ProfitForm>) -> Json<CalculationResult> {
    let input = CalculationInput::from(form);
    Json(compute(&input))
}

/// Handler for POST /api/calculate/batch
async fn calculate_batch_handler(
    Json(inputs): Json<Vec<CalculationInput>>,
) -> Json<Vec<CalculationResult>> {
    debug!(count = inputs.len(), "batch calculation");
    Json(compute_batch(&inputs))
}

async fn list_scenarios_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ScenarioSummary>> {
    Json(state.scenarios.summaries())
}

async fn scenario_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ScenarioEvaluation>, ApiError> {
    state.scenarios.evaluate(&name).map(Json)
}

/// Launch the API server.  Builds the router from the configured
/// scenario directory and serves until the process is stopped.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let (router, _state) = build_router(&config.scenario_dir)?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server listening");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Basis, CalculationInput};
    use crate::scenario::Scenario;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let scenario = Scenario {
            name: "launch".into(),
            description: Some("First week".into()),
            input: CalculationInput {
                order_count: 100,
                unit_price: 3500.0,
                unit_product_cost: 800.0,
                unit_shipping_cost: 500.0,
                per_confirmed_order_cost: 50.0,
                advertising_spend: 50000.0,
                additional_costs: Vec::new(),
                confirmation_rate: 0.6,
                delivery_rate: 0.85,
                basis: Basis::Confirmed,
            },
        };
        Arc::new(AppState {
            scenarios: ScenarioBook::new(vec![scenario]),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_calculate_with_numeric_strings() {
        let app = router(test_state());
        let resp = app
            .oneshot(post_json(
                "/api/calculate",
                json!({
                    "orderCount": "100",
                    "unitPrice": "3500",
                    "unitProductCost": "800",
                    "unitShippingCost": "500",
                    "perConfirmedOrderCost": "50",
                    "advertisingSpend": "50000",
                    "confirmationRate": "0.6",
                    "deliveryRate": "0.85",
                    "basis": "DELIVERED"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert!((json["revenue"].as_f64().unwrap() - 178_500.0).abs() < 1e-6);
        assert!((json["totalCost"].as_f64().unwrap() - 119_300.0).abs() < 1e-6);
        assert_eq!(json["basis"], "DELIVERED");
    }

    #[tokio::test]
    async fn test_calculate_garbage_still_ok() {
        let app = router(test_state());
        let resp = app
            .oneshot(post_json(
                "/api/calculate",
                json!({"orderCount": "lots", "unitPrice": "", "confirmationRate": null}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["revenue"].as_f64().unwrap(), 0.0);
        assert_eq!(json["margin"].as_f64().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_calculate_form_uses_percentages() {
        let app = router(test_state());
        let resp = app
            .oneshot(post_json(
                "/api/calculate/form",
                json!({
                    "orderCount": "100",
                    "unitPrice": "3500",
                    "unitProductCost": "800",
                    "unitShippingCost": "500",
                    "perConfirmedOrderCost": "50",
                    "advertisingSpend": "50000",
                    "confirmationRate": "60",
                    "deliveryRate": "85"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert!((json["confirmedOrders"].as_f64().unwrap() - 60.0).abs() < 1e-6);
        assert!((json["profit"].as_f64().unwrap() - 79_000.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_calculate_batch() {
        let app = router(test_state());
        let resp = app
            .oneshot(post_json(
                "/api/calculate/batch",
                json!([
                    {"orderCount": 10, "unitPrice": 100, "confirmationRate": 1, "deliveryRate": 1},
                    {}
                ]),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let results = json.as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["revenue"].as_f64().unwrap(), 1000.0);
        assert_eq!(results[1]["revenue"].as_f64().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_list_scenarios() {
        let app = router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/api/scenarios").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json, json!([{"name": "launch", "description": "First week"}]));
    }

    #[tokio::test]
    async fn test_scenario_evaluation() {
        let app = router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/api/scenarios/launch").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["name"], "launch");
        assert!((json["result"]["profit"].as_f64().unwrap() - 79_000.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_unknown_scenario_is_404() {
        let app = router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/api/scenarios/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "scenario not found: nope");
    }

    #[tokio::test]
    async fn test_build_router_from_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (_router, state) = build_router(&dir.path().join("absent")).unwrap();
        assert!(state.scenarios.is_empty());
    }
}
