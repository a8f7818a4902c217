use crate::{
    AppState,
    types::{ConnectionTestResponse, HealthResponse},
};
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// Greeting sent through the planner by the connection test
pub const TEST_MESSAGE: &str = "Hello JARVIS, are you working?";

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "system"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        agents_available: state.registry.keys(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Run a fixed greeting through the planner and report the outcome
#[utoipa::path(
    post,
    path = "/api/v1/test",
    responses((status = 200, description = "Connection test result", body = ConnectionTestResponse)),
    tag = "system"
)]
pub async fn test_connection(State(state): State<AppState>) -> Json<ConnectionTestResponse> {
    let result = state.orchestrator.process(TEST_MESSAGE).await;
    let timestamp = chrono::Utc::now().to_rfc3339();

    let response = match result {
        Ok(reply) => ConnectionTestResponse {
            status: "success".to_string(),
            test_message: Some(TEST_MESSAGE.to_string()),
            response: Some(reply.response),
            error: None,
            timestamp,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Connection test failed");
            ConnectionTestResponse {
                status: "error".to_string(),
                test_message: Some(TEST_MESSAGE.to_string()),
                response: None,
                error: Some(e.to_string()),
                timestamp,
            }
        }
    };

    Json(response)
}

/// Welcome document listing the endpoints
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "J.A.R.V.I.S",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Personal AI assistant with specialized agents",
        "endpoints": {
            "ask": "POST /api/v1/ask",
            "ask_direct": "POST /api/v1/ask-direct",
            "health": "GET /api/v1/health",
            "agents": "GET /api/v1/agents",
            "test": "POST /api/v1/test",
            "openapi": "GET /api-docs/openapi.json"
        }
    }))
}
