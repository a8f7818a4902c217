//! HTTP API Handlers and Routes
//!
//! A thin REST layer over the orchestrator, built on axum.
//!
//! # API Endpoints (`/api/v1`)
//!
//! - `POST /ask` - Route a message through the planner (`agent = "auto"`) or to a named agent
//! - `POST /ask-direct` - Chat with one agent directly (`"auto"` means the planner)
//! - `GET /health` - Health check with the registered agent keys
//! - `GET /agents` - Registered agents and their descriptions
//! - `POST /test` - Run a fixed greeting through the planner
//!
//! The OpenAPI document is served at `/api-docs/openapi.json`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
