use crate::AppState;
use crate::api::handlers::{agents, ask, system};
use crate::types::{
    AgentInfo, AgentKind, AgentListResponse, AskRequest, AskResponse, ConnectionTestResponse,
    HealthResponse,
};
use axum::{
    Json, Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "J.A.R.V.I.S API", description = "Multi-agent personal assistant"),
    paths(
        ask::ask,
        ask::ask_direct,
        agents::list_agents,
        system::health,
        system::test_connection,
    ),
    components(schemas(
        AskRequest,
        AskResponse,
        HealthResponse,
        AgentInfo,
        AgentKind,
        AgentListResponse,
        ConnectionTestResponse,
    )),
    tags(
        (name = "assistant", description = "Planner-routed and direct agent requests"),
        (name = "agents", description = "Agent registry"),
        (name = "system", description = "Health and diagnostics"),
    )
)]
pub struct ApiDoc;

/// Routes served under `/api/v1`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ask", post(ask::ask))
        .route("/ask-direct", post(ask::ask_direct))
        .route("/health", get(system::health))
        .route("/agents", get(agents::list_agents))
        .route("/test", post(system::test_connection))
}

/// Full application router without transport layers (CORS, tracing, rate limiting)
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(system::root))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/api/v1", api_routes())
        .with_state(state)
}
