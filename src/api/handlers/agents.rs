use crate::{
    AppState,
    types::{AgentInfo, AgentListResponse},
};
use axum::{Json, extract::State};
use std::collections::BTreeMap;

/// List the registered agents
#[utoipa::path(
    get,
    path = "/api/v1/agents",
    responses((status = 200, description = "Registered agents", body = AgentListResponse)),
    tag = "agents"
)]
pub async fn list_agents(State(state): State<AppState>) -> Json<AgentListResponse> {
    let agents: BTreeMap<String, AgentInfo> = state
        .registry
        .iter()
        .map(|agent| {
            (
                agent.key().to_string(),
                AgentInfo {
                    name: agent.key().to_string(),
                    description: agent.description().to_string(),
                    kind: agent.kind(),
                    status: "active".to_string(),
                },
            )
        })
        .collect();

    Json(AgentListResponse {
        total: agents.len(),
        agents,
    })
}
