use crate::{
    AppState,
    agents::OrchestratorReply,
    types::{AppError, AskRequest, AskResponse, Result},
};
use axum::{Json, extract::State};
use tracing::Instrument;
use uuid::Uuid;

/// Agent value that lets the planner decide
pub const AUTO_AGENT: &str = "auto";

fn validated_message(payload: &AskRequest) -> Result<&str> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::InvalidInput("Message cannot be empty".to_string()));
    }
    Ok(message)
}

/// Ask the assistant, either through the planner or a named agent
#[utoipa::path(
    post,
    path = "/api/v1/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Assistant reply", body = AskResponse),
        (status = 400, description = "Empty message"),
        (status = 429, description = "Rate limit exceeded"),
        (status = 500, description = "Model or agent failure")
    ),
    tag = "assistant"
)]
pub async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let message = validated_message(&payload)?;
    let span = tracing::info_span!("ask", request_id = %Uuid::new_v4(), agent = %payload.agent);

    let reply = async {
        tracing::info!(chars = message.len(), "Processing request");

        if payload.agent == AUTO_AGENT {
            state.orchestrator.process(message).await
        } else {
            state.orchestrator.chat_direct(message, &payload.agent).await
        }
    }
    .instrument(span)
    .await?;

    Ok(Json(into_response(reply)))
}

/// Chat with one agent directly; `auto` means the planner
#[utoipa::path(
    post,
    path = "/api/v1/ask-direct",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Agent reply", body = AskResponse),
        (status = 400, description = "Empty message"),
        (status = 500, description = "Model or agent failure")
    ),
    tag = "assistant"
)]
pub async fn ask_direct(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let message = validated_message(&payload)?;
    let agent = if payload.agent == AUTO_AGENT {
        state.registry.planner_key()
    } else {
        payload.agent.as_str()
    };
    let span = tracing::info_span!("ask_direct", request_id = %Uuid::new_v4(), agent = %agent);

    let reply = state
        .orchestrator
        .chat_direct(message, agent)
        .instrument(span)
        .await?;

    Ok(Json(into_response(reply)))
}

fn into_response(reply: OrchestratorReply) -> AskResponse {
    AskResponse::success(reply.response, reply.agent_used)
}
