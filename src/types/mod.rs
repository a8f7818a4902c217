use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

// ============= API Request/Response Types =============

fn default_agent() -> String {
    "auto".to_string()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AskRequest {
    pub message: String,
    /// `auto` lets the planner decide; any other value names an agent key
    #[serde(default = "default_agent")]
    pub agent: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AskResponse {
    pub response: String,
    pub agent_used: String,
    pub status: String,
}

impl AskResponse {
    pub fn success(response: String, agent_used: String) -> Self {
        Self {
            response,
            agent_used,
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub agents_available: Vec<String>,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    pub kind: AgentKind,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgentListResponse {
    pub agents: BTreeMap<String, AgentInfo>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectionTestResponse {
    pub status: String,
    pub test_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

// ============= Agent Types =============

/// How the router treats a registered agent.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Single-turn exchange with a system prompt (planner, task, tool)
    Conversational,
    /// Structured weather/news/stock lookups with a general-query fallback
    DataLookup,
    /// Multi-source search aggregation
    Search,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    LLM(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(_) => axum::http::StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => axum::http::StatusCode::BAD_REQUEST,
            AppError::LLM(_)
            | AppError::Http(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
